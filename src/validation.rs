//! Declarative input-shape rules checked before a handler runs.
//!
//! Every check of every rule is evaluated; each failure produces one
//! [`FieldError`]. An empty result means the input is acceptable.

use crate::model::{ProductInput, NAME_MAX_CHARS};
use serde::Serialize;
use serde_json::{Map, Value};

/// Where a field is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// 32-bit integer, as a number or a decimal string.
    IsInt,
    /// Present, not null, and a non-empty scalar.
    NotEmpty,
    /// Finite number, as a number or a numeric string.
    IsFloat,
    /// Numeric and strictly greater than zero.
    Positive,
    /// `true`/`false`, or one of `"true"`, `"false"`, `"1"`, `"0"`.
    IsBoolean,
    /// At most this many characters. Absent values are left to other checks.
    MaxChars(usize),
}

impl Check {
    fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Check::IsInt => value.and_then(as_int).is_some(),
            Check::NotEmpty => value.and_then(as_text).map(|s| !s.is_empty()).unwrap_or(false),
            Check::IsFloat => value.and_then(as_float).is_some(),
            Check::Positive => value.and_then(as_float).map(|n| n > 0.0).unwrap_or(false),
            Check::IsBoolean => value.and_then(as_bool).is_some(),
            Check::MaxChars(max) => value.and_then(as_text).map(|s| s.chars().count() <= max).unwrap_or(true),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub location: Location,
    pub checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    pub fn param(field: &'static str) -> Self {
        FieldRule {
            field,
            location: Location::Params,
            checks: Vec::new(),
        }
    }

    pub fn body(field: &'static str) -> Self {
        FieldRule {
            field,
            location: Location::Body,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push((check, message));
        self
    }
}

/// One failed check, serialized as `{type, value, msg, path, location}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: Location,
}

/// Rules for the `:id` path segment.
pub fn id_rules() -> Vec<FieldRule> {
    vec![FieldRule::param("id").check(Check::IsInt, "ID no válido")]
}

/// Rules for a create/update product body.
pub fn product_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::body("name")
            .check(Check::NotEmpty, "El nombre es obligatorio")
            .check(Check::MaxChars(NAME_MAX_CHARS), "El nombre no puede superar los 100 caracteres"),
        FieldRule::body("price")
            .check(Check::IsFloat, "El precio debe ser un número")
            .check(Check::Positive, "Precio no válido"),
        FieldRule::body("availability").check(Check::IsBoolean, "La disponibilidad debe ser un valor booleano"),
    ]
}

/// Evaluate `rules` against path params and body fields.
pub fn validate(rules: &[FieldRule], params: &Map<String, Value>, body: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for rule in rules {
        let source = match rule.location {
            Location::Params => params,
            Location::Body => body,
        };
        let value = source.get(rule.field);
        for &(check, msg) in &rule.checks {
            if !check.passes(value) {
                errors.push(FieldError {
                    kind: "field",
                    value: value.cloned(),
                    msg,
                    path: rule.field,
                    location: rule.location,
                });
            }
        }
    }
    errors
}

/// Typed product fields from a body that already passed [`product_rules`].
pub fn product_input(body: &Map<String, Value>) -> Option<ProductInput> {
    Some(ProductInput {
        name: body.get("name").and_then(as_text)?,
        price: body.get("price").and_then(as_float)?,
        availability: body.get("availability").and_then(as_bool)?,
    })
}

pub fn as_int(v: &Value) -> Option<i32> {
    match v {
        Value::Number(n) => n.as_i64().and_then(|i| i32::try_from(i).ok()),
        Value::String(s) if is_int_literal(s) => s.parse::<i32>().ok(),
        _ => None,
    }
}

/// Optional sign, then `0` or digits without a leading zero.
fn is_int_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_float(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
