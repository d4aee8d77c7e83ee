//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct MessageData<T> {
    pub msg: &'static str,
    pub data: T,
}

#[derive(Serialize)]
pub struct Message {
    pub msg: &'static str,
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::OK, Json(Data { data }))
}

pub fn success_with_msg<T: Serialize>(msg: &'static str, data: T) -> (StatusCode, Json<MessageData<T>>) {
    (StatusCode::OK, Json(MessageData { msg, data }))
}

pub fn created_with_msg<T: Serialize>(msg: &'static str, data: T) -> (StatusCode, Json<MessageData<T>>) {
    (StatusCode::CREATED, Json(MessageData { msg, data }))
}

pub fn message(msg: &'static str) -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message { msg }))
}
