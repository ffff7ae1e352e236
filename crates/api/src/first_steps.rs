use serde_json::{Value, json};
use tutorial_web::extract::Json;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello world" }))
}

pub async fn hola() -> Json<Value> {
    Json(json!({ "message": "Estas en el endpoint 'hola'" }))
}

pub async fn testing_int() -> Json<i64> {
    Json(3)
}

pub async fn testing_str() -> Json<&'static str> {
    Json("testing")
}
