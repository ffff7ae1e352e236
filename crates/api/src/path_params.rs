use crate::model::ModelName;
use serde::Deserialize;
use serde_json::{Value, json};
use tutorial_web::binding::{Field, Schema};
use tutorial_web::extract::{Json, Params};

#[derive(Debug, Deserialize)]
pub struct PathParameter {
    path_parameter: String,
}

impl Schema for PathParameter {
    const FIELDS: &'static [Field] = &[Field::path("path_parameter")];
}

pub async fn using_path_parameter(Params(params): Params<PathParameter>) -> Json<Value> {
    Json(json!({ "path_parameter": params.path_parameter }))
}

#[derive(Debug, Deserialize)]
pub struct ModelPath {
    model_name: ModelName,
}

impl Schema for ModelPath {
    const FIELDS: &'static [Field] = &[Field::path("model_name").one_of(ModelName::NAMES)];
}

pub async fn get_model(Params(params): Params<ModelPath>) -> Json<Value> {
    Json(json!({ "model_name": params.model_name, "message": params.model_name.message() }))
}
