use serde::Deserialize;
use serde_json::{Value, json};
use tutorial_web::binding::{Field, Schema};
use tutorial_web::extract::{Json, Params};

const Q: Field = Field::query("q").min_length(3).max_length(50);

fn items(q: Option<String>) -> Json<Value> {
    let mut results = json!({ "items": [{ "item_id": "Foo" }, { "item_id": "Bar" }] });
    if let (Some(q), Value::Object(fields)) = (q, &mut results) {
        fields.insert("q".into(), Value::from(q));
    }
    Json(results)
}

#[derive(Debug, Deserialize)]
pub struct OptionalQuery {
    q: Option<String>,
}

impl Schema for OptionalQuery {
    const FIELDS: &'static [Field] = &[Q.optional()];
}

pub async fn read_items(Params(params): Params<OptionalQuery>) -> Json<Value> {
    items(params.q)
}

#[derive(Debug, Deserialize)]
pub struct RequiredQuery {
    q: String,
}

impl Schema for RequiredQuery {
    const FIELDS: &'static [Field] = &[Q];
}

pub async fn read_items_required(Params(params): Params<RequiredQuery>) -> Json<Value> {
    items(Some(params.q))
}

/// `q` may be null in the document but has no default, so it still has to be sent.
#[derive(Debug, Deserialize)]
pub struct NullableRequiredQuery {
    q: Option<String>,
}

impl Schema for NullableRequiredQuery {
    const FIELDS: &'static [Field] = &[Q];
}

pub async fn read_items_nullable_required(Params(params): Params<NullableRequiredQuery>) -> Json<Value> {
    items(params.q)
}

#[derive(Debug, Deserialize)]
pub struct QueryList {
    q: Option<Vec<String>>,
}

impl Schema for QueryList {
    const FIELDS: &'static [Field] = &[Field::query("q").list().optional()];
}

pub async fn read_items_list(Params(params): Params<QueryList>) -> Json<Value> {
    Json(json!({ "q": params.q }))
}

#[derive(Debug, Deserialize)]
pub struct AliasedQuery {
    item_id: i64,
    q: Option<String>,
}

impl Schema for AliasedQuery {
    const FIELDS: &'static [Field] = &[Field::path("item_id").int(), Field::query("q").alias("item-query").optional()];
}

pub async fn path_validation(Params(params): Params<AliasedQuery>) -> Json<Value> {
    let mut results = json!({ "item_id": params.item_id });
    if let (Some(q), Value::Object(fields)) = (params.q, &mut results) {
        fields.insert("q".into(), Value::from(q));
    }
    Json(results)
}

/// Declaration order of the parameters doesn't matter, `q` is bound by name.
#[derive(Debug, Deserialize)]
pub struct RequiredQueryFirst {
    q: String,
    item_id: i64,
}

impl Schema for RequiredQueryFirst {
    const FIELDS: &'static [Field] = &[Field::query("q"), Field::path("item_id").int()];
}

pub async fn path_validation_required(Params(params): Params<RequiredQueryFirst>) -> Json<Value> {
    Json(json!({ "item_id": params.item_id, "q": params.q }))
}
