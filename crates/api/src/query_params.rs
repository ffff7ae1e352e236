use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::ops::Range;
use tutorial_web::binding::{ErrorDetail, Field, Schema, ValidationError};
use tutorial_web::extract::{Json, Params};

pub const FAKE_ITEMS_DB: [&str; 3] = ["Foo", "Bar", "Baz"];

const LONG_DESCRIPTION: &str = "This is an amazing item that has a long description";

#[derive(Debug, Deserialize)]
pub struct Paging {
    skip: i64,
    limit: i64,
}

impl Schema for Paging {
    const FIELDS: &'static [Field] =
        &[Field::query("skip").int().default_int(0), Field::query("limit").int().default_int(10)];
}

pub async fn list_items(Params(paging): Params<Paging>) -> Json<Vec<Value>> {
    let window = slice_window(FAKE_ITEMS_DB.len(), paging.skip, paging.skip.saturating_add(paging.limit));
    Json(FAKE_ITEMS_DB[window].iter().map(|name| json!({ "item_name": name })).collect())
}

/// The range `[start:stop]` selects on a sequence of `len` elements: negative bounds count
/// from the end, out of range bounds are clamped, a reversed range is empty.
fn slice_window(len: usize, start: i64, stop: i64) -> Range<usize> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let clamp = |index: i64| if index < 0 { (len + index).max(0) } else { index.min(len) };

    let (start, stop) = (clamp(start), clamp(stop));
    let start = usize::try_from(start).unwrap_or_default();
    let stop = usize::try_from(stop).unwrap_or_default();
    start..stop.max(start)
}

const ITEM_ID: Field = Field::path("item_id");

#[derive(Debug, Deserialize)]
pub struct ReadItem {
    item_id: String,
    q: Option<String>,
}

impl Schema for ReadItem {
    const FIELDS: &'static [Field] = &[ITEM_ID, Field::query("q").optional()];
}

/// With a `q`, the item id has to be an integer and is echoed as one.
pub async fn read_item(Params(params): Params<ReadItem>) -> Result<Json<Value>, ValidationError> {
    let Some(q) = params.q else {
        return Ok(Json(json!({ "item_id": params.item_id })));
    };

    let Ok(item_id) = params.item_id.trim().parse::<i64>() else {
        return Err(ErrorDetail::int_parsing(&ITEM_ID.int(), Value::from(params.item_id)).into());
    };
    Ok(Json(json!({ "item_id": item_id, "q": q })))
}

#[derive(Debug, Deserialize)]
pub struct AnotherItem {
    item_id: String,
    q: Option<String>,
    short: bool,
}

impl Schema for AnotherItem {
    const FIELDS: &'static [Field] =
        &[Field::path("item_id"), Field::query("q").optional(), Field::query("short").bool().default_bool(false)];
}

pub async fn read_another_item(Params(params): Params<AnotherItem>) -> Json<Value> {
    let mut item = Map::new();
    item.insert("item_id".into(), Value::from(params.item_id));
    if let Some(q) = params.q {
        item.insert("q".into(), Value::from(q));
    }
    if !params.short {
        item.insert("description".into(), Value::from(LONG_DESCRIPTION));
    }
    Json(Value::Object(item))
}

#[derive(Debug, Deserialize)]
pub struct Needy {
    needy: String,
}

impl Schema for Needy {
    const FIELDS: &'static [Field] = &[Field::query("needy")];
}

pub async fn required_query_parameter(Params(params): Params<Needy>) -> Json<Value> {
    Json(json!({ "needy": params.needy }))
}
