use crate::model::Item;
use serde_json::{Value, json};
use tutorial_web::extract::Json;

/// Echoes the item, adding `price_with_tag` when it has a tax.
pub async fn create_item(Json(item): Json<Item>) -> Json<Value> {
    let mut response = json!({
        "name": item.name,
        "description": item.description,
        "price": item.price,
        "tax": item.tax,
    });
    if let (Some(tax), Value::Object(fields)) = (item.tax, &mut response) {
        fields.insert("price_with_tag".into(), json!(item.price + tax));
    }
    Json(response)
}
