//! OpenAPI 3.1 document generation.
//!
//! The router collects one [`RouteDoc`] per route item while it is built and, when asked to,
//! renders them into a single JSON document served by an [`OpenApiHandler`].

use crate::binding::{Field, Kind, Location, Presence};
use crate::body::ResponseBody;
use crate::extract::Json;
use crate::handler::RequestHandler;
use crate::responder::Responder;
use crate::{OptionReqBody, RequestContext};
use async_trait::async_trait;
use http::{Method, Response};
use serde_json::{Map, Value, json};

pub const OPENAPI_VERSION: &str = "3.1.0";

/// What the document needs to know about one route item.
#[derive(Debug, Clone)]
pub struct RouteDoc {
    pub path: String,
    pub method: Method,
    pub tags: Vec<&'static str>,
    pub fields: Vec<Field>,
}

impl RouteDoc {
    /// `get` + `/items/{item_id}` gives `get_items_item_id`.
    pub fn operation_id(&self) -> String {
        let path = self
            .path
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        let method = self.method.as_str().to_ascii_lowercase();
        if path.is_empty() { method } else { format!("{method}_{path}") }
    }

    fn operation(&self) -> Value {
        let mut operation = Map::new();
        operation.insert("tags".into(), json!(self.tags));
        operation.insert("operationId".into(), Value::from(self.operation_id()));

        let parameters = self
            .fields
            .iter()
            .filter(|field| field.location() != Location::Body)
            .map(parameter)
            .collect::<Vec<_>>();
        if !parameters.is_empty() {
            operation.insert("parameters".into(), Value::Array(parameters));
        }

        let body_fields = self.fields.iter().filter(|field| field.location() == Location::Body).collect::<Vec<_>>();
        if !body_fields.is_empty() {
            operation.insert("requestBody".into(), request_body(&body_fields));
        }

        let mut responses = Map::new();
        responses.insert("200".into(), json!({ "description": "Successful Response" }));
        if !self.fields.is_empty() {
            responses.insert("422".into(), json!({ "description": "Validation Error" }));
        }
        operation.insert("responses".into(), Value::Object(responses));

        Value::Object(operation)
    }
}

/// Renders every route into one document, routes sharing a path are grouped under it.
pub fn document(title: &str, version: &str, routes: &[RouteDoc]) -> Value {
    let mut paths = Map::new();
    for route in routes {
        let item = paths.entry(route.path.clone()).or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(route.method.as_str().to_ascii_lowercase(), route.operation());
        }
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": { "title": title, "version": version },
        "paths": paths,
    })
}

fn parameter(field: &Field) -> Value {
    json!({
        "name": field.wire_name(),
        "in": field.location().as_str(),
        "required": field.location() == Location::Path || field.is_required(),
        "schema": schema(field),
    })
}

fn request_body(fields: &[&Field]) -> Value {
    let properties = fields.iter().map(|field| (field.wire_name().to_owned(), schema(field))).collect::<Map<_, _>>();
    let required = fields.iter().filter(|field| field.is_required()).map(|field| field.wire_name()).collect::<Vec<_>>();

    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "type": "object", "properties": properties, "required": required }
            }
        }
    })
}

fn schema(field: &Field) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::from(field.kind().json_type()));

    match field.kind() {
        Kind::Enum(values) => {
            schema.insert("enum".into(), json!(values));
        }
        Kind::StrList => {
            schema.insert("items".into(), json!({ "type": "string" }));
        }
        Kind::Str | Kind::Int | Kind::Float | Kind::Bool => {}
    }

    if let Some(min_length) = field.min_len() {
        schema.insert("minLength".into(), Value::from(min_length));
    }
    if let Some(max_length) = field.max_len() {
        schema.insert("maxLength".into(), Value::from(max_length));
    }
    if let Presence::Default(default) = field.presence() {
        schema.insert("default".into(), default.to_json());
    }

    Value::Object(schema)
}

/// Serves a rendered document.
#[derive(Debug)]
pub struct OpenApiHandler {
    document: Value,
}

impl OpenApiHandler {
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl RequestHandler for OpenApiHandler {
    async fn invoke(&self, req: &RequestContext<'_>, _req_body: OptionReqBody) -> Response<ResponseBody> {
        Json(&self.document).response_to(req)
    }
}
