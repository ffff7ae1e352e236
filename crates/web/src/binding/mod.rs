//! Request binding: turns path segments, query pairs and JSON bodies into typed values.
//!
//! A type opts in by implementing [`Schema`], a static list of [`Field`]s describing every
//! parameter it binds. Binding walks that list, coerces and checks each raw value and either
//! deserializes the target type from the bound values or reports every failing field at once.
//!
//! ```
//! use serde::Deserialize;
//! use tutorial_web::binding::{Field, Schema, bind_params};
//! use tutorial_web::PathParams;
//!
//! #[derive(Deserialize)]
//! struct Paging {
//!     skip: i64,
//!     limit: i64,
//! }
//!
//! impl Schema for Paging {
//!     const FIELDS: &'static [Field] = &[Field::query("skip").int().default_int(0), Field::query("limit").int().default_int(10)];
//! }
//!
//! let query = vec![("limit".to_owned(), "2".to_owned())];
//! let paging: Paging = bind_params(&PathParams::empty(), &query).unwrap();
//! assert_eq!((paging.skip, paging.limit), (0, 2));
//! ```

mod coerce;
mod error;
mod field;

pub use error::{ErrorDetail, ValidationError};
pub use field::{DefaultValue, Field, Kind, Location, Presence};

use crate::PathParams;
use coerce::Raw;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A type that can be bound from a request, field by field.
pub trait Schema: DeserializeOwned {
    /// Every parameter of the type, in declaration order.
    const FIELDS: &'static [Field];
}

/// Binds the path and query fields of `T`, path fields first.
pub fn bind_params<T: Schema>(path_params: &PathParams, query: &[(String, String)]) -> Result<T, ValidationError> {
    let path_fields = T::FIELDS.iter().filter(|field| field.location() == Location::Path);
    let query_fields = T::FIELDS.iter().filter(|field| field.location() == Location::Query);
    let fields = path_fields.chain(query_fields);
    let bound = bind_fields(fields, |field| match field.location() {
        Location::Path => path_params.get(field.wire_name()).map_or(Raw::Absent, |value| Raw::Text(vec![value])),
        Location::Query => Raw::Text(
            query.iter().filter(|(key, _)| key == field.wire_name()).map(|(_, value)| value.as_str()).collect(),
        ),
        Location::Body => Raw::Absent,
    })?;

    into_target(bound, Location::Query)
}

/// Binds the body fields of `T` from a JSON object.
pub fn bind_body<T: Schema>(body: &[u8]) -> Result<T, ValidationError> {
    if body.trim_ascii().is_empty() {
        return Err(ErrorDetail::missing_body().into());
    }

    let value = serde_json::from_slice::<Value>(body).map_err(|e| ErrorDetail::json_invalid(&e, body))?;
    let Value::Object(object) = value else {
        return Err(ErrorDetail::not_an_object(value).into());
    };

    let fields = T::FIELDS.iter().filter(|field| field.location() == Location::Body);
    let bound = bind_fields(fields, |field| object.get(field.wire_name()).map_or(Raw::Absent, Raw::Json))?;

    into_target(bound, Location::Body)
}

fn bind_fields<'a, 'r>(
    fields: impl Iterator<Item = &'a Field>,
    lookup: impl Fn(&Field) -> Raw<'r>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut bound = Map::new();
    let mut details = Vec::new();

    for field in fields {
        match coerce::resolve(field, lookup(field)) {
            Ok(value) => {
                bound.insert(field.name().to_owned(), value);
            }
            Err(detail) => details.push(detail),
        }
    }

    if details.is_empty() { Ok(bound) } else { Err(ValidationError::new(details)) }
}

fn into_target<T: DeserializeOwned>(bound: Map<String, Value>, location: Location) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(bound)).map_err(|e| {
        tracing::error!(cause = %e, "bound fields don't match the target type");
        ErrorDetail::model(location, &e).into()
    })
}
