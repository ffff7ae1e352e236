mod extract_body;
mod extract_params;
mod extract_tuple;
mod from_request;

pub use from_request::{ExtractError, FromRequest};

/// Represented as path and query parameters
///
/// every path segment and query pair declared by `T`'s [`Schema`](crate::binding::Schema) is bound,
/// coerced and validated; any failure is answered with a `422` listing every failing field.
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use tutorial_web::binding::{Field, Schema};
/// # use tutorial_web::extract::Params;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct ReadItem {
///     item_id: i64,
///     q: Option<String>,
/// }
///
/// impl Schema for ReadItem {
///     const FIELDS: &'static [Field] = &[Field::path("item_id").int(), Field::query("q").optional()];
/// }
///
/// pub async fn handle(Params(params): Params<ReadItem>) -> String {
///     format!("received params: {:?}", params)
/// }
/// ```
#[derive(Debug)]
pub struct Params<T>(pub T);

/// Represented as json data
///
/// when `post` as a `application/json`, we can using this struct to inject data,
/// note: the struct must impl [`Schema`](crate::binding::Schema) and [`Send`]
///
/// Also a responder: `Json(value)` answers with `value` serialized as `application/json`.
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use tutorial_web::binding::{Field, Schema};
/// # use tutorial_web::extract::Json;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct User {
///     name: String,
///     zip: String,
/// }
///
/// impl Schema for User {
///     const FIELDS: &'static [Field] = &[Field::body("name"), Field::body("zip")];
/// }
///
/// pub async fn handle(Json(user): Json<User>) -> String {
///     format!("received user: {:?}", user)
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);
