//! First steps with path, query and body parameters.
//!
//! [`router`] declares every route of the tutorial; the `tutorial-api` binary serves it.

pub mod first_steps;
pub mod model;
pub mod path_params;
pub mod query_params;
pub mod request_body;
pub mod validations;

use model::Tags;
use tutorial_web::handler_fn;
use tutorial_web::router::{Router, RouterBuildError, get, post};

pub const OPENAPI_PATH: &str = "/openapi.json";

pub fn router() -> Result<Router, RouterBuildError> {
    Router::builder()
        .route("/", get(handler_fn(first_steps::root)).tag(Tags::TESTING))
        .route("/hola", get(handler_fn(first_steps::hola)).tag(Tags::TESTING))
        .route("/testing/int", get(handler_fn(first_steps::testing_int)).tag(Tags::TESTING))
        .route("/testing/str", get(handler_fn(first_steps::testing_str)).tag(Tags::TESTING))
        .route(
            "/path/parameters/{path_parameter}",
            get(handler_fn(path_params::using_path_parameter)).tag(Tags::PathParameters.as_str()),
        )
        .route("/models/{model_name}", get(handler_fn(path_params::get_model)).tag(Tags::PathParameters.as_str()))
        .route("/items/", get(handler_fn(query_params::list_items)).tag(Tags::QueryParameters.as_str()))
        .route("/items/{item_id}", get(handler_fn(query_params::read_item)).tag(Tags::QueryParameters.as_str()))
        .route(
            "/another/items/{item_id}",
            get(handler_fn(query_params::read_another_item)).tag(Tags::QueryParameters.as_str()),
        )
        .route(
            "/required/query/parameter",
            get(handler_fn(query_params::required_query_parameter)).tag(Tags::QueryParameters.as_str()),
        )
        .route("/items", post(handler_fn(request_body::create_item)).tag(Tags::RequestBody.as_str()))
        .route("/read-items/", get(handler_fn(validations::read_items)).tag(Tags::Validations.as_str()))
        .route("/read-items-2/", get(handler_fn(validations::read_items_required)).tag(Tags::Validations.as_str()))
        .route(
            "/read-items-3/",
            get(handler_fn(validations::read_items_nullable_required)).tag(Tags::Validations.as_str()),
        )
        .route("/read-items-4/", get(handler_fn(validations::read_items_list)).tag(Tags::Validations.as_str()))
        .route(
            "/path-validation/{item_id}",
            get(handler_fn(validations::path_validation)).tag(Tags::Validations.as_str()),
        )
        .route(
            "/path-validation-2/{item_id}",
            get(handler_fn(validations::path_validation_required)).tag(Tags::Validations.as_str()),
        )
        .openapi(OPENAPI_PATH, "tutorial-api", env!("CARGO_PKG_VERSION"))
        .build()
}
