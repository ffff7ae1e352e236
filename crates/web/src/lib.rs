//! A small declarative web layer on top of hyper.
//!
//! Routes are matched with `matchit` path templates and method filters, handlers are plain
//! async functions whose arguments are extractors and whose return value is a [`Responder`].
//! Path, query and body parameters are bound through the [`binding`] layer, which coerces,
//! validates and reports every failing field as a `422`.
//!
//! ```no_run
//! use serde::Deserialize;
//! use tutorial_web::binding::{Field, Schema};
//! use tutorial_web::extract::{Json, Params};
//! use tutorial_web::router::{Router, get};
//! use tutorial_web::{Server, handler_fn};
//!
//! #[derive(Deserialize)]
//! struct Needy {
//!     needy: String,
//! }
//!
//! impl Schema for Needy {
//!     const FIELDS: &'static [Field] = &[Field::query("needy")];
//! }
//!
//! async fn needy(Params(params): Params<Needy>) -> Json<String> {
//!     Json(params.needy)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::builder().route("/needy", get(handler_fn(needy))).build()?;
//!     Server::builder().router(router).address("127.0.0.1:8000").build()?.start().await?;
//!     Ok(())
//! }
//! ```

mod body;
mod fn_trait;
mod handler;
mod request;
mod responder;
mod server;

pub mod binding;
pub mod extract;
pub mod openapi;
pub mod router;

pub use body::BodyError;
pub use body::BoxError;
pub use body::OptionReqBody;
pub use body::ResponseBody;
pub use fn_trait::FnTrait;
pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use request::PathParams;
pub use request::RequestContext;
pub use responder::Responder;
pub use router::Router;
pub use server::Server;
pub use server::ServerBuildError;
pub use server::ServerBuilder;
pub use server::ServerError;
