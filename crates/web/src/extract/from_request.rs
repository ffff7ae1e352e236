use crate::binding::{Field, ValidationError};
use crate::body::{BodyError, OptionReqBody};
use crate::extract::Json;
use crate::responder::Responder;
use crate::{RequestContext, ResponseBody};
use async_trait::async_trait;
use http::{HeaderMap, Method, Response, StatusCode};
use serde_json::json;
use thiserror::Error;

#[async_trait]
pub trait FromRequest: Sized {
    type Error: Responder + Send;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error>;

    /// The parameters this extractor binds, used to document the route.
    fn fields() -> Vec<Field> {
        Vec::new()
    }
}

#[async_trait]
impl FromRequest for () {
    type Error = ExtractError;

    async fn from_request(_req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl FromRequest for Method {
    type Error = ExtractError;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.method().clone())
    }
}

#[async_trait]
impl FromRequest for HeaderMap {
    type Error = ExtractError;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        Ok(req.headers().clone())
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid body: {source}")]
    Body {
        #[from]
        source: BodyError,
    },
}

impl Responder for ValidationError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        tracing::debug!(path = req.uri().path(), cause = %self, "reject request");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self.to_json())).response_to(req)
    }
}

impl Responder for ExtractError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            ExtractError::Validation(e) => e.response_to(req),
            ExtractError::Body { source } => {
                tracing::warn!(cause = %source, "can't read request body");
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": "There was an error parsing the body" }))).response_to(req)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::binding::ErrorDetail;
    use crate::body::BodyError;
    use crate::extract::{ExtractError, FromRequest};
    use crate::responder::Responder;
    use crate::{OptionReqBody, PathParams, RequestContext};
    use http::{HeaderMap, Method, Request, StatusCode};
    use http_body_util::BodyExt;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_method_and_headers() {
        let (parts, ()) = Request::delete("/").header("x-token", "abc").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());

        let method = Method::from_request(&ctx, OptionReqBody::empty()).await.unwrap();
        assert_eq!(method, Method::DELETE);

        let headers = HeaderMap::from_request(&ctx, OptionReqBody::empty()).await.unwrap();
        assert_eq!(headers["x-token"], "abc");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_error_responses() {
        let (parts, ()) = Request::post("/items").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());

        let response = ExtractError::from(BodyError::Consumed).response_to(&ctx);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"detail":"There was an error parsing the body"}"#);

        let response = ExtractError::Validation(ErrorDetail::missing_body().into()).response_to(&ctx);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
