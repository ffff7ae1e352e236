use crate::RequestContext;
use crate::binding::{ErrorDetail, Field, Location, Schema, bind_body};
use crate::body::OptionReqBody;
use crate::extract::{ExtractError, FromRequest, Json};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
impl<T> FromRequest for Json<T>
where
    T: Schema + Send + 'static,
{
    type Error = ExtractError;

    async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
        let bytes = body.collect().await?;

        // a body declared as something else than json is never parsed, it can't be an object
        if !bytes.is_empty() && !is_json(req) {
            let input = Value::from(String::from_utf8_lossy(&bytes).into_owned());
            return Err(ExtractError::Validation(ErrorDetail::not_an_object(input).into()));
        }

        Ok(Json(bind_body::<T>(&bytes)?))
    }

    fn fields() -> Vec<Field> {
        T::FIELDS.iter().filter(|field| field.location() == Location::Body).copied().collect()
    }
}

/// No content type at all counts as json, as does `application/json` and any `application/*+json`.
fn is_json(req: &RequestContext<'_>) -> bool {
    let Some(content_type) = req.headers().get(http::header::CONTENT_TYPE) else {
        return true;
    };

    content_type
        .to_str()
        .ok()
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|media| {
            media.type_() == mime::APPLICATION && (media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON))
        })
}
