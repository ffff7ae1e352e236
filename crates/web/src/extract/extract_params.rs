//! Path and query parameter binding
//!
//! Implements [`FromRequest`] for [`Params<T>`]: path segments captured by the router and the
//! decoded query pairs are bound through `T`'s field list by [`bind_params`].

use crate::binding::{Field, Location, Schema, ValidationError, bind_params};
use crate::extract::{FromRequest, Params};
use crate::{OptionReqBody, RequestContext};
use async_trait::async_trait;

#[async_trait]
impl<T> FromRequest for Params<T>
where
    T: Schema + Send + 'static,
{
    type Error = ValidationError;

    async fn from_request(req: &RequestContext<'_>, _body: OptionReqBody) -> Result<Self, Self::Error> {
        let query = req.query_pairs();
        bind_params::<T>(req.path_params(), &query).map(Params)
    }

    fn fields() -> Vec<Field> {
        T::FIELDS.iter().filter(|field| field.location() != Location::Body).copied().collect()
    }
}
