use crate::binding::Field;
use crate::body::OptionReqBody;
use crate::extract::from_request::FromRequest;
use crate::responder::Responder;
use crate::{RequestContext, ResponseBody};
use async_trait::async_trait;
use http::Response;

/// impl `FromRequest` for tuples of extractors, From 1 parameters to 8 parameters
///
/// extractors run in order, the first one failing answers the request
macro_rules! impl_from_request_for_tuple ({ $($param:ident)* } => {
    #[async_trait]
    impl<$($param,)*> FromRequest for ($($param,)*)
    where
        $($param: FromRequest + Send + 'static,)*
    {
        type Error = Response<ResponseBody>;

        async fn from_request(req: &RequestContext<'_>, body: OptionReqBody) -> Result<Self, Self::Error> {
            Ok(($($param::from_request(req, body.clone()).await.map_err(|e| e.response_to(req))?,)*))
        }

        fn fields() -> Vec<Field> {
            let mut fields = Vec::new();
            $(
            fields.extend($param::fields());
            )*
            fields
        }
    }
});

impl_from_request_for_tuple! { A }
impl_from_request_for_tuple! { A B }
impl_from_request_for_tuple! { A B C }
impl_from_request_for_tuple! { A B C D }
impl_from_request_for_tuple! { A B C D E }
impl_from_request_for_tuple! { A B C D E F }
impl_from_request_for_tuple! { A B C D E F G }
impl_from_request_for_tuple! { A B C D E F G H }
