use crate::binding::Field;
use crate::body::ResponseBody;
use crate::fn_trait::FnTrait;

use crate::extract::FromRequest;
use crate::responder::Responder;
use crate::{OptionReqBody, RequestContext};
use async_trait::async_trait;
use http::Response;

use std::marker::PhantomData;

#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_>, req_body: OptionReqBody) -> Response<ResponseBody>;

    /// Every parameter the handler binds, in argument order.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

/// a `FnTrait` holder which represents any async Fn
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> std::fmt::Debug for FnHandler<F, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("f", &std::any::type_name::<F>()).finish()
    }
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args> + 'static,
    F::Output: Responder,
    Args: FromRequest + Send + 'static,
{
    async fn invoke(&self, req: &RequestContext<'_>, req_body: OptionReqBody) -> Response<ResponseBody> {
        let args = match Args::from_request(req, req_body).await {
            Ok(args) => args,
            Err(e) => return e.response_to(req),
        };
        let responder = self.f.call(args).await;
        responder.response_to(req)
    }

    fn fields(&self) -> Vec<Field> {
        Args::fields()
    }
}
