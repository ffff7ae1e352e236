use bytes::Bytes;
use http_body::Body as HttpBody;
use http_body::{Frame, SizeHint};
use http_body_util::BodyExt;
use http_body_util::combinators::UnsyncBoxBody;
use std::convert::Infallible;
use std::error::Error;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::Mutex;

pub type BoxError = Box<dyn Error + Send + Sync>;

type ReqBody = UnsyncBoxBody<Bytes, BoxError>;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error("body has been consumed")]
    Consumed,

    #[error("failed to read body: {source}")]
    Read { source: BoxError },
}

/// The request body, shared between every extractor of one handler call.
///
/// Only the first extractor that asks for it gets the bytes, later ones see [`BodyError::Consumed`].
#[derive(Clone)]
pub struct OptionReqBody {
    inner: Arc<Mutex<Option<ReqBody>>>,
}

impl std::fmt::Debug for OptionReqBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionReqBody").finish_non_exhaustive()
    }
}

impl OptionReqBody {
    pub fn new<B>(body: B) -> Self
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let body: ReqBody = body.map_err(Into::<BoxError>::into).boxed_unsync();
        Self { inner: Arc::new(Mutex::new(Some(body))) }
    }

    pub fn empty() -> Self {
        Self::new(http_body_util::Empty::<Bytes>::new())
    }

    pub async fn can_consume(&self) -> bool {
        let guard = self.inner.lock().await;
        guard.is_some()
    }

    /// Takes the body and reads it to the end.
    pub async fn collect(&self) -> Result<Bytes, BodyError> {
        let body = self.inner.lock().await.take().ok_or(BodyError::Consumed)?;
        let collected = body.collect().await.map_err(|source| BodyError::Read { source })?;
        Ok(collected.to_bytes())
    }
}

#[derive(Debug)]
pub struct ResponseBody {
    inner: Option<Bytes>,
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn once(bytes: Bytes) -> Self {
        if bytes.is_empty() { Self::empty() } else { Self { inner: Some(bytes) } }
    }
}

impl From<String> for ResponseBody {
    fn from(value: String) -> Self {
        Self::once(Bytes::from(value))
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(value: Vec<u8>) -> Self {
        Self::once(Bytes::from(value))
    }
}

impl From<()> for ResponseBody {
    fn from((): ()) -> Self {
        Self::empty()
    }
}

impl From<&'static str> for ResponseBody {
    fn from(value: &'static str) -> Self {
        Self::once(Bytes::from_static(value.as_bytes()))
    }
}

impl HttpBody for ResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().inner.take().map(|bytes| Ok(Frame::data(bytes))))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            None => SizeHint::with_exact(0),
            Some(bytes) => SizeHint::with_exact(bytes.len() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::body::{BodyError, OptionReqBody, ResponseBody};
    use bytes::Bytes;
    use http_body::Body as HttpBody;
    use http_body_util::{BodyExt, Full};

    fn check_send<T: Send>() {}

    #[test]
    fn is_send() {
        check_send::<ResponseBody>();
        check_send::<OptionReqBody>();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_string_body() {
        let s = "Hello world".to_string();
        let len = s.len() as u64;

        let mut body = ResponseBody::from(s);

        assert_eq!(body.size_hint().exact(), Some(len));
        assert!(!body.is_end_stream());

        let bytes = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(bytes, Bytes::from("Hello world"));

        assert!(body.is_end_stream());
        assert!(body.frame().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_empty_body() {
        let mut body = ResponseBody::from("");

        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));

        assert!(body.frame().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_request_body_consumed_once() {
        let body = OptionReqBody::new(Full::new(Bytes::from_static(b"{\"a\":1}")));
        let shared = body.clone();

        assert!(body.can_consume().await);
        assert_eq!(body.collect().await.unwrap(), Bytes::from_static(b"{\"a\":1}"));

        assert!(!shared.can_consume().await);
        assert!(matches!(shared.collect().await, Err(BodyError::Consumed)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_empty_request_body() {
        let body = OptionReqBody::empty();
        assert!(body.collect().await.unwrap().is_empty());
    }
}
