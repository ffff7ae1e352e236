//! The HTTP listener and the request dispatcher.
//!
//! [`Server::start`] accepts TCP connections and serves each one on its own task with hyper's
//! HTTP/1 connection driver. Every request goes through [`Server::handle`], which can also be
//! called directly, without any socket.

use crate::body::{BoxError, ResponseBody};
use crate::extract::Json;
use crate::handler::RequestHandler;
use crate::responder::Responder;
use crate::router::Router;
use crate::{OptionReqBody, PathParams, RequestContext};
use bytes::Bytes;
use http::{HeaderValue, Method, Request, Response, StatusCode, Uri};
use http_body::Body;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::json;
use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

pub struct ServerBuilder {
    router: Option<Router>,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Option<io::Result<Vec<SocketAddr>>>,
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder").field("router", &self.router).field("address", &self.address).finish_non_exhaustive()
    }
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, default_handler: None, address: None }
    }

    /// The address to listen on, resolved now and reported by [`ServerBuilder::build`] when it can't be.
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Answers requests whose path matches no route, instead of the default `404`.
    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(|source| ServerBuildError::InvalidAddress { source })?;
        Ok(Server { router, default_handler: self.default_handler, address })
    }
}

pub struct Server {
    router: Router,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Vec<SocketAddr>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server").field("router", &self.router).field("address", &self.address).finish_non_exhaustive()
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {address:?}: {source}")]
    Bind { address: Vec<SocketAddr>, source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Listens on the configured address and serves connections until the process stops.
    ///
    /// Only a failing bind ends it; accept and connection errors are logged.
    pub async fn start(self) -> Result<(), ServerError> {
        info!(address = ?self.address, "start listening");
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(source) => return Err(ServerError::Bind { address: self.address, source }),
        };

        let server = Arc::new(self);
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let server = Arc::clone(&server);

            tokio::spawn(async move {
                let io = TokioIo::new(tcp_stream);
                let service = service_fn(move |req: Request<Incoming>| {
                    let server = Arc::clone(&server);
                    async move { Ok::<_, Infallible>(server.handle(req).await) }
                });

                match http1::Builder::new().serve_connection(io, service).await {
                    Ok(()) => debug!(%remote_addr, "finished process, connection shutdown"),
                    Err(e) => error!(%remote_addr, cause = %e, "service has error, connection shutdown"),
                }
            });
        }
    }

    /// Dispatches one request.
    ///
    /// The first item of the matched path whose filter accepts the request answers it, `HEAD`
    /// goes to the `GET` item and gets its response without the body. A matched path without
    /// such an item gives `405`. An unmatched path is redirected when toggling its
    /// trailing slash matches, otherwise it goes to the default handler or gets a `404`.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<ResponseBody>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let req_body = OptionReqBody::new(body);

        let route_result = self.router.at(parts.uri.path());
        if route_result.is_empty() {
            if let Some(response) = self.redirect_slash(&parts.uri) {
                return response;
            }

            let request_context = RequestContext::new(&parts, PathParams::empty());
            return match &self.default_handler {
                Some(default_handler) => default_handler.invoke(&request_context, req_body).await,
                None => detail(StatusCode::NOT_FOUND, "Not Found", &request_context),
            };
        }

        let router_items = route_result.router_items();
        let request_context = RequestContext::new(&parts, route_result.into_params());
        debug!(method = %request_context.method(), path = request_context.uri().path(), "dispatch request");

        let response = match router_items.iter().find(|item| item.filter().matches(&request_context)) {
            Some(item) => item.handler().invoke(&request_context, req_body).await,
            None => detail(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", &request_context),
        };

        if request_context.method() == Method::HEAD {
            let (parts, _body) = response.into_parts();
            return Response::from_parts(parts, ResponseBody::empty());
        }
        response
    }

    fn redirect_slash(&self, uri: &Uri) -> Option<Response<ResponseBody>> {
        let path = uri.path();
        let toggled = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
            Some(_) => return None,
            None => format!("{path}/"),
        };

        if self.router.at(&toggled).is_empty() {
            return None;
        }

        let location = match uri.query() {
            Some(query) => format!("{toggled}?{query}"),
            None => toggled,
        };
        let location = HeaderValue::try_from(location).ok()?;

        let mut response = Response::new(ResponseBody::empty());
        *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
        response.headers_mut().insert(http::header::LOCATION, location);
        Some(response)
    }
}

fn detail(status: StatusCode, detail: &str, req: &RequestContext) -> Response<ResponseBody> {
    (status, Json(json!({ "detail": detail }))).response_to(req)
}
