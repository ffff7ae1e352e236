pub mod filter;

use crate::PathParams;
use crate::handler::RequestHandler;
use crate::openapi::{self, OpenApiHandler, RouteDoc};

use filter::{Filter, MethodFilter};
use http::Method;
use thiserror::Error;
use tracing::debug;

type RouterFilter = dyn Filter + Send + Sync + 'static;
type InnerRouter<T> = matchit::Router<T>;

/// Main router structure that handles HTTP request routing
///
/// Built once at startup, it is read-only afterwards and shared by every connection.
pub struct Router {
    inner_router: InnerRouter<Vec<RouterItem>>,
    routes: Vec<RouteDoc>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes).finish_non_exhaustive()
    }
}

/// A router item containing a filter and handler
pub struct RouterItem {
    filter: Box<RouterFilter>,
    handler: Box<dyn RequestHandler>,
}

impl std::fmt::Debug for RouterItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterItem").finish_non_exhaustive()
    }
}

/// Result of matching a route, containing matched items and path parameters
#[derive(Debug)]
pub struct RouteResult<'router> {
    router_items: &'router [RouterItem],
    params: PathParams,
}

#[derive(Error, Debug)]
pub enum RouterBuildError {
    #[error("invalid route '{path}': {source}")]
    InvalidRoute {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}

impl Router {
    /// Creates a new router builder
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Matches a path against the router's routes
    ///
    /// Returns a `RouteResult` containing matched handlers and path parameters,
    /// an empty one when nothing matched.
    pub fn at(&self, path: &str) -> RouteResult<'_> {
        match self.inner_router.at(path) {
            Ok(matched) => RouteResult { router_items: matched.value.as_slice(), params: matched.params.into() },
            Err(e) => {
                debug!(path, cause = %e, "no route matched");
                RouteResult::empty()
            }
        }
    }

    /// Every registered route item, in registration order.
    pub fn routes(&self) -> &[RouteDoc] {
        &self.routes
    }
}

impl RouterItem {
    /// Gets the filter for this router item
    pub fn filter(&self) -> &RouterFilter {
        self.filter.as_ref()
    }

    /// Gets the request handler for this router item
    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl<'router> RouteResult<'router> {
    fn empty() -> Self {
        Self { router_items: &[], params: PathParams::empty() }
    }

    /// Returns true if no routes were matched
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.router_items.is_empty()
    }

    /// Gets the path parameters from the matched route
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Gives the path parameters away, the request context owns them
    pub fn into_params(self) -> PathParams {
        self.params
    }

    /// Gets the matched router items
    pub fn router_items(&self) -> &'router [RouterItem] {
        self.router_items
    }
}

#[derive(Debug)]
struct OpenApiConfig {
    path: String,
    title: String,
    version: String,
}

pub struct RouterBuilder {
    routes: Vec<(String, Vec<RouterItemBuilder>)>,
    openapi: Option<OpenApiConfig>,
}

impl std::fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let paths = self.routes.iter().map(|(path, _)| path).collect::<Vec<_>>();
        f.debug_struct("RouterBuilder").field("paths", &paths).field("openapi", &self.openapi).finish()
    }
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: Vec::new(), openapi: None }
    }

    /// Adds an item to `route`, items of the same route are tried in the order they were added.
    pub fn route(mut self, route: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        let route = route.into();
        match self.routes.iter_mut().find(|(path, _)| *path == route) {
            Some((_, items)) => items.push(item_builder),
            None => self.routes.push((route, vec![item_builder])),
        }
        self
    }

    /// Serves an OpenAPI document of every route at `path`.
    pub fn openapi(mut self, path: impl Into<String>, title: impl Into<String>, version: impl Into<String>) -> Self {
        self.openapi = Some(OpenApiConfig { path: path.into(), title: title.into(), version: version.into() });
        self
    }

    /// Builds the router from the accumulated routes
    pub fn build(self) -> Result<Router, RouterBuildError> {
        let mut inner_router = InnerRouter::new();
        let mut routes = Vec::new();

        for (path, items) in self.routes {
            let router_items = items
                .into_iter()
                .map(|item_builder| {
                    routes.push(item_builder.doc(&path));
                    item_builder.build()
                })
                .collect::<Vec<_>>();

            insert(&mut inner_router, path, router_items)?;
        }

        if let Some(config) = self.openapi {
            let document = openapi::document(&config.title, &config.version, &routes);
            insert(&mut inner_router, config.path, vec![get(OpenApiHandler::new(document)).build()])?;
        }

        Ok(Router { inner_router, routes })
    }
}

fn insert(
    inner_router: &mut InnerRouter<Vec<RouterItem>>,
    path: String,
    items: Vec<RouterItem>,
) -> Result<(), RouterBuildError> {
    match inner_router.insert(path.as_str(), items) {
        Ok(()) => Ok(()),
        Err(source) => Err(RouterBuildError::InvalidRoute { path, source }),
    }
}

macro_rules! method_router_filter {
    ($method:ident, $method_name:ident) => {
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            RouterItemBuilder::new(filter::$method_name(), Box::new(handler))
        }
    };
}

method_router_filter!(get, get_method);
method_router_filter!(post, post_method);

pub struct RouterItemBuilder {
    method: Method,
    filter: MethodFilter,
    handler: Box<dyn RequestHandler>,
    tags: Vec<&'static str>,
}

impl std::fmt::Debug for RouterItemBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterItemBuilder").field("method", &self.method).field("tags", &self.tags).finish()
    }
}

impl RouterItemBuilder {
    fn new(method_filter: MethodFilter, handler: Box<dyn RequestHandler>) -> Self {
        let method = method_filter.method().clone();
        Self { method, filter: method_filter, handler, tags: Vec::new() }
    }

    /// Groups the route under `tag` in the OpenAPI document.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tags.push(tag);
        self
    }

    fn doc(&self, path: &str) -> RouteDoc {
        RouteDoc { path: path.to_owned(), method: self.method.clone(), tags: self.tags.clone(), fields: self.handler.fields() }
    }

    fn build(self) -> RouterItem {
        RouterItem { filter: Box::new(self.filter), handler: self.handler }
    }
}
