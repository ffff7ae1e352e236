//! Request handling module that provides access to HTTP request information and path parameters.
//!
//! This module contains the core types for working with HTTP requests in the web framework:
//! - `RequestContext`: Provides access to request headers, query pairs and path parameters
//! - `PathParams`: Handles URL path parameters extracted from request paths

use http::request::Parts;
use http::{HeaderMap, Method, Uri};
use matchit::Params;
use percent_encoding::percent_decode_str;

/// Represents the context of an HTTP request, providing access to both the request head
/// and any path parameters extracted from the URL.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request_header: &'req Parts,
    path_params: PathParams,
}

impl<'req> RequestContext<'req> {
    /// Creates a new RequestContext with the given request head and path parameters
    pub fn new(request_header: &'req Parts, path_params: PathParams) -> Self {
        Self { request_header, path_params }
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.request_header.method
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        &self.request_header.uri
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        &self.request_header.headers
    }

    /// Returns a reference to the path parameters extracted from the request URL
    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// Decodes the query string into `(key, value)` pairs, keeping repeated keys in order.
    ///
    /// A missing query string yields no pairs, an undecodable one is logged and treated the same.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = self.uri().query() else {
            return Vec::new();
        };

        serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|e| {
            tracing::warn!(cause = %e, query, "can't decode query string");
            Vec::new()
        })
    }
}

/// Represents path parameters extracted from the URL path of an HTTP request.
///
/// Path parameters are named segments in the URL path that can be extracted and accessed
/// by name. For example, in the path "/users/{id}", "id" is a path parameter.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Creates an empty PathParams instance with no parameters
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if there are no path parameters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of path parameters
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Gets the value of a path parameter by its name
    /// Returns None if the parameter doesn't exist
    #[inline]
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl From<Params<'_, '_>> for PathParams {
    fn from(params: Params<'_, '_>) -> Self {
        let params = params.iter().map(|(k, v)| (k.to_owned(), percent_decode(v))).collect();
        PathParams { params }
    }
}

/// Decodes `%XX` escapes of a raw path segment, invalid escapes are kept as they are.
fn percent_decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        PathParams { params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PathParams, RequestContext};
    use http::Request;

    #[test]
    fn test_query_pairs_keep_repeated_keys() {
        let (parts, ()) = Request::get("/read-items-4/?q=foo&q=bar%20baz&x=1").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());

        let pairs = ctx.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("q".to_owned(), "foo".to_owned()),
                ("q".to_owned(), "bar baz".to_owned()),
                ("x".to_owned(), "1".to_owned())
            ]
        );
    }

    #[test]
    fn test_query_pairs_without_query() {
        let (parts, ()) = Request::get("/items/").body(()).unwrap().into_parts();
        let ctx = RequestContext::new(&parts, PathParams::empty());
        assert!(ctx.query_pairs().is_empty());
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(super::percent_decode("hello%20world"), "hello world");
        assert_eq!(super::percent_decode("caf%C3%A9"), "café");
        assert_eq!(super::percent_decode("100%"), "100%");
        assert_eq!(super::percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_path_params_lookup() {
        let params: PathParams = [("item_id", "42")].into_iter().collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("item_id"), Some("42"));
        assert_eq!(params.get("other"), None);
        assert!(PathParams::empty().is_empty());
    }
}
