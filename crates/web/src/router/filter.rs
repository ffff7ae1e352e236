//! Request filtering for route items.
//!
//! Every route item carries one filter; the dispatcher picks the first item of a matched
//! path whose filter accepts the request.
//!
//! # Examples
//!
//! ```
//! use tutorial_web::router::filter::get_method;
//!
//! let filter = get_method();
//! assert_eq!(filter.method(), http::Method::GET);
//! ```

use crate::RequestContext;
use http::Method;

/// Core trait for request filtering.
///
/// The `Filter` trait requires `Send + Sync`, filters are shared by every connection task.
pub trait Filter: Send + Sync {
    /// Check if the request matches this filter's criteria.
    fn matches(&self, req: &RequestContext) -> bool;
}

/// A filter that matches HTTP methods.
///
/// A `GET` filter also accepts `HEAD`, the server answers those without a body.
#[derive(Debug, Clone)]
pub struct MethodFilter(Method);

impl MethodFilter {
    pub fn method(&self) -> &Method {
        &self.0
    }
}

impl Filter for MethodFilter {
    fn matches(&self, req: &RequestContext) -> bool {
        let method = req.method();
        self.0 == method || (self.0 == Method::GET && method == Method::HEAD)
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Creates a filter that matches HTTP ", stringify!($upper_case_method), " requests.")]
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);
