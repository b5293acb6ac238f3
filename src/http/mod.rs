//! HTTP protocol layer module
//!
//! Response builders, caching helpers and MIME detection, independent of the activity API.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_cached_response, build_error_response, build_health_response, build_json_response,
    build_options_response, build_redirect_response, build_redirect_response_with_code,
};
