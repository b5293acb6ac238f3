// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http;
use crate::store::StoreError;

impl StoreError {
    /// HTTP status reported for this failure
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ActivityNotFound | Self::NotSignedUp => StatusCode::NOT_FOUND,
            Self::AlreadySignedUp => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response for a failed store operation
pub fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    http::build_error_response(err.status_code(), &err.to_string())
}

/// 422 response for a required query parameter that was not supplied
pub fn missing_parameter(name: &str) -> Response<Full<Bytes>> {
    http::build_error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &format!("Missing required query parameter: {name}"),
    )
}
