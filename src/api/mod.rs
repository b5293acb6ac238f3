// API module entry
// Activity listing and participant sign-up/removal endpoints

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::config::AppState;
use crate::http;

// Re-export public types
pub use response::{missing_parameter, store_error_response};
pub use types::{ActivityRoute, MessageResponse};

/// Activity route handler
///
/// Dispatches a parsed route to its handler based on request method.
pub async fn handle_activities(
    method: &Method,
    route: &ActivityRoute<'_>,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match (method, route) {
        (&Method::GET | &Method::HEAD, ActivityRoute::List) => {
            handlers::list_activities(state).await
        }
        (&Method::GET | &Method::HEAD, ActivityRoute::Detail(name)) => {
            handlers::get_activity(state, name).await
        }
        (&Method::POST, ActivityRoute::Signup(name)) => {
            handlers::signup(state, name, query).await
        }
        (&Method::DELETE, ActivityRoute::Participants(name)) => {
            handlers::remove_participant(state, name, query).await
        }
        _ => http::build_405_response(route.allowed_methods()),
    }
}
