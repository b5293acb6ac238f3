// Activity API handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{missing_parameter, store_error_response};
use super::types::MessageResponse;
use crate::config::AppState;
use crate::http;

/// `GET /activities`
pub async fn list_activities(state: &AppState) -> Response<Full<Bytes>> {
    let activities = state.store.list().await;
    http::build_json_response(StatusCode::OK, &activities)
}

/// `GET /activities/{activity}`
pub async fn get_activity(state: &AppState, name: &str) -> Response<Full<Bytes>> {
    match state.store.get(name).await {
        Ok(activity) => http::build_json_response(StatusCode::OK, &activity),
        Err(e) => store_error_response(&e),
    }
}

/// `POST /activities/{activity}/signup?email=...`
pub async fn signup(state: &AppState, name: &str, query: Option<&str>) -> Response<Full<Bytes>> {
    let Some(email) = query_param(query, "email") else {
        return missing_parameter("email");
    };

    match state.store.add_participant(name, &email).await {
        Ok(()) => {
            tracing::info!(activity = name, email = %email, "participant signed up");
            http::build_json_response(StatusCode::OK, &MessageResponse::signed_up(&email, name))
        }
        Err(e) => {
            tracing::debug!(activity = name, email = %email, "sign-up rejected: {e}");
            store_error_response(&e)
        }
    }
}

/// `DELETE /activities/{activity}/participants?email=...`
pub async fn remove_participant(
    state: &AppState,
    name: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let Some(email) = query_param(query, "email") else {
        return missing_parameter("email");
    };

    match state.store.remove_participant(name, &email).await {
        Ok(()) => {
            tracing::info!(activity = name, email = %email, "participant removed");
            http::build_json_response(StatusCode::OK, &MessageResponse::removed(&email, name))
        }
        Err(e) => {
            tracing::debug!(activity = name, email = %email, "removal rejected: {e}");
            store_error_response(&e)
        }
    }
}

/// First value of `key` in a URL-encoded query string
fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_decodes_value() {
        assert_eq!(
            query_param(Some("email=new%40student.edu"), "email").as_deref(),
            Some("new@student.edu")
        );
        assert_eq!(
            query_param(Some("x=1&email=a%2Bb@x.edu"), "email").as_deref(),
            Some("a+b@x.edu")
        );
    }

    #[test]
    fn test_query_param_missing() {
        assert_eq!(query_param(None, "email"), None);
        assert_eq!(query_param(Some("mail=a@b.c"), "email"), None);
    }

    #[test]
    fn test_query_param_present_but_empty() {
        assert_eq!(query_param(Some("email="), "email").as_deref(), Some(""));
    }
}
