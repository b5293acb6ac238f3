//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation, route matching, and dispatching.

use crate::api::{self, ActivityRoute};
use crate::config::{AppState, RoutesConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderMap, HeaderValue};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; every endpoint takes its input from the path and query.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // Only the head is needed; the body is dropped before any await point
    let (parts, _) = req.into_parts();
    let method = &parts.method;
    let uri = &parts.uri;

    let mut response = if method == Method::OPTIONS {
        http::build_options_response(state.config.http.enable_cors)
    } else if let Some(resp) = check_body_size(&parts.headers, state.config.http.max_body_size) {
        resp
    } else {
        let ctx = RequestContext {
            method,
            path: uri.path(),
            query: uri.query(),
            is_head: method == Method::HEAD,
            if_none_match: header_str(&parts.headers, "if-none-match"),
        };
        route_request(&ctx, &state).await
    };

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server_name);
    }

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::for_request(peer_addr, method, uri, parts.version);
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_str(&parts.headers, "referer").map(ToString::to_string);
        entry.user_agent = header_str(&parts.headers, "user-agent").map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let routes = &state.config.routes;
    let is_read = matches!(*ctx.method, Method::GET | Method::HEAD);

    // 1. Health check endpoints
    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return if is_read {
            http::build_health_response("ok")
        } else {
            http::build_405_response("GET, HEAD")
        };
    }

    // 2. Root redirect to the front-end
    if ctx.path == "/" {
        return if is_read {
            http::build_redirect_response(&routes.root_redirect)
        } else {
            http::build_405_response("GET, HEAD")
        };
    }

    // 3. Activity API
    if let Some(route) = ActivityRoute::parse(ctx.path) {
        return api::handle_activities(ctx.method, &route, ctx.query, state).await;
    }

    // 4. Static assets
    if is_static_path(ctx.path, routes) {
        return if is_read {
            static_files::serve_directory(
                ctx,
                &routes.static_dir,
                &routes.static_mount,
                &routes.index_files,
            )
            .await
        } else {
            http::build_405_response("GET, HEAD")
        };
    }

    http::build_404_response()
}

fn is_static_path(path: &str, routes: &RoutesConfig) -> bool {
    let mount = routes.static_mount.trim_end_matches('/');
    path.strip_prefix(mount)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
