//! Static file serving module
//!
//! Serves the front-end assets mounted under the static prefix.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve static files from a directory mounted at `mount`
pub async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &str,
    mount: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match load_from_directory(dir, ctx.path, mount, index_files).await {
        Some((content, content_type)) => {
            build_static_file_response(content, content_type, ctx.if_none_match, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from `static_dir` for request `path`, trying index files for directories
///
/// Returns `None` for missing files and for paths that resolve outside `static_dir`.
pub async fn load_from_directory(
    static_dir: &str,
    path: &str,
    mount: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let relative = path
        .strip_prefix(mount.trim_end_matches('/'))
        .unwrap_or(path)
        .trim_start_matches('/');
    let relative = urlencoding::decode(relative).ok()?;

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = static_dir_canonical.join(relative.as_ref());
    if file_path.is_dir() {
        file_path = find_index_file(&file_path, index_files)?;
    }

    // File not found is common (404), no need to log at warning level
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Build static file response with `ETag` support
fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    // Check if client has cached version
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempStatic {
        root: PathBuf,
    }

    impl TempStatic {
        fn new(name: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "activities-static-{name}-{}",
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&root);
            std::fs::create_dir_all(root.join("static/css")).unwrap();
            std::fs::write(root.join("static/index.html"), "<h1>Activities</h1>").unwrap();
            std::fs::write(root.join("static/css/styles.css"), "body {}").unwrap();
            std::fs::write(root.join("secret.txt"), "hidden").unwrap();
            Self { root }
        }

        fn dir(&self) -> String {
            self.root.join("static").to_string_lossy().into_owned()
        }
    }

    impl Drop for TempStatic {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string()]
    }

    #[tokio::test]
    async fn test_load_file() {
        let tmp = TempStatic::new("load");
        let (content, content_type) =
            load_from_directory(&tmp.dir(), "/static/index.html", "/static", &index_files())
                .await
                .unwrap();
        assert_eq!(content, b"<h1>Activities</h1>");
        assert_eq!(content_type, "text/html; charset=utf-8");

        let (_, css_type) =
            load_from_directory(&tmp.dir(), "/static/css/styles.css", "/static", &index_files())
                .await
                .unwrap();
        assert_eq!(css_type, "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn test_directory_uses_index_file() {
        let tmp = TempStatic::new("index");
        let (content, _) = load_from_directory(&tmp.dir(), "/static/", "/static", &index_files())
            .await
            .unwrap();
        assert_eq!(content, b"<h1>Activities</h1>");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let tmp = TempStatic::new("missing");
        assert!(
            load_from_directory(&tmp.dir(), "/static/app.js", "/static", &index_files())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let tmp = TempStatic::new("traversal");
        assert!(load_from_directory(
            &tmp.dir(),
            "/static/../secret.txt",
            "/static",
            &index_files()
        )
        .await
        .is_none());
        assert!(load_from_directory(
            &tmp.dir(),
            "/static/%2E%2E/secret.txt",
            "/static",
            &index_files()
        )
        .await
        .is_none());
    }

    #[test]
    fn test_etag_match_returns_304() {
        let data = b"body {}".to_vec();
        let etag = cache::generate_etag(&data);
        let response = build_static_file_response(data, "text/css", Some(&etag), false);
        assert_eq!(response.status(), hyper::StatusCode::NOT_MODIFIED);
    }
}
