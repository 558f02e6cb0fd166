//! Static file responder.
//!
//! # Responsibilities
//! - Serve the file named by the path remainder from a root directory
//! - Resolve `.` and `..` segments; refuse anything that climbs out of the
//!   root, directories and missing files (404)
//! - Only answer GET and HEAD
//!
//! # Design Decisions
//! - Content type, Last-Modified, conditional and range requests are
//!   handled by tower-http's `ServeDir`
//! - No directory indexes

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, Uri},
    response::Response,
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::http::response::SiteError;

// Everything but RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Serve `remainder` from `root`.
pub async fn serve(
    root: &Path,
    remainder: &str,
    request: Request<Body>,
) -> Result<Response, SiteError> {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return Err(SiteError::MethodNotAllowed);
    }

    let Some(normalized) = normalize_remainder(remainder) else {
        tracing::warn!(path = %remainder, "Path traversal attempt blocked");
        return Err(SiteError::NotFound(remainder.to_string()));
    };

    let (mut parts, body) = request.into_parts();
    parts.uri = Uri::builder()
        .path_and_query(format!("/{}", normalized))
        .build()
        .map_err(|_| SiteError::NotFound(remainder.to_string()))?;

    let service = ServeDir::new(root).append_index_html_on_directories(false);
    let response = match service.oneshot(Request::from_parts(parts, body)).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        return Err(SiteError::NotFound(remainder.to_string()));
    }

    Ok(response.map(Body::new))
}

/// Decode `remainder` and resolve its `.` and `..` segments.
///
/// Returns the re-encoded path relative to the root, or `None` when it
/// would leave the root or cannot name a file.
fn normalize_remainder(remainder: &str) -> Option<String> {
    let decoded = percent_decode_str(remainder).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    let encoded: Vec<String> = segments
        .iter()
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect();
    Some(encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn media_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
        std::fs::write(dir.path().join("uploads/note.txt"), "hello media").unwrap();
        std::fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        dir
    }

    #[test]
    fn test_normalize_remainder() {
        assert_eq!(normalize_remainder("uploads/note.txt").as_deref(), Some("uploads/note.txt"));
        assert_eq!(normalize_remainder("a..b/c").as_deref(), Some("a..b/c"));
        assert_eq!(normalize_remainder("./uploads//note.txt").as_deref(), Some("uploads/note.txt"));
        assert_eq!(normalize_remainder("uploads/../logo.png").as_deref(), Some("logo.png"));
        assert_eq!(normalize_remainder("menu%20card.pdf").as_deref(), Some("menu%20card.pdf"));
        assert_eq!(normalize_remainder("uploads/..").as_deref(), Some(""));
        assert_eq!(normalize_remainder("../settings.py"), None);
        assert_eq!(normalize_remainder("uploads/../../etc/passwd"), None);
        assert_eq!(normalize_remainder("%2e%2e/secret"), None);
        assert_eq!(normalize_remainder("..\\secret"), None);
        assert_eq!(normalize_remainder("x%00.txt"), None);
        assert_eq!(normalize_remainder("%ff"), None);
    }

    #[tokio::test]
    async fn test_serves_file() {
        let root = media_root();
        let response = serve(root.path(), "uploads/note.txt", get("/media/uploads/note.txt"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        assert!(response.headers().contains_key(header::LAST_MODIFIED));

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"hello media");
    }

    #[tokio::test]
    async fn test_content_type_guessed() {
        let root = media_root();
        let response = serve(root.path(), "logo.png", get("/media/logo.png")).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let root = media_root();
        let err = serve(root.path(), "nope.txt", get("/media/nope.txt")).await.unwrap_err();
        assert!(matches!(err, SiteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_directory_not_listed() {
        let root = media_root();
        for remainder in ["uploads", "uploads/", ""] {
            let err = serve(root.path(), remainder, get("/media/uploads/")).await.unwrap_err();
            assert!(matches!(err, SiteError::NotFound(_)), "{:?}", remainder);
        }
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let root = media_root();
        let err = serve(root.path(), "../outside.txt", get("/media/../outside.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dot_segments_inside_root_are_resolved() {
        let root = media_root();
        let response = serve(root.path(), "uploads/../logo.png", get("/media/uploads/../logo.png"))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let response = serve(root.path(), "./uploads/note.txt", get("/media/./uploads/note.txt"))
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"hello media");
    }

    #[tokio::test]
    async fn test_escapes_from_root_blocked() {
        let root = media_root();
        for remainder in ["uploads/../../outside.txt", "%2e%2e/secret"] {
            let err = serve(root.path(), remainder, get("/media/x")).await.unwrap_err();
            assert!(matches!(err, SiteError::NotFound(_)), "{:?}", remainder);
        }
    }

    #[tokio::test]
    async fn test_post_rejected() {
        let root = media_root();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/media/uploads/note.txt")
            .body(Body::empty())
            .unwrap();

        let err = serve(root.path(), "uploads/note.txt", request).await.unwrap_err();
        assert!(matches!(err, SiteError::MethodNotAllowed));
    }
}
