//! The two files the site is made of, with MIME type detection

use crate::config::ServerConfig;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Which file a request maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    /// The entry HTML document, served for `/`
    Entry,
    /// The bundled script, served for every other path
    Script,
}

impl Asset {
    pub fn resolve(path: &str) -> Asset {
        if path.is_empty() || path == "/" {
            Asset::Entry
        } else {
            Asset::Script
        }
    }

    pub fn path(&self, config: &ServerConfig) -> PathBuf {
        match self {
            Asset::Entry => config.entry_path(),
            Asset::Script => config.script_path(),
        }
    }
}

/// Result of attempting to serve a file
pub enum FileResponse {
    /// File found and served
    Found(Response<Full<Bytes>>),
    /// File not found
    NotFound(PathBuf),
    /// Error occurred
    Error(String),
}

/// Serve the file behind `asset`
pub async fn serve_asset(config: &ServerConfig, asset: Asset) -> FileResponse {
    serve_single_file(&asset.path(config)).await
}

/// Serve a single file
async fn serve_single_file(path: &Path) -> FileResponse {
    match fs::read(path).await {
        Ok(contents) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let content_type = HeaderValue::from_str(mime.as_ref())
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
            let length = HeaderValue::from(contents.len());

            let mut response = Response::new(Full::new(Bytes::from(contents)));
            response.headers_mut().insert(CONTENT_TYPE, content_type);
            response.headers_mut().insert(CONTENT_LENGTH, length);
            FileResponse::Found(response)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => FileResponse::NotFound(path.to_path_buf()),
        Err(e) => FileResponse::Error(format!("Failed to read {}: {}", path.display(), e)),
    }
}

/// Create an error response
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{code} {reason}</title></head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{message}</p>\n<hr>\n\
         <p><em>Stamina</em></p>\n</body>\n</html>",
        code = status.as_u16(),
        reason = reason,
        message = stamina_core::view::escape(message),
    );

    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (tempfile::TempDir, ServerConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("js/stamina.js"), "console.log(1);").unwrap();
        let config = ServerConfig {
            root: dir.path().to_string_lossy().to_string(),
            ..ServerConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Asset::resolve("/"), Asset::Entry);
        assert_eq!(Asset::resolve(""), Asset::Entry);
        assert_eq!(Asset::resolve("/js/stamina.js"), Asset::Script);
        assert_eq!(Asset::resolve("/anything/else"), Asset::Script);
    }

    #[tokio::test]
    async fn test_serve_entry() {
        let (_dir, config) = site();
        let FileResponse::Found(response) = serve_asset(&config, Asset::Entry).await else {
            panic!("entry document not served");
        };
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()[CONTENT_LENGTH], "13");
    }

    #[tokio::test]
    async fn test_serve_script() {
        let (_dir, config) = site();
        let FileResponse::Found(response) = serve_asset(&config, Asset::Script).await else {
            panic!("script not served");
        };
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (_dir, mut config) = site();
        config.script = "js/missing.js".to_string();
        assert!(matches!(
            serve_asset(&config, Asset::Script).await,
            FileResponse::NotFound(_)
        ));
    }

    #[test]
    fn test_error_response() {
        let response = error_response(StatusCode::NOT_FOUND, "<gone>");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }
}
