//! Development Server for Backdrop
//!
//! Serves the demo page and the wasm-pack output from `web/` with correct
//! MIME types and caching disabled.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::Response,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::services::ServeDir;

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerConfig {
    port: u16,
    web_root: PathBuf,
}

impl ServerConfig {
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_WEB_ROOT: &'static str = "web";

    fn from_env() -> Self {
        Self::from_vars(std::env::var("PORT").ok(), std::env::var("WEB_ROOT").ok())
    }

    fn from_vars(port: Option<String>, web_root: Option<String>) -> Self {
        Self {
            port: port
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            web_root: web_root
                .filter(|root| !root.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_WEB_ROOT.to_string())
                .into(),
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let app = Router::new()
        .fallback_service(ServeDir::new(&config.web_root))
        .layer(axum::middleware::from_fn(add_headers));

    println!("╔═══════════════════════════════════════════════════╗");
    println!("║           Backdrop Development Server             ║");
    println!("╠═══════════════════════════════════════════════════╣");
    println!("║  URL:  http://localhost:{:<26}║", config.port);
    println!("║  Root: {:<43}║", config.web_root.display());
    println!("║  Press Ctrl+C to stop                             ║");
    println!("╚═══════════════════════════════════════════════════╝");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// MIME type for the assets a wasm-pack page loads
fn content_type_for(path: &str) -> Option<&'static str> {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext)?;
    match extension {
        "js" | "mjs" => Some("application/javascript; charset=utf-8"),
        "wasm" => Some("application/wasm"),
        "css" => Some("text/css; charset=utf-8"),
        "html" => Some("text/html; charset=utf-8"),
        "json" => Some("application/json; charset=utf-8"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Fix MIME types and disable caching so rebuilt packages load
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Some(content_type) = content_type_for(&path) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_vars(None, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.web_root, PathBuf::from("web"));
    }

    #[test]
    fn test_config_from_vars() {
        let config = ServerConfig::from_vars(Some("3000".into()), Some("dist".into()));
        assert_eq!(config.port, 3000);
        assert_eq!(config.web_root, PathBuf::from("dist"));
    }

    #[test]
    fn test_config_ignores_bad_values() {
        let config = ServerConfig::from_vars(Some("not-a-port".into()), Some(String::new()));
        assert_eq!(config.port, 8080);
        assert_eq!(config.web_root, PathBuf::from("web"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            content_type_for("/pkg/backdrop_web.js"),
            Some("application/javascript; charset=utf-8")
        );
        assert_eq!(
            content_type_for("/pkg/backdrop_web_bg.wasm"),
            Some("application/wasm")
        );
        assert_eq!(content_type_for("/index.html"), Some("text/html; charset=utf-8"));
        assert_eq!(content_type_for("/"), None);
        assert_eq!(content_type_for("/favicon.ico"), None);
    }
}
