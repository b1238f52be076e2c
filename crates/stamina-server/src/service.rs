//! Request handling

use crate::config::ServerConfig;
use crate::static_files::{error_response, serve_asset, Asset, FileResponse};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW};
use hyper::{Method, Request, Response, StatusCode};
use stamina_core::{LogSettings, Logger};
use std::convert::Infallible;
use std::sync::Arc;

/// Server state shared across all connections
#[derive(Debug)]
pub struct ServerState {
    config: ServerConfig,
    logger: Logger,
}

impl ServerState {
    pub fn new(config: ServerConfig, settings: LogSettings) -> Self {
        Self {
            config,
            logger: Logger::new(settings, "StaticServer", "Server"),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

/// Handle an incoming HTTP request
pub async fn handle_request<B>(
    state: Arc<ServerState>,
    req: Request<B>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if method != Method::GET && method != Method::HEAD {
        state
            .logger
            .warn(format_args!("{} {} not allowed", method, path));
        let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "Only GET is supported");
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
        return Ok(response);
    }

    let asset = Asset::resolve(&path);
    state
        .logger
        .debug(format_args!("{} {} -> {:?}", method, path, asset));

    let response = match serve_asset(&state.config, asset).await {
        FileResponse::Found(response) => response,
        FileResponse::NotFound(file) => {
            state
                .logger
                .warn(format_args!("{} is missing", file.display()));
            error_response(StatusCode::NOT_FOUND, "File not found")
        }
        FileResponse::Error(e) => {
            state.logger.error(&e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e)
        }
    };
    Ok(response)
}
