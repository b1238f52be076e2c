//! Stamina static server
//!
//! Usage: `stamina-server [config.ron]` (defaults to `config/server.ron`;
//! built-in defaults apply when that file does not exist).

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use stamina_core::{install_console, LogSettings, Logger};
use stamina_server::{handle_request, Config, ServerState};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/server.ron".to_string());
    let config = Config::load_or_default(&config_path)?;

    install_console();
    let settings = LogSettings::new(config.log.clone());
    let logger = Logger::new(settings.clone(), "Main", "Server");
    logger.info(format_args!("Configuration: {}", config_path));

    let addr = config.server.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let state = Arc::new(ServerState::new(config.server.clone(), settings));

    logger.info(format_args!("Server is now running on http://{}", addr));

    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                logger.error(format_args!("Accept error: {}", e));
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn({
                let state = state.clone();
                move |req| handle_request(state.clone(), req)
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                state
                    .logger()
                    .error(format_args!("Connection error from {}: {}", remote_addr, e));
            }
        });
    }
}
