//! Static HTTP server for the Stamina site
//!
//! Serves exactly two files from a document root: the entry HTML document
//! for `/` and the bundled script for every other path. Logging goes
//! through the same namespace-filtered logger as the core, under the
//! `Server` namespace.

pub mod config;
mod error;
pub mod service;
pub mod static_files;

pub use config::{Config, ServerConfig};
pub use error::{Error, Result};
pub use service::{handle_request, ServerState};
pub use static_files::{error_response, serve_asset, Asset, FileResponse};
