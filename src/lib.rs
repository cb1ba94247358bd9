pub mod api;
pub mod config;
pub mod middleware;
pub mod movies;
pub mod server;

use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::movies::{seed_movies, MemoryRepository, MovieRepo};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::load(config_path)?;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("Using default configuration"),
    }
    if debug_logs {
        info!("Debug logging enabled");
    }

    let repo = if config.seed {
        MemoryRepository::with_movies(seed_movies())
    } else {
        info!("Starting with an empty collection");
        MemoryRepository::new()
    };
    let movies: Arc<dyn MovieRepo> = Arc::new(repo);

    if let Some(ref appdir) = config.appdir {
        if !std::path::Path::new(appdir).is_dir() {
            warn!("Static asset directory {} does not exist", appdir);
        }
    }

    let addr: SocketAddr = config
        .listen_address()
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls_paths = config
        .tls_paths()
        .map(|(cert, key)| (cert.to_string(), key.to_string()));

    let state = server::AppState::new(config, movies);
    let app = server::build_app(state);

    if let Some((cert_path, key_path)) = tls_paths {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(ServiceExt::<Request>::into_make_service(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
