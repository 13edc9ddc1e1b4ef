//! # HTTP File Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el accept loop.

use http_file_server::config::Config;
use http_file_server::server::Server;
use http_file_server::{ServerError, ServerResult};

fn main() {
    let config = Config::new();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    if let Err(e) = run(config) {
        log::error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> ServerResult<()> {
    config.validate().map_err(ServerError::Config)?;
    config.log_summary();

    let server = Server::bind(&config)?;
    log::info!("Presiona Ctrl+C para detener el servidor");

    server.run()
}
