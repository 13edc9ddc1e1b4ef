//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables de
//! entorno. Se construye una sola vez al arrancar y se pasa explícitamente al
//! parser, al pool y al servidor; no existe estado global.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_file_server --port 8080 --host 127.0.0.1 --workers 20 --root ./res
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 WORKERS=8 SERVER_ROOT=/srv/www ./http_file_server
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "http_file_server")]
#[command(about = "Servidor HTTP/1.x de archivos estáticos con subida de JSON")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha. También es el valor esperado del header Host
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Número de workers del pool (conexiones atendidas en paralelo)
    #[arg(short, long, default_value = "20", env = "WORKERS")]
    pub workers: usize,

    /// Directorio raíz desde el que se sirven y guardan archivos
    #[arg(short, long, default_value = "./res", env = "SERVER_ROOT")]
    pub root: PathBuf,

    /// Tamaño del buffer de lectura del socket (una lectura por request)
    #[arg(long = "buffer-size", default_value = "8192", env = "READ_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Nivel de log por defecto si RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.buffer_size == 0 {
            return Err("Buffer size must be >= 1".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra en el log un resumen de la configuración
    pub fn log_summary(&self) {
        log::info!("Configuración:");
        log::info!("   Dirección:   {}", self.address());
        log::info!("   Raíz:        {}", self.root.display());
        log::info!("   Workers:     {}", self.workers);
        log::info!("   Buffer:      {} bytes", self.buffer_size);
    }
}

impl Default for Config {
    /// Configuración por defecto (igual a los defaults del CLI)
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            workers: 20,
            root: PathBuf::from("./res"),
            buffer_size: 8192,
            log_level: "info".to_string(),
        }
    }
}
