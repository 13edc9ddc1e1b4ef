//! # HTTP File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.x implementado desde cero: sirve archivos estáticos desde
//! una raíz aislada y acepta subidas de JSON por POST. Las conexiones se
//! atienden con un pool de workers de tamaño fijo.
//!
//! ## Arquitectura
//!
//! - `files`: sanitización de rutas y acceso a disco
//! - `http`: parsing, validación, procesamiento GET/POST y construcción de responses
//! - `pool`: pool de workers sobre una cola compartida
//! - `server`: accept loop y manejo de cada conexión
//! - `config`: configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_file_server::config::Config;
//! use http_file_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el accept loop");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod pool;
pub mod server;

pub use error::{ServerError, ServerResult};
