//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Implementa el protocolo HTTP/1.x desde cero, sin librerías de alto nivel:
//!
//! - Parsing de requests (`request`)
//! - Validación de política y procesamiento de GET/POST (`parser`)
//! - Construcción de responses (`response`)
//! - Estados y tipos de contenido (`status`, `content_type`)
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: 127.0.0.1:8080\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 14\r\n
//! \r\n
//! <h1>index</h1>
//! ```
//!
//! No hay chunked encoding ni pipelining: un request en vuelo por conexión.

pub mod content_type;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

pub use content_type::ContentType;
pub use parser::{HttpParser, ParseOutcome, Reply};
pub use request::{Method, Rejection, Request, Version};
pub use response::Response;
pub use status::Status;
