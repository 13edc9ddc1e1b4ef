//! # Acceso al Sistema de Archivos
//! src/files/mod.rs
//!
//! Todo lo que el parser necesita del disco:
//!
//! - `sanitize`: normalización léxica de rutas y bloqueo de `..`
//! - `read_file` / `write_file`: lectura y escritura de archivos completos
//! - `generate_id`: identificadores aleatorios para nombres de uploads
//! - `ServerRoot`: directorio raíz absoluto fijado al arrancar

pub mod io;
pub mod root;
pub mod sanitize;

pub use io::{generate_id, read_file, write_file};
pub use root::ServerRoot;
pub use sanitize::{sanitize, SanitizedPath};
