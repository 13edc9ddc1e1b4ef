//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. Escucha en un puerto (`tcp`)
//! 2. Acepta conexiones y las encola en el pool de workers
//! 3. Cada worker lee, parsea y responde requests (`connection`)

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::handle_connection;
pub use tcp::Server;
