//! # Lectura y Escritura de Archivos
//! src/files/io.rs
//!
//! Lecturas completas en memoria (sin streaming) y escrituras no atómicas:
//! si el proceso muere a mitad de `write_file` queda un archivo parcial.

use rand::distr::Alphanumeric;
use rand::Rng;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Lee el archivo completo
///
/// Retorna `None` si el archivo no existe, no se puede abrir o no se puede
/// leer (por ejemplo, si es un directorio).
pub fn read_file(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::debug!("No se pudo leer {}: {}", path.display(), e);
            None
        }
    }
}

/// Crea (o trunca) `path` y escribe todo `content`
pub fn write_file(content: &[u8], path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Genera un identificador aleatorio de `length` caracteres en `[0-9A-Za-z]`
///
/// Solo sirve para desambiguar nombres de uploads; no es criptográfico.
pub fn generate_id(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
