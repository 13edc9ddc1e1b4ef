//! # Raíz del Servidor
//! src/files/root.rs
//!
//! Directorio absoluto fijado una vez al arrancar. Todas las operaciones de
//! archivos se resuelven relativas a él.

use super::SanitizedPath;
use std::path::{Path, PathBuf};

/// Subdirectorio donde se guardan los JSON recibidos por POST
pub const UPLOADS_DIR: &str = "uploads";

/// Directorio raíz absoluto del servidor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRoot {
    path: PathBuf,
}

impl ServerRoot {
    /// Resuelve `path` a una ruta absoluta
    ///
    /// No exige que el directorio exista; eso lo hace `prepare`.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        Ok(Self { path })
    }

    /// Crea la raíz y `uploads/` si no existen
    pub fn prepare(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.uploads_dir())
    }

    /// Ruta absoluta de la raíz
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directorio de uploads (`<root>/uploads`)
    pub fn uploads_dir(&self) -> PathBuf {
        self.path.join(UPLOADS_DIR)
    }

    /// Resuelve una ruta ya sanitizada dentro de la raíz
    pub fn resolve(&self, route: &SanitizedPath) -> PathBuf {
        self.path.join(route.relative())
    }
}
