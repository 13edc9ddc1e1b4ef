//! # Sanitización de Rutas
//! src/files/sanitize.rs
//!
//! Normaliza léxicamente la ruta del request y rechaza cualquier segmento
//! `..`. Es una operación puramente de strings: no consulta el disco, así que
//! un symlink dentro de la raíz que apunte afuera NO se detecta.
//!
//! ```text
//! /                  -> /
//! /css//main.css     -> /css/main.css
//! /./img/logo.png    -> /img/logo.png
//! /../etc/passwd     -> rechazada
//! /a/../b            -> rechazada
//! ```

/// Ruta ya normalizada, siempre con `/` inicial y sin segmentos `.`, `..` o vacíos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPath(String);

impl SanitizedPath {
    /// Ruta normalizada completa (ej: "/css/main.css")
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verifica si la ruta es la raíz `/`
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Ruta relativa a la raíz del servidor (sin la `/` inicial)
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }
}

/// Normaliza `route` y la rechaza si contiene un segmento `..`
///
/// # Ejemplo
/// ```
/// use http_file_server::files::sanitize;
///
/// assert_eq!(sanitize("/img/./logo.png").unwrap().as_str(), "/img/logo.png");
/// assert!(sanitize("/../etc/passwd").is_none());
/// ```
pub fn sanitize(route: &str) -> Option<SanitizedPath> {
    let mut segments = Vec::new();

    for segment in route.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            other => segments.push(other),
        }
    }

    Some(SanitizedPath(format!("/{}", segments.join("/"))))
}
