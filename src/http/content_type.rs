//! # Tipos de Contenido
//! src/http/content_type.rs
//!
//! Se derivan de la extensión del archivo en GET. No se inspecciona el
//! contenido del archivo.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Html,
    Png,
    Jpg,
    Jpeg,
    Gif,
    Ico,
    Text,
    Json,
    OctetStream,
    Js,
    Css,
}

impl ContentType {
    /// Valor del header `Content-Type`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Png => "image/png",
            ContentType::Jpg => "image/jpg",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Gif => "image/gif",
            ContentType::Ico => "image/x-icon",
            ContentType::Text => "text/plain",
            ContentType::Json => "application/json",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Js => "application/javascript",
            ContentType::Css => "text/css",
        }
    }

    /// Deriva el tipo desde la extensión de `path`
    ///
    /// Extensiones desconocidas (o ausentes) caen en `OctetStream`.
    ///
    /// # Ejemplo
    /// ```
    /// use http_file_server::http::ContentType;
    /// use std::path::Path;
    ///
    /// assert_eq!(ContentType::from_path(Path::new("a/logo.png")), ContentType::Png);
    /// assert_eq!(ContentType::from_path(Path::new("a/blob")), ContentType::OctetStream);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("html") => ContentType::Html,
            Some("png") => ContentType::Png,
            Some("jpg") => ContentType::Jpg,
            Some("jpeg") => ContentType::Jpeg,
            Some("gif") => ContentType::Gif,
            Some("ico") => ContentType::Ico,
            Some("txt") => ContentType::Text,
            Some("json") => ContentType::Json,
            Some("js") => ContentType::Js,
            Some("css") => ContentType::Css,
            _ => ContentType::OctetStream,
        }
    }
}
