//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Recibe el resultado del parser (versión, estado, body, tipo de contenido,
//! headers del cliente y nombre de archivo opcional) y lo serializa a bytes.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: keep-alive\r\n
//! Content-Length: 13\r\n
//! Content-Type: text/html\r\n
//! Date: Sun, 06 Nov 1994 08:49:37 GMT\r\n
//! Server: http_file_server/0.1.0\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! Los headers se emiten ordenados por nombre (`BTreeMap`).
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_file_server::http::{ContentType, Response, Status, Version};
//!
//! let mut response = Response::new(Version::Http11, Status::Ok)
//!     .with_content_type(ContentType::Text)
//!     .with_body(b"Hello".to_vec());
//!
//! let bytes = response.build();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::{ContentType, Status, Version};
use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

/// Valor fijo del header `Server`
pub const SERVER_NAME: &str = concat!("http_file_server/", env!("CARGO_PKG_VERSION"));

/// Una respuesta HTTP en construcción
///
/// Pertenece a una sola conexión y vive lo que dura un request.
#[derive(Debug, Clone)]
pub struct Response {
    version: Version,
    status: Status,
    body: Vec<u8>,
    content_type: ContentType,

    /// Headers que envió el cliente (solo se consulta `Connection`)
    request_headers: HashMap<String, String>,

    /// Nombre del archivo pedido, para `Content-Disposition`
    requested_filename: Option<String>,

    /// Headers de la respuesta, llenados por `finalize`
    headers: BTreeMap<String, String>,
}

impl Response {
    /// Crea una respuesta vacía (`text/plain`, sin body)
    pub fn new(version: Version, status: Status) -> Self {
        Self {
            version,
            status,
            body: Vec::new(),
            content_type: ContentType::Text,
            request_headers: HashMap::new(),
            requested_filename: None,
            headers: BTreeMap::new(),
        }
    }

    /// Establece el body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Headers del request, usados para decidir `Connection`
    pub fn with_request_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.request_headers = headers;
        self
    }

    pub fn with_requested_filename(mut self, filename: Option<String>) -> Self {
        self.requested_filename = filename;
        self
    }

    /// Sintetiza los headers y serializa la respuesta con la hora actual
    pub fn build(&mut self) -> Vec<u8> {
        self.build_at(SystemTime::now())
    }

    /// Igual que `build`, pero con el instante usado en el header `Date`
    pub fn build_at(&mut self, now: SystemTime) -> Vec<u8> {
        self.finalize(now);
        self.to_bytes()
    }

    /// Aplica las reglas de body de error y calcula todos los headers
    ///
    /// Puede llamarse varias veces: siempre produce el mismo resultado para
    /// las mismas entradas.
    pub fn finalize(&mut self, now: SystemTime) {
        // Los estados de error siempre llevan una página HTML legible
        if let Some(page) = self.status.error_page() {
            self.body = page.as_bytes().to_vec();
            self.content_type = ContentType::Html;
        }

        self.headers.clear();
        self.headers.insert("Content-Type".to_string(), self.content_type.as_str().to_string());
        self.headers.insert("Content-Length".to_string(), self.body.len().to_string());
        self.headers.insert(
            "Connection".to_string(),
            connection_policy(self.version, &self.request_headers).to_string(),
        );
        self.headers.insert("Server".to_string(), SERVER_NAME.to_string());
        self.headers.insert("Date".to_string(), httpdate::fmt_http_date(now));

        if self.content_type == ContentType::OctetStream {
            if let Some(filename) = &self.requested_filename {
                self.headers.insert(
                    "Content-Disposition".to_string(),
                    format!("attachment; filename={}", filename),
                );
            }
        }
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: sin re-codificar
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(256 + self.body.len());

        result.extend_from_slice(format!("{} {}\r\n", self.version, self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> Status {
        self.status
    }

    /// Obtiene un header calculado
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Verifica si la conexión debe seguir abierta después de esta respuesta
    pub fn keep_alive(&self) -> bool {
        connection_policy(self.version, &self.request_headers) == "keep-alive"
    }
}

/// Decide el valor del header `Connection`
///
/// Por defecto `keep-alive` en HTTP/1.1 y `close` en HTTP/1.0. Si el cliente
/// manda `Connection`, manda él: solo el valor literal `keep-alive` mantiene
/// la conexión.
pub fn connection_policy(version: Version, request_headers: &HashMap<String, String>) -> &'static str {
    match request_headers.get("Connection") {
        Some(value) if value == "keep-alive" => "keep-alive",
        Some(_) => "close",
        None => match version {
            Version::Http11 => "keep-alive",
            Version::Http10 => "close",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// Sun, 06 Nov 1994 08:49:37 GMT
    fn fixed_time() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn test_build_ok_exact_bytes() {
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::Html)
            .with_body(b"<h1>hi</h1>".to_vec());

        let text = String::from_utf8(response.build_at(fixed_time())).unwrap();
        let expected = format!(
            "HTTP/1.1 200 OK\r\n\
             Connection: keep-alive\r\n\
             Content-Length: 11\r\n\
             Content-Type: text/html\r\n\
             Date: Sun, 06 Nov 1994 08:49:37 GMT\r\n\
             Server: {}\r\n\
             \r\n\
             <h1>hi</h1>",
            SERVER_NAME
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_content_length_matches_body() {
        let body = vec![0u8; 1234];
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::Png)
            .with_body(body);

        let first = response.build_at(fixed_time());
        assert_eq!(response.header("Content-Length"), Some("1234"));
        let mut tail = b"\r\n\r\n".to_vec();
        tail.extend_from_slice(&[0u8; 1234]);
        assert!(first.ends_with(&tail));

        // Construir otra vez produce lo mismo
        let second = response.build_at(fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_status_overrides_body() {
        for status in [Status::Forbidden, Status::NotFound, Status::BadRequest, Status::UnsupportedMethod] {
            let mut response = Response::new(Version::Http11, status)
                .with_content_type(ContentType::Png)
                .with_body(b"partial".to_vec());

            let bytes = response.build_at(fixed_time());
            let page = status.error_page().unwrap();

            assert_eq!(response.header("Content-Type"), Some("text/html"));
            assert!(bytes.ends_with(page.as_bytes()));
            assert_eq!(
                response.header("Content-Length"),
                Some(page.len().to_string().as_str())
            );
        }
    }

    #[test]
    fn test_created_keeps_json_body() {
        let mut response = Response::new(Version::Http11, Status::Created)
            .with_content_type(ContentType::Json)
            .with_body(br#"{"status":"success"}"#.to_vec());

        let text = String::from_utf8(response.build_at(fixed_time())).unwrap();
        assert!(text.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"status\":\"success\"}"));
    }

    #[test]
    fn test_connection_defaults() {
        assert_eq!(connection_policy(Version::Http11, &HashMap::new()), "keep-alive");
        assert_eq!(connection_policy(Version::Http10, &HashMap::new()), "close");
    }

    #[test]
    fn test_connection_header_overrides_default() {
        assert_eq!(connection_policy(Version::Http10, &headers(&[("Connection", "keep-alive")])), "keep-alive");
        assert_eq!(connection_policy(Version::Http11, &headers(&[("Connection", "close")])), "close");
        assert_eq!(connection_policy(Version::Http11, &headers(&[("Connection", "Keep-Alive")])), "close");
        assert_eq!(connection_policy(Version::Http11, &headers(&[("Connection", "upgrade")])), "close");
    }

    #[test]
    fn test_keep_alive_follows_policy() {
        let response = Response::new(Version::Http10, Status::Ok);
        assert!(!response.keep_alive());

        let response = Response::new(Version::Http11, Status::Ok)
            .with_request_headers(headers(&[("Connection", "close")]));
        assert!(!response.keep_alive());
    }

    #[test]
    fn test_content_disposition_for_octet_stream() {
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::OctetStream)
            .with_requested_filename(Some("archive.tar.gz".to_string()))
            .with_body(vec![1, 2, 3]);

        response.build_at(fixed_time());
        assert_eq!(
            response.header("Content-Disposition"),
            Some("attachment; filename=archive.tar.gz")
        );
    }

    #[test]
    fn test_no_content_disposition_otherwise() {
        // Tipo conocido con nombre de archivo
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::Css)
            .with_requested_filename(Some("main.css".to_string()));
        response.build_at(fixed_time());
        assert_eq!(response.header("Content-Disposition"), None);

        // Binario sin nombre de archivo
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::OctetStream);
        response.build_at(fixed_time());
        assert_eq!(response.header("Content-Disposition"), None);
    }

    #[test]
    fn test_standard_headers_always_present() {
        let mut response = Response::new(Version::Http10, Status::NotFound);
        response.build();

        for name in ["Content-Type", "Content-Length", "Connection", "Server", "Date"] {
            assert!(response.header(name).is_some(), "missing {}", name);
        }
        assert_eq!(response.header("Connection"), Some("close"));
        assert!(httpdate::parse_http_date(response.header("Date").unwrap()).is_ok());
    }

    #[test]
    fn test_binary_body_is_appended_verbatim() {
        let body = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];
        let mut response = Response::new(Version::Http11, Status::Ok)
            .with_content_type(ContentType::Png)
            .with_body(body.clone());

        let bytes = response.build_at(fixed_time());
        assert!(bytes.ends_with(&body));
    }
}
