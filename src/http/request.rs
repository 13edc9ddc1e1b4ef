//! # Parsing de Requests HTTP/1.x
//! src/http/request.rs
//!
//! Convierte el buffer crudo leído del socket en un `Request` estructurado.
//! Las etapas se ejecutan en orden estricto y la primera que falla decide el
//! `Status` final (no hay backtracking):
//!
//! 1. Separar metadata y body en el primer `\r\n\r\n`
//! 2. Separar la metadata en líneas (`\r\n`)
//! 3. Request line: exactamente 3 tokens separados por un espacio
//! 4. Headers: exactamente 2 tokens separados por `": "`
//! 5. Método (GET/POST) y versión (HTTP/1.0, HTTP/1.1)
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /upload HTTP/1.1\r\n
//! Host: 127.0.0.1:8080\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"a":1}
//! ```

use super::Status;
use std::borrow::Cow;
use std::collections::HashMap;

/// Separador entre metadata y body
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo de la raíz
    GET,

    /// POST - Subir un documento JSON
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Versiones HTTP aceptadas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Version::Http10),
            "HTTP/1.1" => Some(Version::Http11),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request que no pasó el parsing
///
/// Si la falla fue en el método o la versión, la request line y los headers
/// ya se habían parseado y se conservan: la respuesta los necesita para
/// decidir `Connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: Status,

    /// Versión del request, si era una de las soportadas
    pub version: Option<Version>,

    /// Headers parseados (vacío si la falla fue antes de los headers)
    pub headers: HashMap<String, String>,
}

impl From<Status> for Rejection {
    fn from(status: Status) -> Self {
        Self {
            status,
            version: None,
            headers: HashMap::new(),
        }
    }
}

/// Representa un request HTTP parseado
///
/// Se construye una vez por buffer leído y no cambia después del parsing.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST)
    method: Method,

    /// Ruta tal como llegó en la request line (sin sanitizar)
    route: String,

    /// Versión HTTP
    version: Version,

    /// Headers HTTP, sensibles a mayúsculas; un nombre repetido sobrescribe al anterior
    headers: HashMap<String, String>,

    /// Body crudo (vacío si no hay)
    body: Vec<u8>,
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request sintácticamente válido con método y versión soportados
    /// * `Err(Rejection)` - Estado terminal de la primera etapa que falló
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_file_server::http::{Request, Status, Version};
    ///
    /// let raw = b"GET /index.html HTTP/1.1\r\nHost: 127.0.0.1:8080\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    /// assert_eq!(request.route(), "/index.html");
    /// assert_eq!(request.header("Host"), Some("127.0.0.1:8080"));
    ///
    /// let bad = b"DELETE / HTTP/1.0\r\nHost: 127.0.0.1:8080\r\n\r\n";
    /// let rejection = Request::parse(bad).unwrap_err();
    /// assert_eq!(rejection.status, Status::UnsupportedMethod);
    /// assert_eq!(rejection.version, Some(Version::Http10));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, Rejection> {
        // 1. Separar metadata del body
        let (metadata, body) = Self::split_head(buffer)?;

        // 2. Separar metadata en líneas
        let lines: Vec<&str> = metadata.split("\r\n").collect();
        let Some((request_line, header_lines)) = lines.split_first() else {
            log::warn!("Request malformado: la metadata no tiene líneas");
            return Err(Status::BadRequest.into());
        };

        // 3. Request line
        let (method, route, version) = Self::parse_request_line(request_line)?;

        // 4. Headers
        let headers = Self::parse_headers(header_lines)?;

        // 5. Validar método y versión
        let parsed_version = Version::from_str(version);

        let Some(method) = Method::from_str(method) else {
            log::warn!("Método HTTP no soportado: {}", method);
            return Err(Rejection {
                status: Status::UnsupportedMethod,
                version: parsed_version,
                headers,
            });
        };
        let Some(version) = parsed_version else {
            log::warn!("Versión HTTP desconocida: {}", version);
            return Err(Rejection {
                status: Status::BadRequest,
                version: None,
                headers,
            });
        };

        Ok(Request {
            method,
            route: route.to_string(),
            version,
            headers,
            body: body.to_vec(),
        })
    }

    /// Separa el buffer en el primer `\r\n\r\n`
    ///
    /// La metadata se decodifica con reemplazo (bytes no UTF-8 pasan como
    /// `U+FFFD`); el body se deja como bytes crudos.
    fn split_head(buffer: &[u8]) -> Result<(Cow<'_, str>, &[u8]), Status> {
        let Some(pos) = buffer
            .windows(HEAD_TERMINATOR.len())
            .position(|window| window == HEAD_TERMINATOR)
        else {
            log::warn!("Request malformado: no se encontró \\r\\n\\r\\n entre metadata y body");
            return Err(Status::BadRequest);
        };

        let metadata = String::from_utf8_lossy(&buffer[..pos]);

        Ok((metadata, &buffer[pos + HEAD_TERMINATOR.len()..]))
    }

    /// Parsea la request line
    ///
    /// Formato: `METHOD ROUTE VERSION`, separados por exactamente un espacio
    fn parse_request_line(line: &str) -> Result<(&str, &str, &str), Status> {
        let parts: Vec<&str> = line.split(' ').collect();

        match parts[..] {
            [method, route, version] => Ok((method, route, version)),
            _ => {
                log::warn!("Request line inválida: {:?}", line);
                Err(Status::BadRequest)
            }
        }
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato exacto `Name: Value`
    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, Status> {
        let mut headers = HashMap::new();

        for line in lines {
            let parts: Vec<&str> = line.split(": ").collect();
            match parts[..] {
                [name, value] => {
                    headers.insert(name.to_string(), value.to_string());
                }
                _ => {
                    log::warn!("Header malformado: {:?}", line);
                    return Err(Status::BadRequest);
                }
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene la ruta del request, sin sanitizar
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> Version {
        self.version
    }

    /// Obtiene un header específico (sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume el request y retorna sus headers
    pub fn into_headers(self) -> HashMap<String, String> {
        self.headers
    }
}
