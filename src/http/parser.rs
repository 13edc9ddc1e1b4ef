//! # Validación y Procesamiento de Requests
//! src/http/parser.rs
//!
//! Toma el buffer crudo, lo parsea (`Request::parse`), aplica la política del
//! servidor y ejecuta el verbo:
//!
//! - **Host**: debe existir (400) y ser exactamente `<address>:<port>` (403).
//!   Cualquier otro nombre, aunque sea válido, se rechaza.
//! - **GET**: sirve un archivo de la raíz (`/` -> `index.html`).
//! - **POST**: valida JSON y lo guarda en `uploads/`.
//!
//! El único efecto secundario es la escritura del archivo en un POST exitoso.

use super::{ContentType, Method, Rejection, Request, Response, Status, Version};
use crate::config::Config;
use crate::files::root::UPLOADS_DIR;
use crate::files::{self, ServerRoot};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Longitud del sufijo aleatorio de los nombres de upload
const UPLOAD_ID_LENGTH: usize = 10;

/// Único `Content-Type` aceptado en POST
const JSON_MEDIA_TYPE: &str = "application/json";

/// Resultado de procesar un buffer
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// El request se parseó; `reply` lleva el estado (de éxito o del primer
    /// fallo de validación/procesamiento) y el contenido calculado
    Parsed { request: Request, reply: Reply },

    /// Falló la sintaxis, el método o la versión. Lleva la versión y los
    /// headers que se alcanzaron a parsear
    Rejected(Rejection),
}

/// Lo que el procesamiento calculó para la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: Status,
    pub body: Vec<u8>,
    pub content_type: ContentType,
    pub requested_filename: Option<String>,
}

impl Reply {
    /// Respuesta sin contenido (los errores se rellenan al construirla)
    fn status(status: Status) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_type: ContentType::Text,
            requested_filename: None,
        }
    }
}

impl ParseOutcome {
    /// Estado final que llevará la respuesta
    pub fn status(&self) -> Status {
        match self {
            ParseOutcome::Parsed { reply, .. } => reply.status,
            ParseOutcome::Rejected(rejection) => rejection.status,
        }
    }

    /// Convierte el resultado en una `Response` lista para construir
    ///
    /// Un request rechazado se responde en su propia versión (HTTP/1.1 si no
    /// era una soportada) y con sus headers, así `Connection` sigue la misma
    /// política que en un request aceptado.
    pub fn into_response(self) -> Response {
        match self {
            ParseOutcome::Parsed { request, reply } => Response::new(request.version(), reply.status)
                .with_body(reply.body)
                .with_content_type(reply.content_type)
                .with_requested_filename(reply.requested_filename)
                .with_request_headers(request.into_headers()),
            ParseOutcome::Rejected(rejection) => {
                Response::new(rejection.version.unwrap_or(Version::Http11), rejection.status)
                    .with_request_headers(rejection.headers)
            }
        }
    }
}

/// Confirmación JSON de un upload
#[derive(Debug, Serialize)]
struct UploadAck<'a> {
    status: &'a str,
    message: &'a str,
    filepath: String,
}

/// Parser con la política del servidor (host esperado y raíz)
///
/// Se crea una vez y se comparte (`Arc`) entre todos los workers.
#[derive(Debug, Clone)]
pub struct HttpParser {
    root: ServerRoot,
    expected_host: String,
}

impl HttpParser {
    /// Crea un parser que acepta solo `Host: <config.host>:<config.port>`
    pub fn new(config: &Config, root: ServerRoot) -> Self {
        Self::with_host(config.address(), root)
    }

    /// Crea un parser con un valor de `Host` explícito
    pub fn with_host(expected_host: impl Into<String>, root: ServerRoot) -> Self {
        Self {
            root,
            expected_host: expected_host.into(),
        }
    }

    pub fn expected_host(&self) -> &str {
        &self.expected_host
    }

    pub fn root(&self) -> &ServerRoot {
        &self.root
    }

    /// Parsea, valida y procesa un buffer completo
    pub fn parse(&self, buffer: &[u8]) -> ParseOutcome {
        let request = match Request::parse(buffer) {
            Ok(request) => request,
            Err(rejection) => return ParseOutcome::Rejected(rejection),
        };

        let reply = match self.validate_host(&request) {
            Err(status) => Reply::status(status),
            Ok(()) => match request.method() {
                Method::GET => self.process_get(&request),
                Method::POST => self.process_post(&request),
            },
        };

        log::debug!("{} {} -> {}", request.method().as_str(), request.route(), reply.status);

        ParseOutcome::Parsed { request, reply }
    }

    /// Verifica el header `Host`
    fn validate_host(&self, request: &Request) -> Result<(), Status> {
        let Some(host) = request.header("Host") else {
            log::warn!("Header Host no encontrado");
            return Err(Status::BadRequest);
        };

        if host != self.expected_host {
            log::warn!("Host incorrecto. Recibido: {} Esperado: {}", host, self.expected_host);
            return Err(Status::Forbidden);
        }

        Ok(())
    }

    /// GET: servir un archivo dentro de la raíz
    fn process_get(&self, request: &Request) -> Reply {
        let Some(route) = files::sanitize(request.route()) else {
            log::warn!("Intento de path traversal bloqueado: {}", request.route());
            return Reply::status(Status::Forbidden);
        };

        let (path, content_type) = if route.is_root() {
            (self.root.path().join("index.html"), ContentType::Html)
        } else {
            let path = self.root.resolve(&route);
            let content_type = ContentType::from_path(&path);
            (path, content_type)
        };

        let Some(body) = files::read_file(&path) else {
            log::warn!("Archivo no encontrado: {}", path.display());
            return Reply::status(Status::NotFound);
        };

        let requested_filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);

        Reply {
            status: Status::Ok,
            body,
            content_type,
            requested_filename,
        }
    }

    /// POST: validar JSON y guardarlo en `uploads/`
    fn process_post(&self, request: &Request) -> Reply {
        let Some(content_type) = request.header("Content-Type") else {
            log::warn!("POST sin header Content-Type");
            return Reply::status(Status::BadRequest);
        };

        if content_type != JSON_MEDIA_TYPE {
            log::warn!("POST con Content-Type no soportado: {}", content_type);
            return Reply::status(Status::UnsupportedMediaType);
        }

        if let Err(e) = serde_json::from_slice::<serde_json::Value>(request.body()) {
            log::warn!("POST con JSON inválido: {}", e);
            return Reply::status(Status::BadRequest);
        }

        let filename = upload_filename();
        let path = self.root.uploads_dir().join(&filename);

        if let Err(e) = files::write_file(request.body(), &path) {
            log::error!("No se pudo escribir {}: {}", path.display(), e);
            return Reply::status(Status::InternalServerError);
        }

        log::info!("Upload guardado en {}", path.display());

        Reply {
            status: Status::Created,
            body: upload_ack(&filename),
            content_type: ContentType::Json,
            requested_filename: None,
        }
    }
}

/// Nombre único para un upload: `upload_<unix_ts>_<id>.json`
fn upload_filename() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    format!("upload_{}_{}.json", timestamp, files::generate_id(UPLOAD_ID_LENGTH))
}

/// Body JSON de confirmación con la ruta relativa del archivo guardado
fn upload_ack(filename: &str) -> Vec<u8> {
    let ack = UploadAck {
        status: "success",
        message: "File created successfully",
        filepath: format!("{}/{}", UPLOADS_DIR, filename),
    };

    serde_json::to_vec(&ack).unwrap_or_default()
}
