//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Estados que el servidor puede devolver. La traducción a la línea de
//! estado es una función total (`match`), sin tablas auxiliares:
//!
//! - **2xx**: Éxito (200 OK, 201 Created)
//! - **4xx**: Error del cliente (400, 403, 404, 405, 415)
//! - **5xx**: Error del servidor (500)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 200 OK - Archivo servido
    Ok = 200,

    /// 201 Created - JSON recibido y guardado en uploads/
    Created = 201,

    /// 400 Bad Request - Request malformado, Host ausente o JSON inválido
    BadRequest = 400,

    /// 403 Forbidden - Host incorrecto o intento de path traversal
    Forbidden = 403,

    /// 404 Not Found - El archivo pedido no existe
    NotFound = 404,

    /// 405 Method Not Allowed - Método distinto de GET/POST
    UnsupportedMethod = 405,

    /// 415 Unsupported Media Type - POST sin `application/json`
    UnsupportedMediaType = 415,

    /// 500 Internal Server Error - Falló la escritura del upload
    InternalServerError = 500,
}

impl Status {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http_file_server::http::Status;
    /// assert_eq!(Status::Forbidden.as_u16(), 403);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::UnsupportedMethod => "Method Not Allowed",
            Status::UnsupportedMediaType => "Unsupported Media Type",
            Status::InternalServerError => "Internal Server Error",
        }
    }

    /// Página HTML mínima que reemplaza el body en estados de error
    ///
    /// Retorna `None` para los estados de éxito, cuyo body se respeta.
    pub fn error_page(&self) -> Option<&'static str> {
        match self {
            Status::Ok | Status::Created => None,
            Status::BadRequest => Some(
                "<!DOCTYPE html><html><head><title>400 Bad Request</title></head><body><h1>400 Bad Request</h1><p>Your browser sent a request that this server could not understand.</p></body></html>",
            ),
            Status::Forbidden => Some(
                "<!DOCTYPE html><html><head><title>403 Forbidden</title></head><body><h1>403 Forbidden</h1><p>You don't have permission to access this resource.</p></body></html>",
            ),
            Status::NotFound => Some(
                "<!DOCTYPE html><html><head><title>404 Not Found</title></head><body><h1>404 Not Found</h1><p>The requested resource could not be found on this server.</p></body></html>",
            ),
            Status::UnsupportedMethod => Some(
                "<!DOCTYPE html><html><head><title>405 Method Not Allowed</title></head><body><h1>405 Method Not Allowed</h1><p>The request method is not supported for this resource.</p></body></html>",
            ),
            Status::UnsupportedMediaType => Some(
                "<!DOCTYPE html><html><head><title>415 Unsupported Media Type</title></head><body><h1>415 Unsupported Media Type</h1><p>Only application/json is accepted for uploads.</p></body></html>",
            ),
            Status::InternalServerError => Some(
                "<!DOCTYPE html><html><head><title>500 Internal Server Error</title></head><body><h1>500 Internal Server Error</h1><p>The server could not store the uploaded data.</p></body></html>",
            ),
        }
    }
}

impl std::fmt::Display for Status {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
