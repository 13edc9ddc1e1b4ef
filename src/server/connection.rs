//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Loop por conexión: leer, parsear, construir respuesta, escribir, repetir.
//!
//! Limitación conocida: se hace UNA lectura por request, sin acumular. Se
//! asume que el request completo llega en una sola llamada a `read`; un
//! request partido en varios segmentos TCP se parsea incompleto (y
//! normalmente termina en 400). Tampoco hay timeout de lectura: un cliente
//! que nunca envía nada retiene a su worker.

use crate::http::HttpParser;
use std::io::{Read, Write};

/// Atiende requests secuenciales sobre `stream` hasta que la conexión termina
///
/// La conexión termina cuando:
/// - el cliente cierra (la lectura devuelve 0 bytes),
/// - falla una lectura o una escritura,
/// - la respuesta enviada lleva `Connection: close`.
///
/// Retorna el número de respuestas escritas.
pub fn handle_connection<S: Read + Write>(
    mut stream: S,
    peer: &str,
    parser: &HttpParser,
    buffer_size: usize,
) -> usize {
    let mut buffer = vec![0u8; buffer_size];
    let mut served = 0;

    loop {
        let bytes_read = match stream.read(&mut buffer) {
            Ok(0) => {
                log::debug!("{} cerró la conexión", peer);
                break;
            }
            Ok(n) => n,
            Err(e) => {
                log::warn!("Error leyendo de {}: {}", peer, e);
                break;
            }
        };

        log::debug!("{} bytes recibidos de {}", bytes_read, peer);

        let outcome = parser.parse(&buffer[..bytes_read]);
        let mut response = outcome.into_response();
        let bytes = response.build();

        if let Err(e) = stream.write_all(&bytes).and_then(|()| stream.flush()) {
            log::info!("Cliente {} cerró la conexión ({})", peer, e);
            break;
        }

        served += 1;
        log::info!("{} <- {}", peer, response.status());

        if !response.keep_alive() {
            break;
        }
    }

    served
}
