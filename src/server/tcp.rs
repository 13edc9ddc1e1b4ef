//! # Servidor TCP con Pool de Workers
//! src/server/tcp.rs
//!
//! Escucha en `host:port`, acepta conexiones y encola una tarea por conexión
//! en el `WorkerPool`. Cada tarea ejecuta el loop de `handle_connection`.
//!
//! Los errores de `accept` se registran y el loop sigue; solo los errores de
//! arranque (bind, raíz) son fatales.

use super::connection::handle_connection;
use crate::config::Config;
use crate::error::ServerResult;
use crate::files::ServerRoot;
use crate::http::HttpParser;
use crate::pool::WorkerPool;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

/// Servidor HTTP con pool de workers
pub struct Server {
    listener: TcpListener,
    parser: Arc<HttpParser>,
    pool: WorkerPool,
    buffer_size: usize,
}

impl Server {
    /// Prepara la raíz, hace bind y arranca el pool
    ///
    /// Si `config.port` es 0, el header `Host` esperado usa el puerto real
    /// asignado por el sistema.
    pub fn bind(config: &Config) -> ServerResult<Self> {
        let root = ServerRoot::new(&config.root)?;
        root.prepare()?;

        let listener = TcpListener::bind(config.address())?;
        let local_addr = listener.local_addr()?;

        let expected_host = format!("{}:{}", config.host, local_addr.port());
        let parser = HttpParser::with_host(expected_host, root);

        log::info!("Servidor escuchando en http://{}", local_addr);
        log::info!("Sirviendo archivos desde {}", parser.root().path().display());

        Ok(Self {
            listener,
            parser: Arc::new(parser),
            pool: WorkerPool::new(config.workers)?,
            buffer_size: config.buffer_size,
        })
    }

    /// Dirección real en la que escucha
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Parser compartido (host esperado y raíz)
    pub fn parser(&self) -> &HttpParser {
        &self.parser
    }

    /// Loop de accept: bloquea el thread actual indefinidamente
    pub fn run(&self) -> ServerResult<()> {
        log::info!("Pool de {} workers listo", self.pool.size());

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream)?,
                Err(e) => log::error!("Error al aceptar conexión: {}", e),
            }
        }

        Ok(())
    }

    /// Encola la conexión en el pool
    fn dispatch(&self, stream: TcpStream) -> ServerResult<()> {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let parser = Arc::clone(&self.parser);
        let buffer_size = self.buffer_size;

        log::debug!("Encolando {} ({} pendientes)", peer, self.pool.pending());

        self.pool.execute(move || {
            log::info!("Conexión desde {}", peer);
            let served = handle_connection(stream, &peer, &parser, buffer_size);
            log::info!("Conexión con {} terminada ({} respuestas)", peer, served);
        })?;

        Ok(())
    }
}
