use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::client::{SessionRegistry, handle_client};
use crate::config::GatewayConfig;
use crate::protocol::Handlers;
use crate::protocol::responses::{self, format_response};

pub struct Server {
    registry: Arc<Mutex<SessionRegistry>>,
    listener: TcpListener,
    handlers: Handlers,
    config: Arc<GatewayConfig>,
}

impl Server {
    /// Bind the control listener. The handler set is shared by every session.
    pub async fn bind(config: GatewayConfig, handlers: Handlers) -> std::io::Result<Self> {
        let socket = config.server.control_socket();
        let listener = TcpListener::bind(&socket).await.inspect_err(|e| {
            error!("Failed to bind to {}: {}", socket, e);
        })?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            registry: Arc::new(Mutex::new(SessionRegistry::new(config.server.max_clients))),
            listener,
            handlers,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting RAX S3 gateway for bucket {} (max {} clients)",
            self.config.store.bucket, self.config.server.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let registry = Arc::clone(&self.registry);
                    let handlers = self.handlers.clone();
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_new_client(stream, addr, registry, handlers, config).await
                        {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Registers the client, runs its session and always unregisters it afterwards.
async fn handle_new_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    registry: Arc<Mutex<SessionRegistry>>,
    handlers: Handlers,
    config: Arc<GatewayConfig>,
) -> std::io::Result<()> {
    {
        let mut sessions = registry.lock().await;
        if !sessions.try_register(client_addr) {
            warn!("Rejecting {}: {} sessions active", client_addr, sessions.len());
            drop(sessions);
            stream
                .write_all(
                    format_response(
                        responses::SERVICE_UNAVAILABLE,
                        "Too many connections. Try again later.",
                    )
                    .as_bytes(),
                )
                .await?;
            return stream.shutdown().await;
        }
        info!(
            "Accepted client {} ({}/{} clients)",
            client_addr,
            sessions.len(),
            sessions.capacity()
        );
    }

    let result = handle_client(stream, client_addr, handlers, config).await;

    if let Some(duration) = registry.lock().await.remove(&client_addr) {
        info!(
            "Client {} disconnected after {:.1}s",
            client_addr,
            duration.as_secs_f64()
        );
    }

    result
}
