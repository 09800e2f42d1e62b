use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::client::Client;
use crate::config::GatewayConfig;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, Handlers, handle_command, parse_command};

/// Runs one control session until the client quits or disconnects.
///
/// - Sends the greeting, then reads CRLF-terminated command lines.
/// - Never buffers more than `max_command_length` bytes of one line.
/// - Dispatches each command through `handle_command`.
/// - Login state lives only for the duration of this call.
pub async fn handle_client<S>(
    stream: S,
    client_addr: SocketAddr,
    handlers: Handlers,
    config: Arc<GatewayConfig>,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();
    let limit = config.server.max_command_length;
    let mut client = Client::default();

    write_half
        .write_all(format_response(responses::READY, &config.server.greeting).as_bytes())
        .await?;
    write_half.flush().await?;

    loop {
        line.clear();
        let read = (&mut reader)
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut line)
            .await;
        match read {
            Ok(0) => {
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(_) => {
                if line.len() > limit {
                    warn!("Command from {} exceeds {} bytes", client_addr, limit);
                    write_half
                        .write_all(
                            format_response(responses::UNKNOWN_COMMAND, "Command too long")
                                .as_bytes(),
                        )
                        .await?;
                    write_half.flush().await?;
                    if !line.ends_with(b"\n") {
                        discard_line(&mut reader).await?;
                    }
                    continue;
                }

                let command = parse_command(&String::from_utf8_lossy(&line));
                info!("Received from {}: {:?}", client_addr, &command);

                let result = handle_command(&mut client, &command, &handlers, &config.users).await;

                if let Some(msg) = result.message {
                    write_half.write_all(msg.as_bytes()).await?;
                    write_half.flush().await?;
                }

                if result.status == CommandStatus::CloseConnection {
                    info!("Client {} requested to quit", client_addr);
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                return Err(e);
            }
        }
    }

    write_half.shutdown().await
}

/// Skip the rest of the current line without buffering it.
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|b| *b == b'\n') {
            Some(idx) => {
                reader.consume(idx + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}
