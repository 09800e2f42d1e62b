//! Command dispatch
//!
//! Runs one parsed command for a client: login commands are answered from the
//! session state, everything else is turned into a handler request.

use log::{info, warn};
use std::collections::HashMap;

use crate::auth;
use crate::client::Client;
use crate::error::handlers::handle_error;
use crate::protocol::commands::{Command, CommandResult, CommandStatus};
use crate::protocol::handlers::Handlers;
use crate::protocol::request::{Method, Request};
use crate::protocol::responses::{self, format_listing, format_response};

const RENAME_PENDING: u16 = 350;
const NO_DATA_CONNECTION: u16 = 425;

/// Dispatches a command to its handler.
pub async fn handle_command(
    client: &mut Client,
    command: &Command,
    handlers: &Handlers,
    users: &HashMap<String, String>,
) -> CommandResult {
    // RNTO must directly follow RNFR
    if !matches!(command, Command::Rnto(_)) {
        client.set_rename_from(None);
    }

    match command {
        Command::User(username) => handle_cmd_user(client, username, users),
        Command::Pass(password) => handle_cmd_pass(client, password, users),
        Command::Quit => CommandResult {
            status: CommandStatus::CloseConnection,
            message: Some(format_response(responses::GOODBYE, "Goodbye")),
        },
        Command::Noop => CommandResult::success(format_response(responses::OK, "OK")),
        _ if !client.is_logged_in() => CommandResult::failure(
            "Not logged in",
            format_response(responses::NOT_LOGGED_IN, "Not logged in"),
        ),
        Command::Rnfr(path) => {
            client.set_rename_from(Some(path.clone()));
            CommandResult::success(format_response(
                RENAME_PENDING,
                "File exists, ready for destination name",
            ))
        }
        Command::Rnto(target) => match client.take_rename_from() {
            Some(from) => {
                let request = Request::new(Method::Rename, from).with_target(target.as_str());
                handle_request(&request, handlers).await
            }
            None => CommandResult::failure(
                "RNTO without RNFR",
                format_response(responses::BAD_SEQUENCE, "RNFR required first"),
            ),
        },
        Command::MissingArgument(name) => CommandResult::failure(
            format!("{} without argument", name),
            format_response(
                responses::SYNTAX_ERROR,
                &format!("Syntax error: {} requires an argument", name),
            ),
        ),
        Command::Unknown(raw) => CommandResult::failure(
            format!("Unknown command: {}", raw),
            format_response(responses::UNKNOWN_COMMAND, "Unknown command"),
        ),
        _ => match command.to_request() {
            Some(request) => handle_request(&request, handlers).await,
            None => CommandResult::failure(
                format!("{:?} has no request form", command),
                format_response(responses::UNKNOWN_COMMAND, "Unknown command"),
            ),
        },
    }
}

/// Route a request to the capability that owns its method.
async fn handle_request(request: &Request, handlers: &Handlers) -> CommandResult {
    match request.method {
        Method::List | Method::Stat => match handlers.lister.file_info(request).await {
            Ok(entries) => CommandResult::success(format_listing(&request.filepath, &entries)),
            Err(e) => CommandResult::failure(e.to_string(), handle_error(&e)),
        },
        Method::Get => match handlers.reader.file_read(request).await {
            Ok(_) => no_data_connection(),
            Err(e) => CommandResult::failure(e.to_string(), handle_error(&e)),
        },
        Method::Put => match handlers.writer.file_write(request).await {
            Ok(_) => no_data_connection(),
            Err(e) => CommandResult::failure(e.to_string(), handle_error(&e)),
        },
        _ => match handlers.cmder.file_cmd(request).await {
            Ok(()) => CommandResult::success(format_response(
                responses::ACTION_OK,
                "Requested file action okay, completed",
            )),
            Err(e) => CommandResult::failure(e.to_string(), handle_error(&e)),
        },
    }
}

/// USER: remember the name if it is known, otherwise reset login state.
fn handle_cmd_user(
    client: &mut Client,
    username: &str,
    users: &HashMap<String, String>,
) -> CommandResult {
    match auth::validate_user(username, users) {
        Ok(()) => {
            client.set_user(Some(username.to_string()));
            CommandResult::success(format_response(
                responses::PASSWORD_REQUIRED,
                "Password required",
            ))
        }
        Err(e) => {
            warn!("Rejected USER {:?}: {}", username, e);
            client.set_user(None);
            CommandResult::failure(
                e.to_string(),
                format_response(responses::NOT_LOGGED_IN, "Invalid username"),
            )
        }
    }
}

/// PASS: only meaningful after an accepted USER.
fn handle_cmd_pass(
    client: &mut Client,
    password: &str,
    users: &HashMap<String, String>,
) -> CommandResult {
    let username = match client.username() {
        Some(username) if client.is_user_valid() => username.to_string(),
        _ => {
            return CommandResult::failure(
                "Username not provided",
                format_response(responses::BAD_SEQUENCE, "Login with USER first"),
            );
        }
    };

    match auth::validate_password(&username, password, users) {
        Ok(()) => {
            client.set_logged_in(true);
            info!("User {} logged in", username);
            CommandResult::success(format_response(
                responses::LOGIN_SUCCESS,
                "Login successful",
            ))
        }
        Err(e) => {
            warn!("Rejected PASS for {}: {}", username, e);
            client.set_logged_in(false);
            CommandResult::failure(
                e.to_string(),
                format_response(responses::NOT_LOGGED_IN, "Invalid password"),
            )
        }
    }
}

/// Content capabilities succeeded, but this protocol has no data channel to
/// carry the bytes.
fn no_data_connection() -> CommandResult {
    CommandResult::failure(
        "No data connection",
        format_response(NO_DATA_CONNECTION, "Can't open data connection"),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::DirectoryLister;
    use crate::protocol::BucketHandler;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn setup() -> (Client, Handlers, HashMap<String, String>) {
        let lister = DirectoryLister::new(Arc::new(MemoryStore::new()), "/");
        let handlers = Handlers::from_single(Arc::new(BucketHandler::new(lister)));
        let users = HashMap::from([("alice".to_string(), "alice123".to_string())]);
        (Client::default(), handlers, users)
    }

    async fn run(
        client: &mut Client,
        handlers: &Handlers,
        users: &HashMap<String, String>,
        line: &str,
    ) -> String {
        let command = crate::protocol::parse_command(line);
        handle_command(client, &command, handlers, users)
            .await
            .message
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_requires_login() {
        let (mut client, handlers, users) = setup();
        assert_eq!(run(&mut client, &handlers, &users, "LIST").await, "530 Not logged in\r\n");
        assert_eq!(run(&mut client, &handlers, &users, "NOOP").await, "200 OK\r\n");
        assert_eq!(
            run(&mut client, &handlers, &users, "PASS alice123").await,
            "503 Login with USER first\r\n"
        );
    }

    #[tokio::test]
    async fn test_rename_sequence() {
        let (mut client, handlers, users) = setup();
        run(&mut client, &handlers, &users, "USER alice").await;
        run(&mut client, &handlers, &users, "PASS alice123").await;

        assert_eq!(
            run(&mut client, &handlers, &users, "RNTO b").await,
            "503 RNFR required first\r\n"
        );
        assert!(run(&mut client, &handlers, &users, "RNFR a").await.starts_with("350 "));
        assert_eq!(
            run(&mut client, &handlers, &users, "RNTO b").await,
            "502 Command not implemented\r\n"
        );

        // Anything in between cancels the pending rename
        run(&mut client, &handlers, &users, "RNFR a").await;
        run(&mut client, &handlers, &users, "NOOP").await;
        assert!(run(&mut client, &handlers, &users, "RNTO b").await.starts_with("503 "));
    }
}
