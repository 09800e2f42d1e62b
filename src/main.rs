//! RAX S3 Gateway - Entry Point
//!
//! Serves a read-only, directory-style view of an S3 bucket over a line-based
//! control protocol.

use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use rax_s3_gateway::storage::S3Store;
use rax_s3_gateway::{BucketHandler, DirectoryLister, GatewayConfig, Handlers, Server};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching RAX S3 gateway...");

    let config = match GatewayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match S3Store::from_settings(&config.store) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let lister = DirectoryLister::new(store, config.store.delimiter.clone());
    let handlers = Handlers::from_single(Arc::new(BucketHandler::new(lister)));

    match Server::bind(config, handlers).await {
        Ok(server) => {
            server.start().await;
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
