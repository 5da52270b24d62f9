// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Accept loop
///
/// Each connection is handed to [`handle_connection`]. Returns once `shutdown`
/// is triggered; connections already in flight finish on their own tasks.
/// Must run inside a `tokio::task::LocalSet`.
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<ShutdownSignal>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => {
                logger::log_shutdown();
                break;
            }
        }
    }
}
