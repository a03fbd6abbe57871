// Server module entry point
// Listener setup, accept loop, per-connection serving, shutdown handling

pub mod listener;
pub mod signal;

use crate::config::{Config, ServerState};
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpStream;

/// Bind the listener and serve until interrupted
///
/// Any error before the accept loop starts (unresolvable address, occupied
/// port, missing root directory) is a fatal startup error propagated to the
/// caller. Once serving, only the interrupt signal ends the loop.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = config.resolve_root()?;
    let addr = config.socket_addr()?;
    let listener = listener::bind(addr)?;

    let state = Arc::new(ServerState::new(config, root));
    logger::log_server_start(&state);

    let shutdown = signal::shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => serve_connection(stream, Arc::clone(&state)),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                println!("\nServer stopped.");
                return Ok(());
            }
        }
    }
}

/// Serve a single connection in a spawned task
///
/// A failing or panicking connection is confined to its task; the accept
/// loop keeps running.
fn serve_connection(stream: TcpStream, state: Arc<ServerState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
