//! Bounded graceful shutdown
//!
//! Once the shutdown signal has fired, open connections get
//! `server.shutdown_timeout_secs` to finish before the server future is
//! dropped.

use std::{future::IntoFuture, time::Duration};

use tokio::sync::oneshot;
use tracing::{info, warn};

/// How the server future ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The server stopped on its own, before or within the deadline
    Completed,
    /// Connections were still open when the deadline passed
    TimedOut,
}

/// Drive `server` to completion, cutting it off `deadline` after `draining` fires
///
/// A dropped `draining` sender means shutdown never started, so the server
/// runs unbounded.
///
/// # Errors
///
/// Returns the server's own error if it fails before the deadline.
pub async fn run_with_drain_deadline<S, E>(
    server: S,
    draining: oneshot::Receiver<()>,
    deadline: Duration,
) -> Result<DrainOutcome, E>
where
    S: IntoFuture<Output = Result<(), E>>,
{
    let server = server.into_future();
    tokio::pin!(server);

    tokio::select! {
        res = &mut server => return res.map(|()| DrainOutcome::Completed),
        Ok(()) = draining => {},
    }

    info!(?deadline, "Draining open connections");
    match tokio::time::timeout(deadline, server).await {
        Ok(res) => res.map(|()| DrainOutcome::Completed),
        Err(_) => {
            warn!(?deadline, "Connections still open after shutdown timeout, closing");
            Ok(DrainOutcome::TimedOut)
        },
    }
}
