//! Background maintenance task
//!
//! Owned and started by main; runs on a fixed tick and shuts down through a
//! watch channel when the server drains. Each tick expires overdue pickups
//! and purges stale chat history.

use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::JanitorConfig;
use crate::services::{ChatService, SolicitudService};

/// Periodic maintenance worker
pub struct Janitor {
    config: JanitorConfig,
    solicitudes: SolicitudService,
    chat: ChatService,
}

/// Handle for stopping a running janitor
pub struct JanitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Janitor {
    pub fn new(db: PgPool, config: JanitorConfig) -> Self {
        Self {
            config,
            solicitudes: SolicitudService::new(db.clone()),
            chat: ChatService::new(db),
        }
    }

    /// Spawn the tick loop. The first tick fires immediately so restarts
    /// don't postpone overdue maintenance by a full interval.
    pub fn start(self) -> JanitorHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(self.config.tick_seconds));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_once().await;
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("janitor shutting down");
                            break;
                        }
                    }
                }
            }
        });

        JanitorHandle { shutdown, task }
    }

    /// One maintenance pass. Failures are logged and retried next tick,
    /// never propagated.
    pub async fn run_once(&self) {
        match self
            .solicitudes
            .expirar_vencidas(self.config.pickup_grace_days)
            .await
        {
            Ok(0) => {}
            Ok(n) => tracing::info!(expired = n, "expired unclaimed pickups"),
            Err(e) => tracing::error!(error = %e, "failed to expire pickups"),
        }

        match self
            .chat
            .purge_older_than(self.config.chat_retention_days)
            .await
        {
            Ok(0) => {}
            Ok(n) => tracing::info!(purged = n, "purged old chat messages"),
            Err(e) => tracing::error!(error = %e, "failed to purge chat history"),
        }
    }
}

impl JanitorHandle {
    /// Signal shutdown and wait for the loop to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
