//! Graceful shutdown: fail liveness first, then let in-flight requests finish.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use course_enrollment::inbound::http::health::HealthState;

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Mark the process as draining and stop the server gracefully.
pub(super) async fn drain(health_state: &HealthState, handle: &ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Wait for SIGINT or SIGTERM, then [`drain`].
pub(super) async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    if let Err(error) = shutdown_signal().await {
        warn!(%error, "cannot listen for shutdown signals; stopping now");
    } else {
        info!("shutdown requested; draining");
    }
    drain(&health_state, &handle).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpServer};
    use course_enrollment::inbound::http::health::live;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let app_health = health.clone();
        let server = HttpServer::new(move || App::new().app_data(app_health.clone()).service(live))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        assert!(health.is_alive());

        drain(&health, &handle).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
