//! Server construction and middleware wiring.

mod config;
mod shutdown;
mod state_builders;

pub use config::ServerConfig;

use state_builders::Backend;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use course_enrollment::Trace;
#[cfg(debug_assertions)]
use course_enrollment::doc::ApiDoc;
use course_enrollment::inbound::http::configure_api;
use course_enrollment::inbound::http::health::{HealthState, live, ready};
use course_enrollment::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Seeds the default catalogue first when requested, then binds the socket
/// and marks the service ready. SIGINT and SIGTERM fail the liveness probe
/// before the server stops.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding, binding the socket or starting
/// the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let backend = Backend::from_config(&config);
    if matches!(backend, Backend::Memory(_)) {
        info!("no database configured; using the in-memory store");
    }
    if config.seed_catalogue {
        let report = backend.seed().await?;
        info!(
            courses_created = report.courses_created,
            courses_updated = report.courses_updated,
            accounts_created = report.accounts_created,
            "startup seeding finished"
        );
    }

    let http_state = web::Data::new(backend.http_state());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr)?
    .run();
    actix_web::rt::spawn(shutdown::drain_on_signal(
        health_state.clone(),
        server.handle(),
    ));

    info!(addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
