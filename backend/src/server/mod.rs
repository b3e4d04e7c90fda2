//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;
use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use survey_backend::Trace;
#[cfg(debug_assertions)]
use survey_backend::doc::ApiDoc;
use survey_backend::inbound::http::configure_api;
use survey_backend::inbound::http::health::{HealthState, live, ready};
use survey_backend::inbound::http::state::HttpState;
use survey_backend::outbound::persistence::{XlsxSurveyStore, YamlCredentialStore};
use survey_backend::outbound::spreadsheet::XlsxSurveyExporter;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the file-backed stores.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        users_file,
        survey_file,
    } = config;

    info!(
        users_file = %users_file.display(),
        survey_file = %survey_file.display(),
        "using file-backed stores"
    );
    let http_state = web::Data::new(HttpState::new(
        Arc::new(YamlCredentialStore::new(users_file)),
        Arc::new(XlsxSurveyStore::new(survey_file)),
        Arc::new(XlsxSurveyExporter),
    ));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "server listening");
    Ok(server)
}

/// Wait for `shutdown`, then fail liveness and stop the server gracefully.
pub async fn drain_on<F>(shutdown: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = shutdown.await {
        warn!(error = %e, "shutdown signal listener failed");
        return;
    }
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

#[cfg(test)]
mod tests;
