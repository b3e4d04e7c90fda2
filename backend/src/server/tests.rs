//! Tests for server wiring and readiness signalling.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn config(dir: &TempDir) -> ServerConfig {
    let bind_addr = "127.0.0.1:0".parse().expect("valid socket address");
    ServerConfig::new(Key::generate(), false, SameSite::Lax, bind_addr).with_store_paths(
        dir.path().join("users.yaml"),
        dir.path().join("survey_data.xlsx"),
    )
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, dir: TempDir) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config(&dir)).expect("server binds");

    assert!(health_state.is_ready(), "state should be ready after bind");
}

#[rstest]
#[actix_web::test]
async fn shutdown_fails_liveness_and_stops_server(
    health_state: web::Data<HealthState>,
    dir: TempDir,
) {
    let server = create_server(health_state.clone(), config(&dir)).expect("server binds");
    let handle = server.handle();
    let running = actix_web::rt::spawn(server);

    drain_on(async { Ok(()) }, health_state.clone(), handle).await;

    assert!(!health_state.is_alive(), "liveness should fail once draining");
    running
        .await
        .expect("server task joins")
        .expect("server stops cleanly");
}

#[rstest]
#[actix_web::test]
async fn failed_signal_listener_leaves_server_alive(health_state: web::Data<HealthState>) {
    let server = HttpServer::new(|| App::new())
        .bind("127.0.0.1:0")
        .expect("server binds")
        .run();

    drain_on(
        async { Err(std::io::Error::other("no signal support")) },
        health_state.clone(),
        server.handle(),
    )
    .await;

    assert!(health_state.is_alive());
}

#[rstest]
#[actix_web::test]
async fn app_serves_probes_and_api(health_state: web::Data<HealthState>, dir: TempDir) {
    health_state.mark_ready();
    let http_state = web::Data::new(HttpState::new(
        Arc::new(YamlCredentialStore::new(dir.path().join("users.yaml"))),
        Arc::new(XlsxSurveyStore::new(dir.path().join("survey_data.xlsx"))),
        Arc::new(XlsxSurveyExporter),
    ));
    let app = test::init_service(build_app(AppDependencies {
        health_state,
        http_state,
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }))
    .await;

    let ready_res = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
        .await;
    assert_eq!(ready_res.status(), StatusCode::OK);

    let menu = test::call_service(&app, test::TestRequest::get().uri("/api/v1/menu").to_request())
        .await;
    assert_eq!(menu.status(), StatusCode::OK);
    assert!(menu.headers().contains_key("trace-id"));
}
