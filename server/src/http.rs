use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::{self, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::get,
};
use platform_db::{EmployeeSource, fetch_directory};
use products_directory::DirectoryView;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use crate::{
    config::AppConfig,
    views::{self, Shell, Theme},
};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EmployeeSource>,
    pub shell: Arc<Shell>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, source: Arc<dyn EmployeeSource>) -> Self {
        let shell = Arc::new(Shell::new(config.site_title.clone(), Theme::default()));
        Self {
            source,
            shell,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let source = state.source.kind();
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, source, "directory server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(directory_page))
        .route("/api/employees", get(directory_json))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn load_directory(state: &AppState) -> DirectoryView {
    DirectoryView::from_outcome(fetch_directory(state.source.as_ref()).await)
}

#[instrument(name = "http.directory", skip_all)]
async fn directory_page(State(state): State<AppState>, uri: Uri) -> Html<String> {
    let view = load_directory(&state).await;
    Html(state.shell.render(uri.path(), &views::directory::render(&view)))
}

#[instrument(name = "http.directory_json", skip_all)]
async fn directory_json(State(state): State<AppState>) -> Json<DirectoryView> {
    Json(load_directory(&state).await)
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let body = format!(
        "<section class=\"directory\"><h1>Page not found</h1><p class=\"muted\">Nothing lives at <code>{}</code>.</p></section>",
        views::escape(uri.path())
    );
    (
        StatusCode::NOT_FOUND,
        Html(state.shell.render(uri.path(), &body)),
    )
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        source: state.source.kind(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    source: &'static str,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use platform_db::SourceError;
    use products_directory::EmployeeRecord;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::DataSourceConfig;

    enum Stub {
        Rows(Vec<EmployeeRecord>),
        Down(&'static str),
    }

    #[async_trait]
    impl EmployeeSource for Stub {
        fn kind(&self) -> &'static str {
            "stub"
        }

        async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError> {
            match self {
                Stub::Rows(rows) => Ok(rows.clone()),
                Stub::Down(message) => Err(SourceError::Service {
                    status: 503,
                    message: message.to_string(),
                }),
            }
        }
    }

    fn router(stub: Stub) -> Router {
        let config = Arc::new(AppConfig {
            data_source: DataSourceConfig::Postgres,
            site_title: "Test Directory".into(),
            cors_allowed_origins: Vec::new(),
        });
        build_router(AppState::new(config, Arc::new(stub)))
    }

    async fn send(router: Router, path: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn sam() -> EmployeeRecord {
        EmployeeRecord {
            name: Some("Sam Lee".into()),
            position: Some("Engineer".into()),
            department: Some("R&D".into()),
            email: Some("sam@x.com".into()),
            ..EmployeeRecord::with_id(1)
        }
    }

    #[tokio::test]
    async fn directory_page_renders_inside_shell() {
        let (status, body) = send(router(Stub::Rows(vec![sam()])), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Test Directory</title>"));
        assert!(body.contains("class=\"active\""));
        assert!(body.contains("1 employees"));
        assert!(body.contains("href=\"mailto:sam@x.com\""));
    }

    #[tokio::test]
    async fn fetch_failures_render_a_banner_not_an_error_status() {
        let (status, body) = send(router(Stub::Down("connection refused")), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error loading employees"));
        assert!(body.contains("connection refused"));
        assert!(body.contains("0 employees"));
    }

    #[tokio::test]
    async fn json_surface_mirrors_the_page() {
        let (status, body) = send(router(Stub::Rows(Vec::new())), "/api/employees").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(json["count"], 0);
        assert!(json["error"].is_null());
        assert_eq!(json["employees"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn unknown_paths_are_404_without_active_tab() {
        let (status, body) = send(router(Stub::Rows(Vec::new())), "/reports").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(!body.contains("class=\"active\""));
    }

    #[tokio::test]
    async fn health_reports_source_kind() {
        let (status, body) = send(router(Stub::Rows(Vec::new())), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["source"], "stub");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = router(Stub::Rows(Vec::new()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
