//! Composition root
//!
//! Every component is constructed here and handed to whatever needs it.

use std::any::Any;
use std::future::IntoFuture;
use std::net::SocketAddr;

use auth::domain::repository::AuthStore;
use auth::{AuthConfig, PgRepository, admin_router, app_router, landing_router};
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use database::Database;
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use platform::config::{AppConfig, ServerConfig};
use platform::shutdown::shutdown_signal;
use storage::S3Storage;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// `server start`
pub async fn start(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database).await?;

    // Fail at startup rather than on the first presign
    if let Some(storage_config) = &config.storage {
        let storage = S3Storage::new(storage_config)?;
        tracing::info!(bucket = %storage.bucket_name(), "Object storage ready");
    }

    let repo = PgRepository::new(db.handle());
    let auth_config = AuthConfig::from_app_config(&config);
    let app = router(repo, auth_config, &config.server);

    let listener = TcpListener::bind(config.server.addr()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(());
    });
    let mut server = std::pin::pin!(server.into_future());

    tokio::select! {
        result = &mut server => result?,
        _ = drain_rx => {
            let deadline = config.server.shutdown_timeout;
            match tokio::time::timeout(deadline, &mut server).await {
                Ok(result) => result?,
                Err(_) => tracing::warn!(
                    timeout_secs = deadline.as_secs(),
                    "In-flight requests did not finish before the drain deadline"
                ),
            }
        }
    }

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Full HTTP surface
pub fn router<R>(repo: R, auth_config: AuthConfig, server: &ServerConfig) -> Router
where
    R: AuthStore,
{
    let api = Router::new()
        .nest("/admin", admin_router(repo.clone(), auth_config.clone()))
        .nest("/app", app_router(repo, auth_config))
        .nest("/landing", landing_router())
        .fallback(api_not_found)
        .method_not_allowed_fallback(api_method_not_allowed);

    Router::new()
        .nest("/api/v1", api)
        .route("/up", get(up))
        .fallback_service(ServeDir::new(&server.public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors(&server.frontend_origins))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
}

/// Liveness probe
async fn up() -> StatusCode {
    StatusCode::OK
}

async fn api_not_found() -> AppError {
    AppError::not_found("Not Found")
}

async fn api_method_not_allowed() -> AppError {
    AppError::new(ErrorKind::MethodNotAllowed, "Method Not Allowed")
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    AppError::internal("Handler panicked").into_response()
}
