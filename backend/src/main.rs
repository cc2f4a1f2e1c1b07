use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::path::PathBuf;
use std::sync::Arc;

mod handlers {
    pub mod contact_handlers;
    pub mod contact_dtos;
}
mod api {
    pub mod smtp;
}
mod config {
    pub mod mail_config;
}
mod utils {
    pub mod contact_mail;
}

use handlers::contact_handlers;
use api::smtp::{SmtpTransportFactory, TransportFactory};
use config::mail_config::{MailConfig, MailConfigError};

pub type MailConfigLoader = Arc<dyn Fn() -> Result<MailConfig, MailConfigError> + Send + Sync>;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    /// Called once per relay request.
    mail_config: MailConfigLoader,
    transports: Arc<dyn TransportFactory>,
}

pub fn app(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/send-email", post(contact_handlers::send_email));

    // Built frontend, with unknown paths handed to the client-side router
    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Surface a broken mail setup at boot; requests still re-read the environment.
    if let Err(e) = MailConfig::from_env() {
        tracing::warn!("Mail relay is not configured yet: {}", e);
    }

    let state = Arc::new(AppState {
        mail_config: Arc::new(MailConfig::from_env),
        transports: Arc::new(SmtpTransportFactory),
    });

    let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);
    if let Some(dir) = &static_dir {
        tracing::info!("Serving frontend from {}", dir.display());
    }

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app(state, static_dir).into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            mail_config: Arc::new(|| Err::<MailConfig, _>(MailConfigError::Missing("MAIL_HOST"))),
            transports: Arc::new(SmtpTransportFactory),
        })
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let response = app(state(), None)
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found_without_static_dir() {
        let response = app(state(), None)
            .oneshot(Request::builder().uri("/contact").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn send_email_only_accepts_post() {
        let response = app(state(), None)
            .oneshot(Request::builder().uri("/api/send-email").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
