mod routes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{alerts::AlertMatcher, remediation::Remediator, Result};

pub struct AppState {
    pub matcher: AlertMatcher,
    pub remediator: Arc<dyn Remediator>,
}

pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(matcher: AlertMatcher, remediator: Arc<dyn Remediator>) -> Self {
        Self {
            state: Arc::new(AppState {
                matcher,
                remediator,
            }),
        }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/webhook", post(routes::webhook))
            .route("/metrics", get(routes::metrics))
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic))
            .with_state(self.state)
    }

    pub async fn start(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("listening on {}", addr);
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}

// The alerting sender must never see a 5xx for one of our own faults, or it
// retries the delivery indefinitely. A panic below the router is logged and
// acknowledged like any other handled case.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "request handler panicked");
    (StatusCode::OK, routes::ACK).into_response()
}
