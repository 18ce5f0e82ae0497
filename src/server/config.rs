use std::sync::Arc;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::server::{
    handlers::issues::{create_issue, delete_issue, list_issues, update_issue},
    services::issue_store::IssueStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IssueStore>,
}

pub fn configure_app(store: Arc<dyn IssueStore>) -> Router {
    app_router(AppState { store })
}

async fn log_request(request: Request, next: Next) -> Result<Response, StatusCode> {
    info!("{} {}", request.method(), request.uri().path());
    Ok(next.run(request).await)
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/issues/{project}",
            get(list_issues)
                .post(create_issue)
                .put(update_issue)
                .delete(delete_issue),
        )
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
