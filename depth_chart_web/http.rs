use axum::{
    Router,
    routing::{delete, get, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use depth_chart_app::app::AppBus;
use depth_chart_types::{Result, errors::ApplicationError};

use crate::handlers::{add_player, full_depth_chart, list_backups, remove_player};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
}

impl AppState {
    pub fn new(app_bus: Arc<AppBus>) -> AppState {
        AppState { app_bus }
    }
}

pub struct WebRouter {}

impl WebRouter {
    /// Depth chart routes, scoped by sport and team.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/sport/{sport}/team/{team}/depthchart/add", post(add_player))
            .route(
                "/sport/{sport}/team/{team}/depthchart/remove",
                delete(remove_player),
            )
            .route(
                "/sport/{sport}/team/{team}/depthchart/backups",
                get(list_backups),
            )
            .route(
                "/sport/{sport}/team/{team}/depthchart/full",
                get(full_depth_chart),
            )
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let router = Self::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server started, listening on http://{addr}");
        axum::serve(listener, router).await.map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
