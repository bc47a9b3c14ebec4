//! # Sentio Server
//!
//! HTTP surface over the sentiment pipeline. Routes keep the MVC-style
//! `/Home/...` layout: `/Home/Index` renders the training and evaluation report,
//! `/Home/GetPredictionFromModel/{text}` (and its `/Home/Privacy/{id}`
//! alias) returns a single prediction line.

pub mod config;
pub mod routes;
pub mod shutdown;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sentio_trainer::{MlPipeline, SentimentPipeline};
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::{empty_prediction_handler, index_handler, prediction_handler, AppState};

/// Build the shared [`AppState`] from the server configuration.
///
/// With `cache_model` set this trains the model before returning, so a bad
/// dataset fails startup instead of the first request.
pub fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let pipeline = Arc::new(MlPipeline::new(config.pipeline_config())) as Arc<dyn SentimentPipeline>;

    let state = if config.cache_model {
        info!("Training model once at startup");
        AppState::with_cached_session(pipeline)
            .map_err(|e| anyhow::anyhow!("Failed to train startup model: {}", e))?
    } else {
        AppState::new(pipeline)
    };

    Ok(Arc::new(state))
}

/// Build the axum [`Router`] with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/Home", get(index_handler))
        .route("/Home/Index", get(index_handler))
        .route(
            "/Home/GetPredictionFromModel/:input_sentiment",
            get(prediction_handler),
        )
        .route("/Home/GetPredictionFromModel/", get(empty_prediction_handler))
        .route("/Home/Privacy/:id", get(prediction_handler))
        .route("/Home/Privacy/", get(empty_prediction_handler))
        .with_state(state)
}
