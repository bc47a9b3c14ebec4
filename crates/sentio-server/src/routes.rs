//! Request handlers for the `/Home/...` routes.
//!
//! Every handler runs the pipeline on a blocking worker: load the dataset,
//! train, then evaluate and/or predict. When the server was started with a
//! cached session the load/train steps are skipped.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use sentio_core::SentioError;
use sentio_trainer::{render_report, train_session, SentimentPipeline, TrainedSession};
use tracing::{error, info, warn};

/// Shared application state.
pub struct AppState {
    pub pipeline: Arc<dyn SentimentPipeline>,
    /// Model trained once at startup; `None` retrains on every request.
    pub cached: Option<Arc<TrainedSession>>,
}

impl AppState {
    /// State that retrains on every request.
    pub fn new(pipeline: Arc<dyn SentimentPipeline>) -> Self {
        Self {
            pipeline,
            cached: None,
        }
    }

    /// State that trains now and shares the session with all requests.
    pub fn with_cached_session(pipeline: Arc<dyn SentimentPipeline>) -> sentio_core::Result<Self> {
        let session = train_session(pipeline.as_ref())?;
        info!(
            train_size = session.train_size,
            test_size = session.test.len(),
            "Cached trained model for all requests"
        );
        Ok(Self {
            pipeline,
            cached: Some(Arc::new(session)),
        })
    }

    fn session(&self) -> sentio_core::Result<Arc<TrainedSession>> {
        match &self.cached {
            Some(session) => Ok(Arc::clone(session)),
            None => train_session(self.pipeline.as_ref()).map(Arc::new),
        }
    }
}

/// Error response: status code plus a plain-text description.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<SentioError> for ApiError {
    fn from(err: SentioError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Pipeline request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "Rejected request");
        }
        (self.status, self.message).into_response()
    }
}

/// Run a pipeline job off the async executor.
async fn run_blocking<T, F>(state: Arc<AppState>, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> sentio_core::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || job(&state))
        .await
        .map_err(|e| ApiError::internal(format!("pipeline task failed: {e}")))?
        .map_err(ApiError::from)
}

/// `GET /Home/Index`: train, evaluate and score the canned sample.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let report = run_blocking(state, |state| {
        let session = state.session()?;
        render_report(state.pipeline.as_ref(), &session)
    })
    .await?;

    Ok(Html(render_page("Sentiment model", &report)))
}

/// `GET /Home/GetPredictionFromModel/{inputSentiment}`: one prediction line.
pub async fn prediction_handler(
    State(state): State<Arc<AppState>>,
    Path(input): Path<String>,
) -> Result<String, ApiError> {
    if input.trim().is_empty() {
        return Err(empty_input().into());
    }

    let result = run_blocking(state, move |state| {
        let session = state.session()?;
        state.pipeline.predict(&session.model, &input)
    })
    .await?;

    info!(label = result.label, probability = result.probability, "Served prediction");
    Ok(result.to_string())
}

/// `GET /Home/GetPredictionFromModel/` with nothing after the slash.
pub async fn empty_prediction_handler() -> ApiError {
    empty_input().into()
}

fn empty_input() -> SentioError {
    SentioError::InvalidInput("prediction text is empty or whitespace-only".into())
}

fn render_page(title: &str, report: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<pre>{}</pre>\n</body>\n</html>\n",
        escape_html(report),
        title = escape_html(title),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
