//! Serves a freshly drawn Lissajous animation for each `GET /`.
//!
//! The query parameters `color` and `cycles` are optional; when absent the
//! config's defaults apply. Bad values get `400 Bad Request` and a plain-text
//! explanation instead of an image.
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rand::rngs::StdRng;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use crate::lissajous::{self, LissajousConfig, LissajousError};

/// State shared by all requests
pub struct AppState {
    /// Fixed drawing parameters
    pub config: LissajousConfig,
    /// Source of the random frequencies
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// Wraps `config` and `rng` for sharing between requests
    #[must_use]
    pub fn new(config: LissajousConfig, rng: StdRng) -> Arc<Self> {
        Arc::new(AppState { config, rng: Mutex::new(rng) })
    }
}

/// Query parameters of `GET /`. They are taken as strings so that we, not the
/// extractor, word the complaint about a malformed number.
#[derive(Debug, Default, Deserialize)]
pub struct GifQuery {
    color: Option<String>,
    cycles: Option<String>,
}

/// Why a request produced no image
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// A query parameter isn't a number
    #[error("{name} must be a number, not {value:?}")]
    NotANumber {
        /// The parameter
        name: &'static str,
        /// What was sent
        value: String,
    },
    /// The numbers are out of range
    #[error(transparent)]
    Invalid(#[from] LissajousError),
    /// The drawing task died
    #[error("drawing failed")]
    Internal,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RequestError::NotANumber { .. } => StatusCode::BAD_REQUEST,
            RequestError::Invalid(LissajousError::Encoding(_) | LissajousError::InvalidConfig(_))
            | RequestError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            RequestError::Invalid(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(%status, error = %self, "rejected request");
        (status, self.to_string()).into_response()
    }
}

impl GifQuery {
    /// The color and cycles to draw with, defaults filled in from `config`
    pub fn resolve(&self, config: &LissajousConfig) -> Result<(u8, f64), RequestError> {
        let color = match parse::<i64>("color", self.color.as_deref())? {
            None => config.color,
            Some(index) => u8::try_from(index).map_err(|_| LissajousError::UnknownColor {
                index,
                palette_len: config.palette.len(),
            })?,
        };
        let cycles = parse("cycles", self.cycles.as_deref())?.unwrap_or(config.cycles);
        config.validate(color, cycles)?;
        Ok((color, cycles))
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, RequestError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let not_a_number = || RequestError::NotANumber { name, value: v.to_string() };
            v.trim().parse().map(Some).map_err(|_| not_a_number())
        }
    }
}

/// The application's routes
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(draw)).with_state(state)
}

async fn draw(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GifQuery>,
) -> Result<Response, RequestError> {
    let (color, cycles) = query.resolve(&state.config)?;
    let freq = {
        let mut rng = state.rng.lock().map_err(|_| RequestError::Internal)?;
        lissajous::random_frequency(&mut *rng)
    };
    tracing::debug!(color, cycles, freq, "drawing");
    let gif = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, LissajousError> {
        let frames = lissajous::render(&state.config, color, cycles, freq)?;
        let mut gif = Vec::new();
        lissajous::encode(&state.config, &frames, &mut gif)?;
        Ok(gif)
    })
    .await
    .map_err(|_| RequestError::Internal)??;
    Ok(([(header::CONTENT_TYPE, "image/gif")], gif).into_response())
}

/// Listens on `addr` and serves until the process is stopped
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    use anyhow::Context;
    let listener =
        tokio::net::TcpListener::bind(addr).await.with_context(|| format!("can't listen on {addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
