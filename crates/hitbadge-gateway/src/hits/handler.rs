//! HTTP handlers for `/` and every other path.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::Instrument;

use hitbadge_core::count::CountBody;
use hitbadge_core::error::{HitError, Result};
use hitbadge_core::query::{HitQuery, Representation};
use hitbadge_core::render::DecodeLimits;

use crate::app_state::AppState;
use crate::glyphs::render_badge;

use super::counter::bump;

/// Fixed body served at `/`.
pub const INDEX_HTML: &str = "<h1>:/</h1>";

const COUNTING_METHODS: &str = "GET, POST, PUT, PATCH";

fn is_counting(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::POST | Method::PUT | Method::PATCH)
}

/// `/`, any method. Never touches a counter.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Fallback for every path other than `/`.
pub async fn handle(State(app): State<AppState>, method: Method, uri: Uri) -> Response {
    if !is_counting(&method) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, COUNTING_METHODS)],
        )
            .into_response();
    }

    let path = uri.path();
    let query = HitQuery::parse(uri.query());
    let repr = query.representation();

    let span = tracing::info_span!("hit", %method, path, repr = repr.as_str());
    let mut resp = match respond(&app, path, &query, repr).instrument(span).await {
        Ok(r) => r,
        Err(e) => error_response(&app, &e),
    };

    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    app.metrics()
        .hits
        .inc(&[("repr", repr.as_str()), ("status", resp.status().as_str())]);
    resp
}

async fn respond(
    app: &AppState,
    path: &str,
    query: &HitQuery,
    repr: Representation,
) -> Result<Response> {
    let count = bump(app.store(), path).await?;

    match repr {
        Representation::Json => Ok(Json(CountBody { count }).into_response()),
        Representation::Image => {
            let urls = query.glyph_urls();
            let png = render(app, count, &urls).await?;
            Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
        }
        Representation::Text => {
            Ok(([(header::CONTENT_TYPE, "text/plain")], count.to_string()).into_response())
        }
    }
}

async fn render(app: &AppState, count: u64, urls: &[String]) -> Result<Vec<u8>> {
    let m = app.metrics();
    let started = Instant::now();

    m.renders_in_flight.inc(&[]);
    let limits = DecodeLimits {
        max_pixels: app.cfg().glyphs.max_glyph_pixels,
    };
    let res = render_badge(app.glyphs(), count, urls, limits).await;
    m.renders_in_flight.dec(&[]);

    match &res {
        Ok(png) => {
            m.render_duration.observe(&[], started.elapsed());
            tracing::debug!(count, bytes = png.len(), "badge rendered");
        }
        Err(e) => m.render_errors.inc(&[("code", e.client_code().as_str())]),
    }
    res
}

fn error_response(app: &AppState, e: &HitError) -> Response {
    let code = e.client_code();
    match e {
        HitError::InvalidGlyphCount(_) => tracing::info!(error = %e, "rejected badge request"),
        HitError::StorageUnavailable(_) => {
            app.metrics().store_errors.inc(&[("code", code.as_str())]);
            tracing::warn!(error = %e, "store call failed");
        }
        HitError::CorruptCounterValue { .. } => {
            app.metrics().store_errors.inc(&[("code", code.as_str())]);
            tracing::error!(error = %e, "stored counter is not a number");
        }
        _ => tracing::warn!(error = %e, code = code.as_str(), "hit failed"),
    }

    let status =
        StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "text/plain")], code.public_message()).into_response()
}
