//! Metric update and read endpoints

use crate::core::types::{Metric, MetricId, MetricKind, MetricQuery, MetricValue};
use crate::server::extract::SignedJson;
use crate::server::state::AppState;
use crate::utils::error::TelemetryError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::fmt::Write;
use tracing::debug;

/// Configure metric routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list_metrics))
        .route("/update", web::post().to(update_json))
        .route("/update/", web::post().to(update_json))
        .route("/updates/", web::post().to(update_batch))
        .route("/update/{kind}/{name}/{value}", web::post().to(update_path))
        .route("/update/{kind}/{value}", web::post().to(missing_name))
        .route("/value/", web::post().to(value_json))
        .route("/value/{kind}/{name}", web::get().to(value_path));
}

/// `POST /update/` with a JSON metric; answers with the stored result
async fn update_json(
    state: web::Data<AppState>,
    body: SignedJson<Metric>,
) -> ActixResult<HttpResponse> {
    let metric = body.into_inner();
    debug!("Update {}", metric.id());

    let stored = state.storage.update(&metric).await?;
    Ok(HttpResponse::Ok().json(stored))
}

/// `POST /updates/` with a JSON array, applied as one batch
async fn update_batch(
    state: web::Data<AppState>,
    body: SignedJson<Vec<Metric>>,
) -> ActixResult<HttpResponse> {
    let batch = body.into_inner();
    debug!("Batch update of {} metrics", batch.len());

    state.storage.update_batch(&batch).await?;
    Ok(HttpResponse::Ok().finish())
}

/// `POST /update/{kind}/{name}/{value}`
async fn update_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> ActixResult<HttpResponse> {
    let (kind, name, raw) = path.into_inner();
    let kind: MetricKind = kind.parse()?;
    if name.is_empty() {
        return Err(TelemetryError::not_found("metric name is missing").into());
    }
    let value = MetricValue::parse(kind, &raw)?;

    state.storage.update(&Metric::new(name, value)).await?;
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").finish())
}

/// `POST /update/{kind}/{value}` carries no name
async fn missing_name(path: web::Path<(String, String)>) -> ActixResult<HttpResponse> {
    let (kind, _) = path.into_inner();
    Err(TelemetryError::not_found(format!("{} metric name is missing", kind)).into())
}

/// `POST /value/` with `{"id","type"}`
async fn value_json(
    state: web::Data<AppState>,
    body: SignedJson<MetricQuery>,
) -> ActixResult<HttpResponse> {
    let id = MetricId::from(body.into_inner());
    let metric = state.storage.get(&id).await?;
    Ok(HttpResponse::Ok().json(metric))
}

/// `GET /value/{kind}/{name}` answers with the bare value
async fn value_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (kind, name) = path.into_inner();
    // nothing of an unknown kind can exist
    let kind: MetricKind = kind
        .parse()
        .map_err(|_| TelemetryError::not_found(format!("unknown metric type '{}'", kind)))?;

    let metric = state.storage.get(&MetricId::new(name, kind)).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(metric.value.to_string()))
}

/// `GET /` lists every metric as `name: value` lines
async fn list_metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let body = render_listing(&state.storage.list().await);
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

fn render_listing(metrics: &[Metric]) -> String {
    metrics.iter().fold(String::new(), |mut out, metric| {
        let _ = writeln!(out, "{}: {}", metric.name, metric.value);
        out
    })
}
