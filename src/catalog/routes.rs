use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{entries, resolve, CatalogEntry, ResolvedPenalty};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePenaltyRequest {
    #[serde(alias = "Cause")]
    #[schema(example = "Jump start (but stops)")]
    pub cause: String,
    #[serde(default, alias = "Event")]
    #[schema(example = "race")]
    pub event: Option<String>,
    /// Used when the cause is not in the catalog.
    #[serde(default, alias = "Penalty")]
    pub penalty: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "Penalty Catalog",
    responses(
        (status = 200, description = "Standard causes with their per-session penalties", body = Vec<CatalogEntry>)
    )
)]
pub async fn list_catalog() -> impl Responder {
    HttpResponse::Ok().json(entries())
}

#[utoipa::path(
    post,
    path = "/api/catalog/resolve",
    tag = "Penalty Catalog",
    request_body = ResolvePenaltyRequest,
    responses(
        (status = 200, description = "Penalty to apply for the cause and event", body = ResolvedPenalty)
    )
)]
pub async fn resolve_penalty(item: web::Json<ResolvePenaltyRequest>) -> impl Responder {
    let request = item.into_inner();
    let resolved = resolve(
        &request.cause,
        request.event.as_deref(),
        request.penalty.as_deref(),
    );
    log::debug!(
        "Resolved penalty for '{}' (discretionary: {})",
        request.cause,
        resolved.discretionary
    );
    HttpResponse::Ok().json(resolved)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/catalog").route(web::get().to(list_catalog)))
        .service(web::resource("/catalog/resolve").route(web::post().to(resolve_penalty)));
}
