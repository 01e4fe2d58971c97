//! HTTP boundary for decision documents.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};

use super::model::DecisionRecord;
use super::GeneratorError;
use crate::{AppState, ErrorResponse};

fn error_response(err: &GeneratorError) -> HttpResponse {
    let body = ErrorResponse::new(err.kind(), err.public_message());
    match err {
        GeneratorError::ConverterUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        GeneratorError::ConversionTimeout(_) => HttpResponse::GatewayTimeout().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[utoipa::path(
    post,
    path = "/api/decision-pdf",
    tag = "Decision Documents",
    request_body = DecisionRecord,
    responses(
        (status = 200, description = "Generated Stewards Decision PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Malformed JSON body"),
        (status = 500, description = "Generation failed", body = ErrorResponse),
        (status = 503, description = "Document converter unavailable", body = ErrorResponse),
        (status = 504, description = "Document conversion timed out", body = ErrorResponse)
    )
)]
pub async fn generate_decision_pdf(
    state: web::Data<AppState>,
    item: web::Json<DecisionRecord>,
) -> impl Responder {
    let record = item.into_inner();

    match state.decisions.generate(&record).await {
        Ok(document) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(document.filename)],
            })
            .body(document.pdf),
        Err(e) => {
            log::error!("PDF generation error: {}", e);
            error_response(&e)
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/decision-pdf").route(web::post().to(generate_decision_pdf)));
}
