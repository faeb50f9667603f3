//! Request handlers for the quotation route.
//!
//! `get_quotation` fetches from the provider, then persists, then answers with the bid.
//! A failed fetch short-circuits before persistence. A failed insert discards the
//! fetched value. Every failure becomes an empty 500 and the kind is only logged.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use log::{debug, error, info};
use quotation_common::QuotationError;
use quotation_common::net::DEADLINE_HEADER;
use thiserror::Error;

use crate::app::AppState;

/// Failure surfaced to HTTP callers as a bare 500.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] QuotationError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("GetQuotation failed ({}): {}", self.0.kind(), self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// GET /cotacao - current bid as a JSON string.
pub async fn get_quotation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<String>, ApiError> {
    let caller_budget = headers.get(DEADLINE_HEADER).and_then(|v| v.to_str().ok());
    let deadline = state.deadlines.inbound(caller_budget);
    debug!("GetQuotation started, budget {:?}", deadline.remaining());

    let quotation = state.upstream.fetch(state.deadlines.fetch(&deadline)).await?;
    let record = state
        .store
        .insert(&quotation, state.deadlines.persist(&deadline))
        .await?;

    info!(
        "Quotation {} stored with id {} at {}",
        quotation.bid, record.id, record.date_created
    );
    Ok(Json(quotation.bid))
}

/// Any path other than the quotation route.
pub async fn not_found(uri: Uri) -> StatusCode {
    debug!("No route for {}", uri.path());
    StatusCode::NOT_FOUND
}
