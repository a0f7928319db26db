use crate::app::StoreError;
use crate::domain::{PetAddress, PetColumn};
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use std::str::FromStr;

pub type HandlerError = (StatusCode, Json<ApiResponse>);

/// Maps a provider failure onto an HTTP status.
pub fn store_error(err: StoreError) -> HandlerError {
    let status = match &err {
        StoreError::Validation(_)
        | StoreError::InvalidAddress(_)
        | StoreError::UnsupportedOperation { .. }
        | StoreError::UnknownColumn(_) => StatusCode::BAD_REQUEST,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::err(err.to_string())))
}

pub fn not_found(address: PetAddress) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::err(format!("No pet at {}", address))),
    )
}

/// Builds the item address for a path segment. The segment goes through the
/// same matcher as a full URI, so `/api/pets/abc` is rejected like any other
/// malformed address.
pub fn item_address(raw_id: &str) -> Result<PetAddress, HandlerError> {
    let uri = format!("{}/{}", PetAddress::Collection, raw_id);
    match PetAddress::from_str(&uri) {
        Ok(address @ PetAddress::Item(_)) => Ok(address),
        Ok(PetAddress::Collection) | Err(_) => Err(store_error(StoreError::InvalidAddress(
            crate::domain::AddressError(uri),
        ))),
    }
}

pub fn parse_projection(raw: Option<&str>) -> Result<Vec<PetColumn>, HandlerError> {
    match raw {
        None => Ok(Vec::new()),
        Some(list) => PetColumn::parse_list(list)
            .map_err(|column| store_error(StoreError::UnknownColumn(column))),
    }
}
