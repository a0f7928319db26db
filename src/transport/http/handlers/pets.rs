use crate::app::{SaveOutcome, StoreResult};
use crate::domain::{PetAddress, PetValues};
use crate::transport::http::handlers::common::{item_address, not_found, parse_projection, store_error};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, ConfirmParams, ProjectionParams, SaveRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

fn created(address: PetAddress) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok(json!({
            "id": address.id(),
            "uri": address.to_string(),
        }))),
    )
}

async fn pet_exists(state: &AppState, address: PetAddress) -> StoreResult<bool> {
    match address.id() {
        Some(id) => Ok(state.provider.get(id).await?.is_some()),
        None => Ok(false),
    }
}

#[utoipa::path(
    get,
    path = "/api/pets",
    params(ProjectionParams),
    responses(
        (status = 200, description = "All pets, restricted to the projection", body = ApiResponse),
        (status = 400, description = "Unknown column", body = ApiResponse)
    )
)]
pub async fn list_pets_handler(
    State(state): State<AppState>,
    Query(params): Query<ProjectionParams>,
) -> impl IntoResponse {
    let projection = match parse_projection(params.projection.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    match state.provider.query(PetAddress::Collection, &projection).await {
        Ok(rows) => Json(ApiResponse::ok(json!(rows))).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = PetValues,
    responses(
        (status = 201, description = "Pet created", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Insert failed", body = ApiResponse)
    )
)]
pub async fn create_pet_handler(
    State(state): State<AppState>,
    request: Result<Json<PetValues>, JsonRejection>,
) -> impl IntoResponse {
    let Json(values) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\": ..., \"gender\": 1|2}").into_response(),
    };

    match state.provider.insert(PetAddress::Collection, &values).await {
        Ok(address) => created(address).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/pets",
    params(ConfirmParams),
    responses(
        (status = 200, description = "All pets deleted", body = ApiResponse),
        (status = 400, description = "Missing confirm=true", body = ApiResponse)
    )
)]
pub async fn delete_all_pets_handler(
    State(state): State<AppState>,
    Query(params): Query<ConfirmParams>,
) -> impl IntoResponse {
    if !params.confirm {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Refusing to delete all pets without confirm=true")),
        )
            .into_response();
    }

    match state.provider.delete_all_pets().await {
        Ok(rows) => Json(ApiResponse::ok(json!({ "rows_deleted": rows }))).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/pets/dummy",
    responses(
        (status = 201, description = "Placeholder pet created", body = ApiResponse),
        (status = 500, description = "Insert failed", body = ApiResponse)
    )
)]
pub async fn insert_dummy_pet_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.provider.insert_dummy_pet().await {
        Ok(address) => created(address).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    params(
        ("id" = String, Path, description = "Pet id"),
        ProjectionParams
    ),
    responses(
        (status = 200, description = "The pet", body = ApiResponse),
        (status = 400, description = "Malformed id or unknown column", body = ApiResponse),
        (status = 404, description = "No such pet", body = ApiResponse)
    )
)]
pub async fn get_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ProjectionParams>,
) -> impl IntoResponse {
    let address = match item_address(&id) {
        Ok(a) => a,
        Err(resp) => return resp.into_response(),
    };
    let projection = match parse_projection(params.projection.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    match state.provider.query(address, &projection).await {
        Ok(rows) => match rows.into_iter().next() {
            Some(row) => Json(ApiResponse::ok(row)).into_response(),
            None => not_found(address).into_response(),
        },
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    params(("id" = String, Path, description = "Pet id")),
    request_body = PetValues,
    responses(
        (status = 200, description = "Pet updated", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 404, description = "No such pet", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Update failed", body = ApiResponse)
    )
)]
pub async fn update_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<PetValues>, JsonRejection>,
) -> impl IntoResponse {
    let address = match item_address(&id) {
        Ok(a) => a,
        Err(resp) => return resp.into_response(),
    };
    let Json(values) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\"?, \"breed\"?, \"gender\"?, \"weight\"?}").into_response(),
    };

    match state.provider.update(address, &values).await {
        // An empty body touches no rows, so existence has to be checked separately.
        Ok(0) if values.is_empty() => match pet_exists(&state, address).await {
            Ok(true) => Json(ApiResponse::ok(json!({ "rows_updated": 0 }))).into_response(),
            Ok(false) => not_found(address).into_response(),
            Err(e) => store_error(e).into_response(),
        },
        Ok(0) => not_found(address).into_response(),
        Ok(rows) => Json(ApiResponse::ok(json!({ "rows_updated": rows }))).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    params(("id" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet deleted", body = ApiResponse),
        (status = 404, description = "No such pet", body = ApiResponse),
        (status = 500, description = "Delete failed", body = ApiResponse)
    )
)]
pub async fn delete_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let address = match item_address(&id) {
        Ok(a) => a,
        Err(resp) => return resp.into_response(),
    };

    match state.provider.delete_pet(address).await {
        Ok(0) => not_found(address).into_response(),
        Ok(rows) => Json(ApiResponse::ok(json!({ "rows_deleted": rows }))).into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/pets/save",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Existing pet updated", body = ApiResponse),
        (status = 201, description = "New pet created", body = ApiResponse),
        (status = 400, description = "Validation failed or bad uri", body = ApiResponse),
        (status = 404, description = "Edited pet no longer exists", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn save_pet_handler(
    State(state): State<AppState>,
    request: Result<Json<SaveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"draft\": {...}, \"uri\"?: \"content://...\"}").into_response(),
    };

    let address = match request.uri.as_deref() {
        None => None,
        Some(uri) => match state.provider.resolve(uri) {
            Ok(a) => Some(a),
            Err(e) => return store_error(e).into_response(),
        },
    };

    match state.provider.save(&request.draft, address).await {
        Ok(SaveOutcome::Inserted(address)) => created(address).into_response(),
        Ok(SaveOutcome::Updated(0)) => match address {
            Some(a) => not_found(a).into_response(),
            None => not_found(PetAddress::Collection).into_response(),
        },
        Ok(SaveOutcome::Updated(rows)) => {
            Json(ApiResponse::ok(json!({ "rows_updated": rows }))).into_response()
        }
        Err(e) => store_error(e).into_response(),
    }
}
