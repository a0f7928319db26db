use crate::transport::http::handlers::common::store_error;
use crate::transport::http::types::{json_422, Action, ApiResponse, AppState, ExecuteRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::debug;

#[utoipa::path(
    post,
    path = "/api/execute",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Execution successful", body = ApiResponse),
        (status = 201, description = "Pet inserted", body = ApiResponse),
        (status = 400, description = "Invalid address, validation failure or unsupported action", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn execute_handler(
    State(state): State<AppState>,
    request: Result<Json<ExecuteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"uri\": \"content://...\", \"action\": \"query\"}").into_response()
        }
    };

    let address = match state.provider.resolve(&request.uri) {
        Ok(a) => a,
        Err(e) => return store_error(e).into_response(),
    };
    debug!(uri = %address, action = ?request.action, "execute");

    match request.action {
        Action::Query => match state.provider.query_columns(address, &request.projection).await {
            Ok(rows) => Json(ApiResponse::ok(json!({ "rows": rows }))).into_response(),
            Err(e) => store_error(e).into_response(),
        },
        Action::Insert => {
            let values = request.values.unwrap_or_default();
            match state.provider.insert(address, &values).await {
                Ok(new_address) => (
                    StatusCode::CREATED,
                    Json(ApiResponse::ok(json!({
                        "id": new_address.id(),
                        "uri": new_address.to_string(),
                    }))),
                )
                    .into_response(),
                Err(e) => store_error(e).into_response(),
            }
        }
        Action::Update => {
            let values = request.values.unwrap_or_default();
            match state.provider.update(address, &values).await {
                Ok(rows) => Json(ApiResponse::ok(json!({ "rows_affected": rows }))).into_response(),
                Err(e) => store_error(e).into_response(),
            }
        }
        Action::Delete => match state.provider.delete(address).await {
            Ok(rows) => Json(ApiResponse::ok(json!({ "rows_affected": rows }))).into_response(),
            Err(e) => store_error(e).into_response(),
        },
    }
}
