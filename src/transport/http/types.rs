use crate::app::PetProvider;
use crate::domain::{PetDraft, PetValues};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<PetProvider>,
}

impl AppState {
    pub fn new(provider: PetProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Insert,
    Update,
    Delete,
    Query,
}

/// A URI-addressed request, routed through the address matcher.
#[derive(Deserialize, Debug, ToSchema)]
pub struct ExecuteRequest {
    /// `content://com.example.android.pets/pets` or `.../pets/{id}`.
    pub uri: String,
    pub action: Action,
    /// Column values for `insert` and `update`.
    #[serde(default)]
    pub values: Option<PetValues>,
    /// Columns to return for `query` (empty = all).
    #[serde(default)]
    pub projection: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SaveRequest {
    pub draft: PetDraft,
    /// Item address of the pet being edited; omit to insert a new pet.
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectionParams {
    /// Comma separated column list, e.g. `id,name,breed`.
    #[serde(default)]
    pub projection: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmParams {
    /// Safety switch to prevent accidental wipes.
    #[serde(default)]
    pub confirm: bool,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}
