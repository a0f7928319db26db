use crate::domain::{Pet, PetDraft, PetValues};
use crate::transport::http::handlers::{execute, health, pets};
use crate::transport::http::types::{Action, ApiResponse, AppState, ExecuteRequest, SaveRequest};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        execute::execute_handler,
        pets::list_pets_handler,
        pets::create_pet_handler,
        pets::delete_all_pets_handler,
        pets::insert_dummy_pet_handler,
        pets::get_pet_handler,
        pets::update_pet_handler,
        pets::delete_pet_handler,
        pets::save_pet_handler
    ),
    components(schemas(
        ApiResponse,
        Action,
        ExecuteRequest,
        SaveRequest,
        Pet,
        PetValues,
        PetDraft
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/execute", post(execute::execute_handler))
        .route(
            "/api/pets",
            get(pets::list_pets_handler)
                .post(pets::create_pet_handler)
                .delete(pets::delete_all_pets_handler),
        )
        // Static segments take precedence over `/:id`, so `GET /api/pets/dummy`
        // is a 405 rather than a malformed-id 400.
        .route("/api/pets/dummy", post(pets::insert_dummy_pet_handler))
        .route("/api/pets/save", post(pets::save_pet_handler))
        .route(
            "/api/pets/:id",
            get(pets::get_pet_handler)
                .put(pets::update_pet_handler)
                .delete(pets::delete_pet_handler),
        )
        .with_state(app_state)
}
