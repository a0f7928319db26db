pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod execute;
    pub mod health;
    pub mod pets;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
