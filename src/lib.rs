pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{PetProvider, SaveOutcome, StoreError, StoreResult};
pub use domain::{Gender, Pet, PetAddress, PetColumn, PetDraft, PetValues, ValidationError};
