pub mod error;
pub mod pet_provider;

pub use error::{StoreError, StoreResult};
pub use pet_provider::{PetProvider, SaveOutcome};
