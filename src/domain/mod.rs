pub mod address;
pub mod pet;

pub use address::{AddressError, PetAddress};
pub use pet::{Gender, Pet, PetColumn, PetDraft, PetValues, ValidationError};
