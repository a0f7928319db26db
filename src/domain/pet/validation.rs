use super::PetValues;
use thiserror::Error;

/// A record rejected before any write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pet requires a name")]
    MissingName,
    #[error("pet requires a known gender")]
    UnknownGender,
    #[error("weight must be a whole number, got {0:?}")]
    InvalidWeight(String),
    #[error("weight cannot be negative, got {0}")]
    NegativeWeight(i64),
}

impl PetValues {
    /// Validates values for a new record.
    ///
    /// Returns the values with the weight default applied.
    pub fn validate_for_insert(&self) -> Result<PetValues, ValidationError> {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => {}
            _ => return Err(ValidationError::MissingName),
        }
        match self.gender {
            Some(gender) if gender.is_known() => {}
            _ => return Err(ValidationError::UnknownGender),
        }
        let weight = self.weight.unwrap_or(0);
        if weight < 0 {
            return Err(ValidationError::NegativeWeight(weight));
        }

        Ok(PetValues {
            weight: Some(weight),
            ..self.clone()
        })
    }

    /// Validates only the fields that were provided.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingName);
            }
        }
        if let Some(gender) = self.gender {
            if !gender.is_known() {
                return Err(ValidationError::UnknownGender);
            }
        }
        if let Some(weight) = self.weight {
            if weight < 0 {
                return Err(ValidationError::NegativeWeight(weight));
            }
        }
        Ok(())
    }
}
