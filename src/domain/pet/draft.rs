use super::{Gender, PetValues, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw editor input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PetDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub gender: Gender,
    /// Free text; blank means 0.
    #[serde(default)]
    pub weight: String,
}

impl PetDraft {
    /// Applies the save rules and produces the values to write.
    pub fn to_values(&self) -> Result<PetValues, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.gender.is_known() {
            return Err(ValidationError::UnknownGender);
        }

        let weight_text = self.weight.trim();
        let weight = if weight_text.is_empty() {
            0
        } else {
            let parsed = weight_text
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidWeight(self.weight.clone()))?;
            if parsed < 0 {
                return Err(ValidationError::NegativeWeight(parsed));
            }
            parsed
        };

        let breed = match self.breed.trim() {
            "" => None,
            _ => Some(self.breed.clone()),
        };

        Ok(PetValues {
            name: Some(self.name.clone()),
            breed,
            gender: Some(self.gender),
            weight: Some(weight),
        })
    }
}
