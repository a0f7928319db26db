//! Domain definitions for pet records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub mod draft;
pub mod validation;

pub use draft::PetDraft;
pub use validation::ValidationError;

/// Gender of a pet, persisted as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> i64 {
        match self {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    pub fn is_known(self) -> bool {
        self != Gender::Unknown
    }
}

impl TryFrom<i64> for Gender {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Gender::Unknown),
            1 => Ok(Gender::Male),
            2 => Ok(Gender::Female),
            other => Err(format!("invalid gender code: {}", other)),
        }
    }
}

impl From<Gender> for i64 {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

/// A pet as stored in the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    #[schema(value_type = i64)]
    pub gender: Gender,
    pub weight: i64,
}

/// Column values supplied to an insert or update.
///
/// `None` means "not provided": an update leaves that column untouched and an
/// insert falls back to the column default (weight) or fails validation
/// (name, gender).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PetValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl PetValues {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: Some(name.into()),
            gender: Some(gender),
            ..Self::default()
        }
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.breed.is_none() && self.gender.is_none() && self.weight.is_none()
    }
}

/// Columns of the `pets` table, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetColumn {
    Id,
    Name,
    Breed,
    Gender,
    Weight,
}

impl PetColumn {
    pub const ALL: [PetColumn; 5] = [
        PetColumn::Id,
        PetColumn::Name,
        PetColumn::Breed,
        PetColumn::Gender,
        PetColumn::Weight,
    ];

    /// Columns shown in the catalog list.
    pub const CATALOG: [PetColumn; 3] = [PetColumn::Id, PetColumn::Name, PetColumn::Breed];

    /// Columns loaded by the editor.
    pub const EDITOR: [PetColumn; 5] = PetColumn::ALL;

    pub fn as_str(self) -> &'static str {
        match self {
            PetColumn::Id => "id",
            PetColumn::Name => "name",
            PetColumn::Breed => "breed",
            PetColumn::Gender => "gender",
            PetColumn::Weight => "weight",
        }
    }

    /// Parses a comma separated projection such as `"id,name"`.
    /// Blank input yields an empty projection (all columns).
    pub fn parse_list(raw: &str) -> Result<Vec<PetColumn>, String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PetColumn::from_str)
            .collect()
    }
}

impl fmt::Display for PetColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PetColumn::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
