//! URI addressing for the pet store.
//!
//! Two shapes are recognised:
//! - `content://com.example.android.pets/pets` (the collection)
//! - `content://com.example.android.pets/pets/<id>` (one pet)
//!
//! Anything else is rejected.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const CONTENT_SCHEME: &str = "content";
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";
pub const PATH_PETS: &str = "pets";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("address {0:?} does not match the pet collection or a single pet")]
pub struct AddressError(pub String);

/// Logical locator for the whole collection or one pet by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetAddress {
    Collection,
    Item(i64),
}

impl PetAddress {
    /// Builds the item address for `id` (the collection with the id appended).
    pub fn with_appended_id(id: i64) -> Self {
        PetAddress::Item(id)
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            PetAddress::Collection => None,
            PetAddress::Item(id) => Some(*id),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, PetAddress::Collection)
    }
}

impl fmt::Display for PetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", CONTENT_SCHEME, CONTENT_AUTHORITY, PATH_PETS)?;
        if let PetAddress::Item(id) = self {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for PetAddress {
    type Err = AddressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressError(raw.to_string());

        let rest = raw
            .strip_prefix(CONTENT_SCHEME)
            .and_then(|r| r.strip_prefix("://"))
            .ok_or_else(invalid)?;
        let (authority, path) = rest.split_once('/').ok_or_else(invalid)?;
        if authority != CONTENT_AUTHORITY {
            return Err(invalid());
        }

        // Empty segments are ignored, so "pets/" and "pets" are the same path.
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [pets] if *pets == PATH_PETS => Ok(PetAddress::Collection),
            [pets, id] if *pets == PATH_PETS => {
                if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                id.parse::<i64>().map(PetAddress::Item).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}
