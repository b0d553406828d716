//! Strongly-typed identifiers for clinic entities.
//!
//! Each collection gets its own newtype over [`Uuid`] so an owner id can
//! never be passed where a pet id is expected. New ids are UUID v7, which
//! sort by creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a clinic customer.
    OwnerId
}

define_id! {
    /// Unique identifier for a pet.
    PetId
}

define_id! {
    /// Unique identifier for a single visit record.
    VisitId
}

define_id! {
    /// Unique identifier for a veterinarian.
    VetId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = OwnerId::new();
        let b = OwnerId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn new_ids_sort_by_creation() {
        let first = PetId::new();
        let second = PetId::new();
        assert!(first < second);
    }

    #[test]
    fn parse_accepts_uuid_text() {
        let id: Result<VisitId, _> = "82ee7568-c925-43ae-ae96-a6d3f96e834e".parse();
        assert!(id.is_ok());
    }

    #[test]
    fn parse_rejects_garbage() {
        let id: Result<VetId, _> = "123".parse();
        assert!(id.is_err());
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = OwnerId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
