//! Type-safe identifiers.
//!
//! Record IDs are allocated by the owning actor and are plain `u32` newtypes. Member and
//! book IDs point at records owned by other systems, so they stay opaque strings.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Declares a `u32` newtype ID for a stored record, displayed as `<prefix>_<n>`.
macro_rules! record_id {
    ($entity:ident, $prefix:literal) => {
        paste::paste! {
            #[doc = "Type-safe identifier for " $entity " records."]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct [<$entity Id>](pub u32);

            impl From<u32> for [<$entity Id>] {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl Display for [<$entity Id>] {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "_{}"), self.0)
                }
            }
        }
    };
}

/// Declares a string newtype referencing an externally owned record.
macro_rules! external_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(Borrowing, "borrowing");
record_id!(Reservation, "reservation");

external_id!(MemberId);
external_id!(BookId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_display_with_entity_prefix() {
        assert_eq!(BorrowingId(7).to_string(), "borrowing_7");
        assert_eq!(ReservationId(12).to_string(), "reservation_12");
    }

    #[test]
    fn blank_external_ids_are_detected() {
        assert!(MemberId::from("  ").is_blank());
        assert!(!BookId::from("b1").is_blank());
    }
}
