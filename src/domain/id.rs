//! String identifiers for boards, lists and tasks.

use crate::error::{BoardError, Result};

/// Checks that `s` can be used as an identifier.
///
/// Commas are reserved by the order token encoding and whitespace would not
/// survive a round trip through it.
pub(crate) fn validate(s: &str) -> Result<()> {
    if s.is_empty() || s.contains(',') || s.chars().any(char::is_whitespace) {
        return Err(BoardError::InvalidId(s.to_string()));
    }
    Ok(())
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            const PREFIX: &'static str = $prefix;

            /// Creates an identifier from a counter
            pub fn new(counter: u32) -> Self {
                Self(format!("{}{}", Self::PREFIX, counter))
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::BoardError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $crate::domain::id::validate(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use define_id;
