//! Identifier formats used by the tribe endpoints.
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::{fmt, ops::Deref, str::FromStr};

/// Common trait implementations for identifiers that are newtype wrappers
/// around `String`.
macro_rules! string_newtype {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.into())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = Deserialize::deserialize(deserializer)?;
                Self::new(value).map_err(D::Error::custom)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// The handle of a tribe (an organization profile), e.g. `gitcoinco`.
///
/// It is interpolated into the request path, so it must be a single
/// non-empty path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TribeId(String);
string_newtype!(TribeId);

impl TribeId {
    /// Parses a `TribeId` from the given string.
    pub fn new(id: String) -> Result<Self, &'static str> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            Err("tribe id must not be empty")
        } else if trimmed.contains(['/', '?', '#']) || trimmed.chars().any(char::is_whitespace) {
            Err("tribe id must be a single path segment")
        } else if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    /// Returns the tribe id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The id of a tribe membership, as rendered in `data-tribeleader`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(String);
string_newtype!(MemberId);

impl MemberId {
    /// Parses a `MemberId` from the given string.
    pub fn new(id: String) -> Result<Self, &'static str> {
        if id.trim().is_empty() {
            Err("member id must not be empty")
        } else {
            Ok(Self(id.trim().into()))
        }
    }

    /// Returns the member id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
