//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! non-empty names, sanitized free text) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value is outside of the accepted range.
    #[error("value {value} is out of range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for backend-assigned identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CompanyId, "Backend-assigned identifier of a company row.");
id_newtype!(ContactId, "Backend-assigned identifier of a contact row.");
id_newtype!(DealId, "Backend-assigned identifier of a deal row.");
id_newtype!(ActivityId, "Backend-assigned identifier of an activity row.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Macro to generate enum-like string fields. Known tokens match
/// case-insensitively, blank input maps to the default variant and anything
/// else is preserved verbatim in `Other`.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Token stored in the backend column.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Other(token) => token.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                let token = value.trim();
                if token.is_empty() {
                    return Self::default();
                }
                $(
                    if token.eq_ignore_ascii_case($token) {
                        return Self::$variant;
                    }
                )+
                Self::Other(token.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                value.as_str().into()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

pub(crate) use token_enum;

non_empty_string_newtype!(
    CompanyName,
    "Company display name enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    DealTitle,
    "Deal title enforcing trimmed, non-empty values."
);

/// Removes every tag (and the contents of `script`/`style`) while leaving
/// plain text characters such as `&` and `<` as typed.
fn strip_markup(value: &str) -> String {
    if !value.contains('<') {
        return value.to_string();
    }
    let text = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(value)
        .to_string();
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Activity description sanitized of markup, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityDescription(String);

impl ActivityDescription {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = strip_markup(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns at most `max_chars` characters of the description.
    pub fn prefix(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl TryFrom<String> for ActivityDescription {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityDescription> for String {
    fn from(value: ActivityDescription) -> Self {
        value.0
    }
}

/// Win probability of a deal in percent.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct Probability(i32);

impl Probability {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange {
                value: value.into(),
                min: 0,
                max: 100,
            })
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Probability {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for i32 {
    fn from(value: Probability) -> Self {
        value.0
    }
}
