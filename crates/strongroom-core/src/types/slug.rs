//! Validated document slug.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// A document slug restricted to lowercase ASCII alphanumerics and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

#[derive(Debug, Validate)]
struct SlugInput {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_slug_charset")
    )]
    slug: String,
}

fn validate_slug_charset(slug: &str) -> Result<(), ValidationError> {
    if slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("slug_charset")
            .with_message("Slug can only contain lowercase letters, numbers, and hyphens".into()))
    }
}

impl Slug {
    /// Validate and wrap a raw slug. The input is checked as given; whitespace is rejected.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let input = SlugInput {
            slug: raw.to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::invalid_input(format!("Invalid slug format: {e}")))?;
        Ok(Self(input.slug))
    }

    /// The slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> String {
        slug.0
    }
}
