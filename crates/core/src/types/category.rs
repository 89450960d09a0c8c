//! Product category enum.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
///
/// Serialized in lowercase (`"clothes"`), which is also the value used in
/// listing filter query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothes,
    Electronics,
    Handmade,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Clothes, Self::Electronics, Self::Handmade];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clothes => "clothes",
            Self::Electronics => "electronics",
            Self::Handmade => "handmade",
        }
    }

    /// Human-readable label for filter dropdowns.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clothes => "Clothes",
            Self::Electronics => "Electronics",
            Self::Handmade => "Handmade",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothes" => Ok(Self::Clothes),
            "electronics" => Ok(Self::Electronics),
            "handmade" => Ok(Self::Handmade),
            other => Err(CategoryError(other.to_owned())),
        }
    }
}
