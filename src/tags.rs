//! Status classification and the display tag palette.
//!
//! HIE payloads encode yes/no flags loosely: `is_active` arrives as `1`,
//! coverage status as `"1"`, some flags as booleans. [`classify`] folds all
//! of them into a [`Category`], which banners render as a green or red tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display colours available to banner tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagType {
    Red,
    Magenta,
    Purple,
    Blue,
    Cyan,
    Teal,
    Green,
    Gray,
    CoolGray,
    WarmGray,
    HighContrast,
    Outline,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagType::Red => "red",
            TagType::Magenta => "magenta",
            TagType::Purple => "purple",
            TagType::Blue => "blue",
            TagType::Cyan => "cyan",
            TagType::Teal => "teal",
            TagType::Green => "green",
            TagType::Gray => "gray",
            TagType::CoolGray => "cool-gray",
            TagType::WarmGray => "warm-gray",
            TagType::HighContrast => "high-contrast",
            TagType::Outline => "outline",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-way display category for a status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
}

impl Category {
    pub fn is_positive(&self) -> bool {
        matches!(self, Category::Positive)
    }

    pub fn tag_type(&self) -> TagType {
        match self {
            Category::Positive => TagType::Green,
            Category::Negative => TagType::Red,
        }
    }
}

impl From<bool> for Category {
    fn from(positive: bool) -> Self {
        if positive {
            Category::Positive
        } else {
            Category::Negative
        }
    }
}

/// A loosely-typed yes/no flag as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl StatusFlag {
    /// `true`, `1` and `"1"` are positive; everything else is negative.
    pub fn category(&self) -> Category {
        let positive = match self {
            StatusFlag::Bool(b) => *b,
            StatusFlag::Number(n) => *n == 1.0,
            StatusFlag::Text(s) => s == "1",
        };
        positive.into()
    }
}

impl From<bool> for StatusFlag {
    fn from(value: bool) -> Self {
        StatusFlag::Bool(value)
    }
}

impl From<i64> for StatusFlag {
    fn from(value: i64) -> Self {
        StatusFlag::Number(value as f64)
    }
}

impl From<i32> for StatusFlag {
    fn from(value: i32) -> Self {
        StatusFlag::Number(f64::from(value))
    }
}

impl From<&str> for StatusFlag {
    fn from(value: &str) -> Self {
        StatusFlag::Text(value.to_string())
    }
}

impl From<String> for StatusFlag {
    fn from(value: String) -> Self {
        StatusFlag::Text(value)
    }
}

/// Classify an optional status flag. Missing values are negative.
///
/// # Example
/// ```
/// use hie_registry::tags::{classify, Category, StatusFlag};
///
/// assert_eq!(classify(Some(&StatusFlag::from("1"))), Category::Positive);
/// assert_eq!(classify(Some(&StatusFlag::from(0))), Category::Negative);
/// assert_eq!(classify(None), Category::Negative);
/// ```
pub fn classify(value: Option<&StatusFlag>) -> Category {
    value.map_or(Category::Negative, StatusFlag::category)
}

/// Tag colour for a status flag: green when positive, red otherwise.
pub fn tag_type(value: Option<&StatusFlag>) -> TagType {
    classify(value).tag_type()
}

/// Membership status shown on the health-worker banner.
///
/// Only `"Licensed"` is positive; the regulator's other statuses
/// (suspended, struck off, ...) are all negative.
pub fn membership_status_category(status: &str) -> Category {
    (status == "Licensed").into()
}
