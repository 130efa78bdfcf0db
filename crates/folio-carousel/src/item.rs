#![forbid(unsafe_code)]

//! Testimonial records.
//!
//! Items are loaded once from a JSON array and never mutated afterwards.
//! The controller only needs their count; the view reads their content.
//!
//! ```rust
//! use folio_carousel::item::load_items;
//!
//! let items = load_items(r#"[{
//!     "id": "t1",
//!     "content": "Shipped on time.",
//!     "rating": 5,
//!     "name": "Ada",
//!     "role": "CTO",
//!     "company": "Analytical Engines",
//!     "avatar": "https://example.com/ada.png"
//! }]"#).unwrap();
//! assert_eq!(items[0].rating.stars(), "★★★★★");
//! ```

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::ItemError;

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Validate a raw rating.
    pub fn new(value: u8) -> Result<Self, ItemError> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ItemError::Rating(value))
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Filled stars, one per rating point.
    #[must_use]
    pub fn stars(self) -> String {
        "★".repeat(usize::from(self.0))
    }
}

impl TryFrom<u8> for Rating {
    type Error = ItemError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// One testimonial card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Stable identifier.
    pub id: String,
    /// Quoted text.
    pub content: String,
    /// Star rating.
    pub rating: Rating,
    /// Attribution: person's name.
    pub name: String,
    /// Attribution: job title.
    pub role: String,
    /// Attribution: company.
    pub company: String,
    /// Avatar image reference (URL or path).
    pub avatar: String,
}

impl Testimonial {
    /// "Name, Role @ Company" attribution line.
    #[must_use]
    pub fn attribution(&self) -> String {
        format!("{}, {} @ {}", self.name, self.role, self.company)
    }
}

/// Parse a JSON array of testimonials.
///
/// # Errors
///
/// Returns [`ItemError::Parse`] for malformed JSON or out-of-range ratings,
/// and [`ItemError::DuplicateId`] when two records share an id.
pub fn load_items(json: &str) -> Result<Vec<Testimonial>, ItemError> {
    let items: Vec<Testimonial> = serde_json::from_str(json)?;
    check_unique(&items)?;
    tracing::debug!(count = items.len(), "testimonials loaded");
    Ok(items)
}

/// Parse testimonials from a reader (file, stdin).
///
/// # Errors
///
/// Same as [`load_items`], plus [`ItemError::Io`] for read failures.
pub fn read_items(mut reader: impl Read) -> Result<Vec<Testimonial>, ItemError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    load_items(&json)
}

fn check_unique(items: &[Testimonial]) -> Result<(), ItemError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(ItemError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
