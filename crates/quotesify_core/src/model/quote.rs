//! Quote records.

use crate::model::book::Author;
use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type QuoteId = Uuid;

/// A saved quote.
///
/// Quotes are addressed by their position in [`crate::list::QuoteList`]
/// (1-based for users), so the position is not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub category: Option<CategoryId>,
}

impl Quote {
    pub fn new(text: impl Into<String>, reference: Option<String>, author: Option<Author>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            reference,
            author,
            category: None,
        }
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.text)?;
        match (&self.author, &self.reference) {
            (Some(author), Some(reference)) => write!(f, " - {author}, {reference}"),
            (Some(author), None) => write!(f, " - {author}"),
            (None, Some(reference)) => write!(f, " - from {reference}"),
            (None, None) => Ok(()),
        }
    }
}
