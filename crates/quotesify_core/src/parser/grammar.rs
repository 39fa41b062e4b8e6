//! Payload grammars and the generic marker tokenizer.
//!
//! # Responsibility
//! - Describe every marker-delimited payload as a static [`Grammar`] table.
//! - Split payloads with one tokenizer so each handler only reads fields.
//!
//! # Invariants
//! - Markers are literal, case-sensitive substrings; only the first
//!   occurrence of each marker splits the payload.
//! - Every field is trimmed; an empty optional field is treated as absent.

use crate::error::{CommandError, CommandResult};
use crate::list::ListKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static LEADING_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*(\S+)(?:\s+(.*))?$").expect("valid leading token regex"));
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid integer regex"));

pub const FLAG_AUTHOR: &str = "/by";
pub const FLAG_REFERENCE: &str = "/from";
pub const FLAG_EDIT: &str = "/edit";
pub const FLAG_PAGE: &str = "/pg";

/// Placeholder meaning "leave this side alone" in category payloads.
pub const EMPTY_PLACEHOLDER: &str = "-";
/// Quote number meaning "no quote" in category payloads.
pub const QUOTE_SKIP_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub token: &'static str,
    pub field: &'static str,
    pub required: bool,
}

/// Marker-delimited payload shape: a leading field followed by markers.
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    pub head: &'static str,
    pub markers: &'static [Marker],
}

const fn required(token: &'static str, field: &'static str) -> Marker {
    Marker {
        token,
        field,
        required: true,
    }
}

const fn optional(token: &'static str, field: &'static str) -> Marker {
    Marker {
        token,
        field,
        required: false,
    }
}

pub const BOOK_ADD: Grammar = Grammar {
    head: "book title",
    markers: &[required(FLAG_AUTHOR, "author")],
};

pub const BOOK_DELETE: Grammar = BOOK_ADD;

pub const QUOTE_ADD: Grammar = Grammar {
    head: "quote",
    markers: &[
        optional(FLAG_REFERENCE, "reference"),
        optional(FLAG_AUTHOR, "author"),
    ],
};

pub const TODO_ADD: Grammar = Grammar {
    head: "task",
    markers: &[optional(FLAG_AUTHOR, "deadline")],
};

pub const BOOKMARK_ADD: Grammar = Grammar {
    head: "book title",
    markers: &[required(FLAG_PAGE, "page")],
};

pub const BOOK_EDIT: Grammar = Grammar {
    head: "book number",
    markers: &[required(FLAG_EDIT, "new title")],
};

pub const CATEGORY_EDIT: Grammar = Grammar {
    head: "category name",
    markers: &[required(FLAG_EDIT, "new category name")],
};

pub const QUOTE_EDIT: Grammar = Grammar {
    head: "quote number",
    markers: &[
        required(FLAG_EDIT, "quote"),
        optional(FLAG_REFERENCE, "reference"),
        optional(FLAG_AUTHOR, "author"),
    ],
};

/// Fields extracted by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    head: String,
    values: BTreeMap<&'static str, String>,
}

impl Fields {
    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Value of a marker the grammar declares as required.
    pub fn required(&self, field: &'static str) -> CommandResult<&str> {
        self.get(field)
            .ok_or(CommandError::MissingRequiredField(field))
    }

    pub fn optional_owned(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }
}

/// Splits `payload` according to `grammar`.
///
/// The head runs up to the first marker found; each marker value runs up to
/// the next marker found, regardless of declaration order.
///
/// # Errors
/// - `MissingRequiredField` when the head is empty, a required marker is
///   absent, or a required marker has an empty value.
pub fn tokenize(grammar: &Grammar, payload: &str) -> CommandResult<Fields> {
    let mut found: Vec<(usize, &Marker)> = grammar
        .markers
        .iter()
        .filter_map(|marker| payload.find(marker.token).map(|pos| (pos, marker)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);

    let head_end = found.first().map_or(payload.len(), |(pos, _)| *pos);
    let head = payload[..head_end].trim();
    if head.is_empty() {
        return Err(CommandError::MissingRequiredField(grammar.head));
    }

    let mut values = BTreeMap::new();
    for (slot, (pos, marker)) in found.iter().enumerate() {
        let start = pos + marker.token.len();
        let end = found
            .get(slot + 1)
            .map_or(payload.len(), |(next, _)| *next)
            .max(start);
        let value = payload[start..end].trim();
        if !value.is_empty() {
            values.insert(marker.field, value.to_string());
        }
    }

    for marker in grammar.markers.iter().filter(|marker| marker.required) {
        if !values.contains_key(marker.field) {
            return Err(CommandError::MissingRequiredField(marker.field));
        }
    }

    Ok(Fields {
        head: head.to_string(),
        values,
    })
}

/// Splits off the first whitespace-delimited token. The rest is returned
/// untouched apart from surrounding whitespace.
pub fn split_leading_token(input: &str) -> Option<(&str, &str)> {
    let caps = LEADING_TOKEN_RE.captures(input)?;
    let token = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((token, rest))
}

pub fn parse_integer(raw: &str) -> CommandResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidNumberFormat(raw.trim().to_string()))
}

/// Converts a user-facing 1-based number into a 0-based index below `len`.
pub fn parse_index(raw: &str, kind: ListKind, len: usize) -> CommandResult<usize> {
    let number = parse_integer(raw)?;
    to_index(number, len).ok_or(CommandError::InvalidIndex {
        kind,
        index: number,
    })
}

pub fn to_index(number: i64, len: usize) -> Option<usize> {
    usize::try_from(number)
        .ok()
        .filter(|number| (1..=len).contains(number))
        .map(|number| number - 1)
}

/// `<score> <bookTitle>` payload used by rating add/edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingArgs {
    pub score: i64,
    pub title: String,
}

pub fn parse_rating_args(payload: &str) -> CommandResult<RatingArgs> {
    let (score, title) =
        split_leading_token(payload).ok_or(CommandError::MissingRequiredField("rating score"))?;
    if title.is_empty() {
        return Err(CommandError::MissingRequiredField("book title"));
    }
    Ok(RatingArgs {
        score: parse_integer(score)?,
        title: title.to_string(),
    })
}

/// `<categoryName> [<bookTitle...>] [<quoteNumber>]` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryArgs {
    pub name: String,
    /// `None` when omitted or given as the empty placeholder.
    pub book_title: Option<String>,
    /// Raw 1-based quote number. `None` when omitted or given as `-1`; any
    /// other value, `0` included, is validated against the quote list later.
    pub quote_number: Option<i64>,
}

impl CategoryArgs {
    pub fn targets_nothing(&self) -> bool {
        self.book_title.is_none() && self.quote_number.is_none()
    }
}

/// Parses a category payload.
///
/// The first token is the category name. A trailing integer token is the
/// quote number; everything between is the book title, joined by single
/// spaces.
pub fn parse_category_args(payload: &str) -> CommandResult<CategoryArgs> {
    let mut tokens: Vec<&str> = payload.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(CommandError::MissingRequiredField("category name"));
    }
    let name = tokens.remove(0).to_string();

    let mut quote_number = None;
    if let Some(last) = tokens.last().copied() {
        if INTEGER_RE.is_match(last) {
            tokens.pop();
            let number = parse_integer(last)?;
            if number != QUOTE_SKIP_SENTINEL {
                quote_number = Some(number);
            }
        }
    }

    let title = tokens.join(" ");
    let book_title = match title.as_str() {
        "" | EMPTY_PLACEHOLDER => None,
        _ => Some(title),
    };

    Ok(CategoryArgs {
        name,
        book_title,
        quote_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_book_title_and_author() {
        let fields = tokenize(&BOOK_ADD, " Harry Potter /by  JK Rowling ").unwrap();
        assert_eq!(fields.head(), "Harry Potter");
        assert_eq!(fields.get("author"), Some("JK Rowling"));
    }

    #[test]
    fn tokenize_requires_author_marker() {
        let err = tokenize(&BOOK_ADD, "Harry Potter").unwrap_err();
        assert_eq!(err, CommandError::MissingRequiredField("author"));
        let err = tokenize(&BOOK_ADD, "Harry Potter /by   ").unwrap_err();
        assert_eq!(err, CommandError::MissingRequiredField("author"));
    }

    #[test]
    fn tokenize_accepts_markers_in_any_order() {
        let fields = tokenize(&QUOTE_ADD, "Stay hungry /by Steve Jobs /from Stanford").unwrap();
        assert_eq!(fields.head(), "Stay hungry");
        assert_eq!(fields.get("author"), Some("Steve Jobs"));
        assert_eq!(fields.get("reference"), Some("Stanford"));
    }

    #[test]
    fn tokenize_splits_on_first_occurrence_only() {
        let fields = tokenize(&BOOK_ADD, "A /by B /by C").unwrap();
        assert_eq!(fields.head(), "A");
        assert_eq!(fields.get("author"), Some("B /by C"));
    }

    #[test]
    fn tokenize_without_optional_markers_keeps_whole_text() {
        let fields = tokenize(&QUOTE_ADD, "just words").unwrap();
        assert_eq!(fields.head(), "just words");
        assert_eq!(fields.get("author"), None);
        assert_eq!(fields.get("reference"), None);
    }

    #[test]
    fn tokenize_rejects_empty_head() {
        let err = tokenize(&QUOTE_ADD, "  /by someone").unwrap_err();
        assert_eq!(err, CommandError::MissingRequiredField("quote"));
    }

    #[test]
    fn category_args_distinguish_skip_sentinel_from_zero() {
        let skipped = parse_category_args("fantasy Harry Potter -1").unwrap();
        assert_eq!(skipped.book_title.as_deref(), Some("Harry Potter"));
        assert_eq!(skipped.quote_number, None);

        let zero = parse_category_args("fantasy - 0").unwrap();
        assert_eq!(zero.book_title, None);
        assert_eq!(zero.quote_number, Some(0));
    }

    #[test]
    fn category_args_with_only_name_target_nothing() {
        let args = parse_category_args("fantasy").unwrap();
        assert_eq!(args.name, "fantasy");
        assert!(args.targets_nothing());
    }

    #[test]
    fn rating_args_report_number_format() {
        let err = parse_rating_args("five Dune").unwrap_err();
        assert_eq!(err, CommandError::InvalidNumberFormat("five".to_string()));
        let err = parse_rating_args("5").unwrap_err();
        assert_eq!(err, CommandError::MissingRequiredField("book title"));
    }

    #[test]
    fn parse_index_is_one_based() {
        assert_eq!(parse_index("1", ListKind::Quote, 2).unwrap(), 0);
        assert!(matches!(
            parse_index("0", ListKind::Quote, 2),
            Err(CommandError::InvalidIndex { index: 0, .. })
        ));
        assert!(matches!(
            parse_index("3", ListKind::Quote, 2),
            Err(CommandError::InvalidIndex { index: 3, .. })
        ));
    }
}
