//! Listing normalization shared by the channel and event endpoints.

use serde_json::Value;

use crate::api::raw::{self, MissingField};

/// A listing endpoint answers with either a bare JSON array or a paginated
/// envelope. Callers get one well-typed sum instead of two ambiguous shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    /// The bare-array shape; no pagination metadata was present.
    Unpaginated(Vec<T>),
    /// The envelope shape, carrying the collection plus its metadata.
    Paginated {
        items: Vec<T>,
        total: u64,
        page: Option<u32>,
        per_page: Option<u32>,
    },
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Unpaginated(items) | Self::Paginated { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Unpaginated(items) | Self::Paginated { items, .. } => items,
        }
    }

    /// Declared total for the paginated shape, element count otherwise.
    pub fn total(&self) -> u64 {
        match self {
            Self::Unpaginated(items) => items.len() as u64,
            Self::Paginated { total, .. } => *total,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Classify a raw listing payload and convert its elements.
///
/// A bare array becomes [`Listing::Unpaginated`]; an object holding the
/// named collection key becomes [`Listing::Paginated`] with `total`
/// defaulting to the element count and `page`/`per_page` falling back to the
/// endpoint's defaults; any other shape becomes an empty unpaginated listing
/// rather than an error.
pub(crate) fn normalize_listing<T>(
    data: &Value,
    collection: &str,
    fallback_page: Option<u32>,
    fallback_per_page: Option<u32>,
    convert: impl Fn(&Value) -> Result<T, MissingField>,
) -> Result<Listing<T>, MissingField> {
    if let Some(elements) = data.as_array() {
        let items = elements.iter().map(&convert).collect::<Result<_, _>>()?;
        return Ok(Listing::Unpaginated(items));
    }

    if let Some(elements) = data.get(collection).and_then(Value::as_array) {
        let items: Vec<T> = elements.iter().map(&convert).collect::<Result<_, _>>()?;
        return Ok(Listing::Paginated {
            total: raw::unsigned(data, "total").unwrap_or(items.len() as u64),
            page: raw::unsigned(data, "page").map(|p| p as u32).or(fallback_page),
            per_page: raw::unsigned(data, "per_page")
                .map(|p| p as u32)
                .or(fallback_per_page),
            items,
        });
    }

    Ok(Listing::Unpaginated(Vec::new()))
}
