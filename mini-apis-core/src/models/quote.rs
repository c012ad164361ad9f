use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub quote: String,
    pub name: String,
    pub likes: u64,
}

impl Quote {
    pub fn new(id: u64, quote: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            quote: quote.into(),
            name: name.into(),
            likes: 0,
        }
    }
}

/// Root document persisted by the quote repository.
///
/// `max_likes` is a high-water mark: it only ever grows, and is not
/// recomputed from the current quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub max_likes: u64,
}
