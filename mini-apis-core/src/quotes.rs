//! Quote repository for the quotemaster service.
//!
//! Quotes are addressed by their position in the document. New quotes are
//! always appended, so a quote's `id` is its index.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::seq::IndexedRandom;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::error::QuoteError;
use crate::models::{Quote, QuoteDocument};
use crate::store::{JsonStore, QUOTES_DEFAULT_JSON};

/// Hash of the reset password shipped with quotemaster.
pub const DEFAULT_RESET_HASH: &str = "dX2+ujAOKQmKLSaOE7DXKRcz832YgaJupwXe0Q5Sqnw=";

pub const MAX_QUOTE_LEN: usize = 400;
pub const MAX_NAME_LEN: usize = 40;

/// Share of `max_likes` a quote needs to count as popular.
const POPULAR_RATIO: f64 = 0.75;

/// Returns base64(SHA-256(password)), the format of the stored reset hash.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    STANDARD.encode(hasher.finalize())
}

pub struct QuoteRepository {
    store: JsonStore<QuoteDocument>,
    doc: QuoteDocument,
    reset_hash: String,
}

impl QuoteRepository {
    /// Opens the quote document at `path`, creating it from the bundled
    /// default if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>, reset_hash: impl Into<String>) -> Result<Self, QuoteError> {
        let (store, doc) = JsonStore::<QuoteDocument>::open(path, QUOTES_DEFAULT_JSON)?;
        tracing::info!(
            "Loaded {} quote(s) from {}",
            doc.quotes.len(),
            store.path().display()
        );
        Ok(Self {
            store,
            doc,
            reset_hash: reset_hash.into(),
        })
    }

    /// All quotes, in id order.
    pub fn quotes(&self) -> &[Quote] {
        &self.doc.quotes
    }

    pub fn len(&self) -> usize {
        self.doc.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.quotes.is_empty()
    }

    pub fn max_likes(&self) -> u64 {
        self.doc.max_likes
    }

    /// Picks a quote uniformly at random.
    pub fn random_quote(&self) -> Result<&Quote, QuoteError> {
        self.doc
            .quotes
            .choose(&mut rand::rng())
            .ok_or(QuoteError::EmptyCollection)
    }

    /// Picks a quote at random among those with at least 75% of `max_likes`.
    pub fn popular_quote(&self) -> Result<&Quote, QuoteError> {
        let threshold = self.doc.max_likes as f64 * POPULAR_RATIO;
        let popular: Vec<&Quote> = self
            .doc
            .quotes
            .iter()
            .filter(|q| q.likes as f64 >= threshold)
            .collect();

        popular
            .choose(&mut rand::rng())
            .copied()
            .ok_or(QuoteError::EmptyCollection)
    }

    pub fn quote_by_id(&self, id: i64) -> Result<&Quote, QuoteError> {
        let index = self.index(id)?;
        Ok(&self.doc.quotes[index])
    }

    /// Adds one like to a quote and raises `max_likes` if it is overtaken.
    pub fn like_quote(&mut self, id: i64) -> Result<(), QuoteError> {
        let index = self.index(id)?;

        let mut doc = self.doc.clone();
        let quote = &mut doc.quotes[index];
        quote.likes += 1;
        if quote.likes > doc.max_likes {
            doc.max_likes += 1;
        }

        self.commit(doc)
    }

    /// Appends a new quote and returns its id.
    pub fn new_quote(&mut self, text: &str, name: &str) -> Result<u64, QuoteError> {
        if !(1..=MAX_QUOTE_LEN).contains(&text.chars().count()) {
            return Err(QuoteError::InvalidQuote);
        }
        if !(1..=MAX_NAME_LEN).contains(&name.chars().count()) {
            return Err(QuoteError::InvalidName);
        }

        let id = self.doc.quotes.len() as u64;
        let mut doc = self.doc.clone();
        doc.quotes.push(Quote::new(id, text, name));
        self.commit(doc)?;

        tracing::info!("Added quote {} by {}", id, name);
        Ok(id)
    }

    /// Replaces all quotes with the bundled default document.
    pub fn reset_quotes(&mut self, password: &str) -> Result<(), QuoteError> {
        if hash_password(password) != self.reset_hash {
            tracing::warn!("Rejected quote reset with invalid password");
            return Err(QuoteError::InvalidPassword);
        }

        let doc = self.store.default_document()?;
        self.commit(doc)?;

        tracing::info!("Reset quotes to default ({} quote(s))", self.doc.quotes.len());
        Ok(())
    }

    /// Saves `doc` and makes it current. On failure the current document is
    /// left untouched.
    fn commit(&mut self, doc: QuoteDocument) -> Result<(), QuoteError> {
        self.store.save(&doc)?;
        self.doc = doc;
        Ok(())
    }

    fn index(&self, id: i64) -> Result<usize, QuoteError> {
        usize::try_from(id)
            .ok()
            .filter(|&index| index < self.doc.quotes.len())
            .ok_or(QuoteError::InvalidId)
    }
}
