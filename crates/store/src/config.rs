//! Store configuration.

use reelhouse_core::{DomainError, DomainResult};
use reelhouse_parties::DEFAULT_BUCKETS;

/// Media tag of DVDs, the only media the store carries by default.
pub const DVD: char = 'D';

/// Tunables of a [`crate::Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The one media tag borrow/return requests must carry.
    pub media_tag: char,
    /// Bucket count of the customer index (fixed for the store's lifetime).
    pub index_buckets: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            media_tag: DVD,
            index_buckets: DEFAULT_BUCKETS,
        }
    }
}

impl StoreConfig {
    pub fn with_media_tag(mut self, media_tag: char) -> Self {
        self.media_tag = media_tag;
        self
    }

    pub fn with_index_buckets(mut self, buckets: usize) -> Self {
        self.index_buckets = buckets;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.media_tag.is_whitespace() || self.media_tag.is_control() {
            return Err(DomainError::validation("media tag must be a visible character"));
        }
        if self.index_buckets == 0 {
            return Err(DomainError::validation("index bucket count must be non-zero"));
        }
        Ok(())
    }
}
