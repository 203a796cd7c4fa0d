use crate::domain::error::DomainError;
use crate::domain::ports::listing_source::ListingSource;
use crate::domain::values::channel::Channel;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory listing source seeded by hand. Backs tests and offline runs
/// where listing text was captured ahead of time.
#[derive(Default)]
pub struct StaticListingSource {
    snippets: Mutex<HashMap<(String, Channel), Vec<String>>>,
}

impl StaticListingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, product_name: &str, channel: Channel, snippet: &str) {
        let mut map = self.snippets.lock().unwrap_or_else(|e| e.into_inner());
        map.entry((product_name.to_string(), channel))
            .or_default()
            .push(snippet.to_string());
    }

    pub fn push_all(&self, product_name: &str, channel: Channel, snippets: &[&str]) {
        for s in snippets {
            self.push(product_name, channel, s);
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for StaticListingSource {
    async fn fetch(
        &self,
        product_name: &str,
        channel: Channel,
    ) -> Result<Vec<String>, DomainError> {
        let map = self.snippets.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map
            .get(&(product_name.to_string(), channel))
            .cloned()
            .unwrap_or_default())
    }
}
