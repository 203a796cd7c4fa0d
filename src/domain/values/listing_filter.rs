//! Listing snippet filtering.
//!
//! Search-result pages are noisy: sponsored placements, refurbished cards in
//! the new-condition results, adjacent models ("RTX 3090" cards surfacing on
//! an "RTX 3080" search), and accessories. A snippet must survive every
//! check before its price is worth extracting.

use crate::domain::values::channel::Channel;

/// Vendor/brand words shared across a product line. These never
/// distinguish one card from another, so matching skips them: a search
/// for "GeForce RTX 3080" must still require "rtx" and "3080" but not
/// "geforce".
const VENDOR_STOPLIST: &[&str] = &["geforce", "radeon", "nvidia", "amd"];

/// Promotional placements carry prices unrelated to the search.
const SPONSORED_MARKER: &str = "sponsored";

#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Stop scanning once this many valid snippets are found. Bounds cost
    /// on long result pages; truncates the sample, never changes which
    /// snippets qualify.
    pub max_samples: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { max_samples: 5 }
    }
}

/// Marker hit test. Single-word markers must match a whole word (the
/// "used" inside "unused" is not a condition); multi-word markers match
/// as phrases. `text` must already be lowercased.
fn has_marker(text: &str, marker: &str) -> bool {
    if marker.contains(' ') {
        return text.contains(marker);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == marker)
}

/// Lowercased words of the product name with vendor tokens removed.
pub fn distinguishing_tokens(product_name: &str) -> Vec<String> {
    product_name
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| !VENDOR_STOPLIST.contains(&w.as_str()))
        .collect()
}

/// Keep snippets that are genuine matches for `product_name` on `channel`.
///
/// A snippet passes when it has no condition marker for the channel, is not
/// sponsored, and contains every distinguishing token of the product name
/// (all checks case-insensitive). Scanning stops early at
/// `config.max_samples` matches.
pub fn filter_listings<'a>(
    snippets: &'a [String],
    product_name: &str,
    channel: Channel,
    config: &FilterConfig,
) -> Vec<&'a str> {
    let tokens = distinguishing_tokens(product_name);
    let mut kept = Vec::new();

    for snippet in snippets {
        let text = snippet.to_lowercase();

        if channel
            .condition_markers()
            .iter()
            .any(|m| has_marker(&text, m))
        {
            continue;
        }
        if text.contains(SPONSORED_MARKER) {
            continue;
        }
        if !tokens.iter().all(|t| text.contains(t.as_str())) {
            continue;
        }

        kept.push(snippet.as_str());
        if kept.len() >= config.max_samples {
            break;
        }
    }

    kept
}
