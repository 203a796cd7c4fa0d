use crate::domain::values::channel::Channel;
use crate::domain::values::price::normalize;

/// One raw price signal on its way through the pipeline. Ephemeral: built
/// from a filtered snippet, consumed by the reconciler in the same pass,
/// never persisted.
#[derive(Debug, Clone)]
pub struct PriceObservation {
    pub raw: String,
    pub price: Option<f64>,
    pub channel: Channel,
}

impl PriceObservation {
    /// A listing snippet is full card text, not a bare price; model
    /// numbers and memory sizes are digits too. Only a `$`-marked amount
    /// counts as the price; a snippet without one yields an invalid
    /// observation.
    pub fn from_snippet(snippet: &str, channel: Channel) -> Self {
        Self {
            raw: snippet.to_string(),
            price: dollar_amount(snippet).and_then(|tok| normalize(&tok)),
            channel,
        }
    }

    /// An observation with no extractable number contributes nothing.
    pub fn is_valid(&self) -> bool {
        self.price.is_some()
    }
}

/// First `$`-prefixed amount in the text ("$1,299.00", "$ 649"), as the
/// raw token; `None` when no dollar sign introduces digits.
fn dollar_amount(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '$' {
            let mut j = i + 1;
            while j < chars.len() && chars[j] == ' ' {
                j += 1;
            }
            let start = j;
            while j < chars.len()
                && (chars[j].is_ascii_digit() || chars[j] == ',' || chars[j] == '.')
            {
                j += 1;
            }
            let token: String = chars[start..j].iter().collect();
            if token.chars().any(|c| c.is_ascii_digit()) {
                return Some(token);
            }
            i = j;
        }
        i += 1;
    }
    None
}
