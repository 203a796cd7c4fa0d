use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One price source category. New-market and used-market prices come from
/// live listings; the launch price is a fixed MSRP scraped from spec pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    New,
    Used,
    Launch,
}

/// Listing text markers that disqualify a snippet for the *new* channel.
/// Single-word markers are matched as whole words, so "used" does not
/// catch "unused".
const NEW_CONDITION_MARKERS: &[&str] = &["used", "refurbished", "renewed", "open box"];

/// Listing text markers that disqualify a snippet for the *used* channel
/// (salvage/parts listings that are not genuine working-card sales).
const USED_CONDITION_MARKERS: &[&str] = &[
    "parts only",
    "for parts",
    "broken",
    "box only",
    "read description",
];

impl Channel {
    /// Condition markers that make a listing invalid for this channel.
    /// Launch prices do not come from listings, so they have none.
    pub fn condition_markers(&self) -> &'static [&'static str] {
        match self {
            Channel::New => NEW_CONDITION_MARKERS,
            Channel::Used => USED_CONDITION_MARKERS,
            Channel::Launch => &[],
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::New => write!(f, "new"),
            Channel::Used => write!(f, "used"),
            Channel::Launch => write!(f, "launch"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Channel::New),
            "used" => Ok(Channel::Used),
            "launch" | "msrp" => Ok(Channel::Launch),
            _ => Err(format!("Unknown channel: {s}")),
        }
    }
}
