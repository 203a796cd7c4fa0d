use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Render resolution a value estimate is computed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1080p")]
    R1080p,
    #[serde(rename = "1440p")]
    R1440p,
    #[serde(rename = "4k")]
    R4k,
}

/// Reference frame rates for the baseline device (RTX 4060 Mobile, the most
/// common card in the Steam survey) at Ultra settings. Other cards scale
/// linearly off these by their relative performance percentage.
#[derive(Debug, Clone, Serialize)]
pub struct AnchorFps {
    pub r1080p: f64,
    pub r1440p: f64,
    pub r4k: f64,
}

impl Default for AnchorFps {
    fn default() -> Self {
        Self {
            r1080p: 64.0,
            r1440p: 51.0,
            r4k: 44.2,
        }
    }
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::R1080p, Resolution::R1440p, Resolution::R4k];

    pub fn anchor_fps(&self, anchors: &AnchorFps) -> f64 {
        match self {
            Resolution::R1080p => anchors.r1080p,
            Resolution::R1440p => anchors.r1440p,
            Resolution::R4k => anchors.r4k,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::R1080p => write!(f, "1080p"),
            Resolution::R1440p => write!(f, "1440p"),
            Resolution::R4k => write!(f, "4k"),
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1080p" | "1080" | "fhd" => Ok(Resolution::R1080p),
            "1440p" | "1440" | "qhd" => Ok(Resolution::R1440p),
            "4k" | "2160p" | "uhd" => Ok(Resolution::R4k),
            _ => Err(format!("Unknown resolution: {s}")),
        }
    }
}
