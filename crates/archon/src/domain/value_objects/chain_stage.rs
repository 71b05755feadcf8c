//! ChainStage - the two positions in the model chain

use serde::{Deserialize, Serialize};

/// Stage of the two-step model chain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChainStage {
    /// First stage: structured architectural analysis
    Reasoning,
    /// Second stage: natural-language narration of the analysis
    Explanation,
}

impl std::fmt::Display for ChainStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainStage::Reasoning => write!(f, "reasoning"),
            ChainStage::Explanation => write!(f, "explanation"),
        }
    }
}

impl std::str::FromStr for ChainStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reasoning" => Ok(ChainStage::Reasoning),
            "explanation" => Ok(ChainStage::Explanation),
            _ => Err(format!("Unknown chain stage: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_round_trip() {
        for stage in [ChainStage::Reasoning, ChainStage::Explanation] {
            assert_eq!(ChainStage::from_str(&stage.to_string()).unwrap(), stage);
        }
    }

    #[test]
    fn test_unknown_stage_rejected() {
        assert!(ChainStage::from_str("moderation").is_err());
    }
}
