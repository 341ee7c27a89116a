use serde::{Deserialize, Serialize};

use crate::models::conversation::ConversationTurn;

/// Result of interpreting one assistant reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedResponse {
    /// Plain prose, rendered as markdown
    Freeform { text: String },
    /// Report recovered from the anchor phrases
    Structured {
        /// Rendered as a preformatted block, never parsed further
        portfolio_block: Option<String>,
        /// Labels in order of appearance
        recommendation_lines: Vec<String>,
        insights_text: Option<String>,
    },
}

impl DecodedResponse {
    pub fn is_structured(&self) -> bool {
        matches!(self, DecodedResponse::Structured { .. })
    }

    pub fn recommendation_lines(&self) -> &[String] {
        match self {
            DecodedResponse::Structured { recommendation_lines, .. } => recommendation_lines,
            DecodedResponse::Freeform { .. } => &[],
        }
    }
}

/// Which part of the reply is scanned for `- **label**` lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationScope {
    /// The whole reply, including text before the portfolio anchor
    #[default]
    Document,
    /// Only the region after the recommendations anchor and before insights
    Report,
}

impl std::str::FromStr for RecommendationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(RecommendationScope::Document),
            "report" => Ok(RecommendationScope::Report),
            _ => Err(format!("Invalid recommendation scope: {}", s)),
        }
    }
}

/// A stored turn together with the way it should be rendered
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptEntry {
    pub turn: ConversationTurn,
    pub rendered: DecodedResponse,
}

/// Portfolio preferences echoed at the top of a recommendation report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioProfile {
    pub risk: String,
    pub horizon: String,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedStock {
    pub ticker: String,
    pub score: f64,
}

/// Input for rendering a report in the assistant's anchor format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationReport {
    pub profile: PortfolioProfile,
    pub stocks: Vec<RecommendedStock>,
    pub insights: String,
}
