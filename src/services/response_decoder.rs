use tracing::{debug, trace};

use crate::models::{AnchorTable, DecodedResponse, RecommendationScope};
use crate::services::anchor_extractor;

/// Turns raw assistant text into a [`DecodedResponse`].
///
/// Holds no state besides its configuration, so one instance can be shared
/// freely and `decode` gives the same answer for the same input every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseDecoder {
    anchors: AnchorTable,
    scope: RecommendationScope,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new(AnchorTable::V1)
    }
}

impl ResponseDecoder {
    pub fn new(anchors: AnchorTable) -> Self {
        Self {
            anchors,
            scope: RecommendationScope::Document,
        }
    }

    /// Pick where recommendation lines are collected from
    pub fn with_scope(mut self, scope: RecommendationScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    pub fn scope(&self) -> RecommendationScope {
        self.scope
    }

    /// Decode one reply. Never fails: text without the portfolio anchor comes
    /// back untouched as `Freeform`.
    pub fn decode(&self, text: &str) -> DecodedResponse {
        if text.trim().is_empty() {
            return DecodedResponse::Freeform { text: String::new() };
        }

        if !text.contains(self.anchors.portfolio) {
            trace!("No portfolio anchor, decoding {} bytes as freeform", text.len());
            return DecodedResponse::Freeform { text: text.to_string() };
        }

        let portfolio_block = anchor_extractor::between(
            text,
            self.anchors.portfolio,
            Some(self.anchors.recommendations),
        );

        let recommendation_lines = match self.scope {
            RecommendationScope::Document => anchor_extractor::find_all_lines(text),
            RecommendationScope::Report => anchor_extractor::find_lines_between(
                text,
                self.anchors.recommendations,
                Some(self.anchors.insights),
            ),
        };

        let insights_text = if text.contains(self.anchors.insights) {
            anchor_extractor::between(text, self.anchors.insights, Some(self.anchors.report_note))
        } else {
            None
        };

        debug!(
            "Decoded structured reply: {} recommendation(s), insights: {}",
            recommendation_lines.len(),
            insights_text.is_some()
        );

        DecodedResponse::Structured {
            portfolio_block,
            recommendation_lines,
            insights_text,
        }
    }
}
