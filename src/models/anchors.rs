use serde::Serialize;

/// Literal phrases the assistant service uses to delimit its report.
///
/// Matching is byte-for-byte, so every field must be exactly what the service
/// emits. New service formats get a new table rather than edits to `V1`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AnchorTable {
    pub version: &'static str,
    pub portfolio: &'static str,
    pub recommendations: &'static str,
    pub insights: &'static str,
    pub report_note: &'static str,
    pub user_prefix: &'static str,
    pub assistant_prefix: &'static str,
}

impl AnchorTable {
    pub const V1: AnchorTable = AnchorTable {
        version: "v1",
        portfolio: "**Your Portfolio**",
        recommendations: "**Top 5 Recommended Stocks:**",
        insights: "🧠 LLM Insights:",
        report_note: "📄",
        user_prefix: "You: ",
        assistant_prefix: "Bot: ",
    };

    /// Look up a table by its version tag
    pub fn by_version(version: &str) -> Option<AnchorTable> {
        match version {
            "v1" => Some(Self::V1),
            _ => None,
        }
    }

    /// User prefix without its trailing space, used for shape detection
    pub fn user_marker(&self) -> &'static str {
        self.user_prefix.trim_end()
    }
}

impl Default for AnchorTable {
    fn default() -> Self {
        AnchorTable::V1
    }
}
