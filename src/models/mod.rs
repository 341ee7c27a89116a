mod anchors;
mod conversation;
mod decoded;

pub use anchors::AnchorTable;
pub use conversation::{ConversationTurn, FailedReply, NewTurn, TurnRole};
pub use decoded::{
    DecodedResponse, PortfolioProfile, RecommendationReport, RecommendationScope,
    RecommendedStock, TranscriptEntry,
};
