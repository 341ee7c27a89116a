//! Decoding of assistant replies and the conversation log they are shown in.
//!
//! The assistant embeds its portfolio report in plain text, delimited by
//! literal anchor phrases. [`ResponseDecoder`] recovers the report pieces and
//! falls back to freeform text whenever they are missing.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use errors::ChatError;
pub use models::{AnchorTable, ConversationTurn, DecodedResponse, FailedReply, NewTurn, TurnRole};
pub use services::response_decoder::ResponseDecoder;
pub use services::turn_normalizer::{RawTurn, TurnNormalizer};
pub use state::ChatState;
pub use store::ConversationLog;
