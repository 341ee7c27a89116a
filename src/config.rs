use crate::errors::ChatError;
use crate::models::{AnchorTable, RecommendationScope};
use crate::services::response_decoder::ResponseDecoder;
use crate::services::turn_normalizer::TurnNormalizer;

/// What the CLI expects on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// A single assistant reply
    #[default]
    Reply,
    /// A JSON array of history entries
    History,
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reply" => Ok(InputMode::Reply),
            "history" => Ok(InputMode::History),
            _ => Err(format!("Invalid input mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub anchor_version: String,
    pub recommendation_scope: String,
    pub input_mode: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            anchor_version: "v1".to_string(),
            recommendation_scope: "document".to_string(),
            input_mode: "reply".to_string(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            anchor_version: std::env::var("CHAT_ANCHOR_VERSION")
                .unwrap_or(defaults.anchor_version),
            recommendation_scope: std::env::var("CHAT_RECOMMENDATION_SCOPE")
                .unwrap_or(defaults.recommendation_scope),
            input_mode: std::env::var("CHAT_INPUT_MODE")
                .unwrap_or(defaults.input_mode),
        }
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        self.anchors()?;
        self.scope()?;
        self.mode()?;
        Ok(())
    }

    pub fn anchors(&self) -> Result<AnchorTable, ChatError> {
        AnchorTable::by_version(&self.anchor_version).ok_or_else(|| {
            ChatError::Config(format!("Unknown anchor version: {}", self.anchor_version))
        })
    }

    pub fn scope(&self) -> Result<RecommendationScope, ChatError> {
        self.recommendation_scope
            .to_lowercase()
            .parse()
            .map_err(ChatError::Config)
    }

    pub fn mode(&self) -> Result<InputMode, ChatError> {
        self.input_mode.to_lowercase().parse().map_err(ChatError::Config)
    }

    pub fn decoder(&self) -> Result<ResponseDecoder, ChatError> {
        Ok(ResponseDecoder::new(self.anchors()?).with_scope(self.scope()?))
    }

    pub fn normalizer(&self) -> Result<TurnNormalizer, ChatError> {
        Ok(TurnNormalizer::new(self.anchors()?))
    }
}
