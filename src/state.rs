use crate::config::ChatConfig;
use crate::errors::ChatError;
use crate::services::response_decoder::ResponseDecoder;
use crate::services::turn_normalizer::TurnNormalizer;
use crate::store::ConversationLog;

/// Everything the chat operations need, shared by cloning
#[derive(Clone, Default)]
pub struct ChatState {
    pub log: ConversationLog,
    pub decoder: ResponseDecoder,
    pub normalizer: TurnNormalizer,
}

impl ChatState {
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Ok(Self {
            log: ConversationLog::new(),
            decoder: config.decoder()?,
            normalizer: config.normalizer()?,
        })
    }
}
