pub mod anchor_extractor;
pub mod chat_service;
pub mod report_composer;
pub mod response_decoder;
pub mod turn_normalizer;
