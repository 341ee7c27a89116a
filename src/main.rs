use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use smartchat_core::config::{ChatConfig, InputMode};
use smartchat_core::logging::{init_logging, LoggingConfig};
use smartchat_core::models::{PortfolioProfile, RecommendationReport, RecommendedStock};
use smartchat_core::services::{chat_service, report_composer};
use smartchat_core::ChatState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = ChatConfig::from_env();
    config.validate()?;
    let state = ChatState::from_config(&config)?;

    let output = if std::env::args().any(|arg| arg == "--sample") {
        report_composer::compose_report(&sample_report(), state.decoder.anchors())?
    } else {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read stdin")?;

        match config.mode()? {
            InputMode::Reply => serde_json::to_string_pretty(&state.decoder.decode(&input))?,
            InputMode::History => {
                chat_service::hydrate_history(&state, &input)?;
                serde_json::to_string_pretty(&chat_service::transcript(&state))?
            }
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    Ok(())
}

fn sample_report() -> RecommendationReport {
    RecommendationReport {
        profile: PortfolioProfile {
            risk: "medium".to_string(),
            horizon: "long-term".to_string(),
            sectors: vec!["Information Technology".to_string(), "Health Care".to_string()],
        },
        stocks: vec![
            RecommendedStock { ticker: "MSFT".to_string(), score: 428.31 },
            RecommendedStock { ticker: "AAPL".to_string(), score: 196.02 },
            RecommendedStock { ticker: "UNH".to_string(), score: 512.77 },
        ],
        insights: "Large-cap names with steady earnings fit a medium risk profile.".to_string(),
    }
}
