use crate::errors::ChatError;
use crate::models::{AnchorTable, RecommendationReport, RecommendedStock};

const REPORT_NOTE: &str = "Your report is saved in the Reports section.";

/// Render a recommendation report the way the assistant service lays it out.
///
/// The portfolio profile is written as pretty JSON under the portfolio anchor,
/// each stock becomes a plain `- TICKER (Score: 0.00)` line, and the insights
/// paragraph is closed by the report note anchor. Plain lines carry no bold
/// label, so decoding this text yields no recommendation lines.
pub fn compose_report(
    report: &RecommendationReport,
    anchors: &AnchorTable,
) -> Result<String, ChatError> {
    render(report, anchors, |stock| {
        format!("- {} (Score: {:.2})", stock.ticker, stock.score)
    })
}

/// Same layout as [`compose_report`] with each ticker bolded as
/// `- **TICKER** (Score: 0.00)`, the form the recommendation scan picks up.
pub fn compose_highlighted_report(
    report: &RecommendationReport,
    anchors: &AnchorTable,
) -> Result<String, ChatError> {
    render(report, anchors, |stock| {
        format!("- **{}** (Score: {:.2})", stock.ticker, stock.score)
    })
}

fn render<F>(report: &RecommendationReport, anchors: &AnchorTable, line: F) -> Result<String, ChatError>
where
    F: Fn(&RecommendedStock) -> String,
{
    let profile = serde_json::to_string_pretty(&report.profile).map_err(ChatError::Serialization)?;

    let lines = report.stocks.iter().map(line).collect::<Vec<_>>().join("\n");

    Ok(format!(
        "{}\n{}\n\n{}\n{}\n\n{}\n{}\n\n{} {}",
        anchors.portfolio,
        profile,
        anchors.recommendations,
        lines,
        anchors.insights,
        report.insights.trim(),
        anchors.report_note,
        REPORT_NOTE
    ))
}
