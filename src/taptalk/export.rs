//! Shareable plain-text rendering of a profile's themes and weekly insight.

use crate::aggregate::TagCount;

const CLOSING: &str = "Reflect. Adjust. Grow.\n– Sent from TapTalk 💓";

/// Render the share message. `frequency` is used in the order given.
pub fn format_share_text(profile_name: &str, frequency: &[TagCount], insight_text: &str) -> String {
    let theme_lines = frequency
        .iter()
        .map(|t| format!("• {} – {}×", t.tag, t.count))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📝 TapTalk Insight – {}\n\n\
         In the past week, these themes came up the most:\n\n\
         {}\n\n\
         ✨ Weekly Insight:\n\
         \"{}\"\n\n\
         {}",
        profile_name, theme_lines, insight_text, CLOSING
    )
}
