use chrono::{DateTime, Utc};
use colored::Colorize;
use taptalk::aggregate::TrafficLevel;
use taptalk::api::{CmdMessage, MessageLevel};
use taptalk::commands::{ProfileOverview, ProfileSummary, SummaryWindow};
use taptalk::insight::Insight;
use taptalk::model::Profile;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const COUNT_WIDTH: usize = 10;
const TIME_WIDTH: usize = 14;
const TRAFFIC_DOT: &str = "●";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn traffic_dot(level: TrafficLevel) -> colored::ColoredString {
    match hex_to_rgb(level.hex_color()) {
        Some((r, g, b)) => TRAFFIC_DOT.truecolor(r, g, b),
        None => TRAFFIC_DOT.normal(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub(super) fn print_profiles(rows: &[ProfileOverview]) {
    for row in rows {
        let idx = format!("{:>3}. ", row.index);
        let name = truncate_to_width(&row.name, NAME_WIDTH);
        let padding = NAME_WIDTH.saturating_sub(name.width());
        let count = format!("{:>width$}", plural(row.log_count, "log"), width = COUNT_WIDTH);
        let last = match row.last_logged_at {
            Some(ts) => format_time_ago(ts),
            None => format!("{:>width$}", "never", width = TIME_WIDTH),
        };

        println!(
            "{}{} {}{}{}{}",
            idx,
            traffic_dot(row.traffic),
            name,
            " ".repeat(padding),
            count,
            last.dimmed()
        );
    }
}

pub(super) fn print_tags(profile: &Profile) {
    println!("{}", profile.name.bold());
    for (i, tag) in profile.tags.iter().enumerate() {
        println!("{:>3}. {}", i + 1, tag);
    }
}

pub(super) fn print_summary(summary: &ProfileSummary) {
    let heading = match summary.window {
        SummaryWindow::All => "all time",
        SummaryWindow::Week => "past 7 days",
        SummaryWindow::Month => "this month",
    };
    println!(
        "{} {} {}",
        traffic_dot(summary.traffic),
        summary.profile_name.bold(),
        format!("({})", heading).dimmed()
    );
    println!("  Today: {}", plural(summary.today_count, "conflict"));
    println!("  Traffic: {}", summary.traffic);
    if let Some(top) = &summary.top_theme {
        println!("  Most common: {} ({}×)", top.tag, top.count);
    }

    if summary.themes.is_empty() {
        return;
    }
    println!();
    for theme in &summary.themes {
        println!("  {} – {}×", theme.tag, theme.count);
        println!("    {}", theme.message.dimmed());
    }
}

pub(super) fn print_insight(insight: &Insight) {
    if !insight.date_range_label.is_empty() {
        println!("🗓️ {}", insight.date_range_label.dimmed());
        println!();
    }
    println!("{}", insight.text);
}

pub(super) fn print_config(entries: &[(String, Option<String>)]) {
    for (key, value) in entries {
        match value {
            Some(v) => println!("{} = {}", key, v),
            None => println!("{} = {}", key, "(not set)".dimmed()),
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
