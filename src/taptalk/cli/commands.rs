//! # CLI Layer
//!
//! This module is **one possible UI client** for taptalk. It is the only place that
//! knows about terminal I/O, argument parsing, stdin confirmation and the clipboard.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the data directory, loads config, builds the API
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::render::{
    print_config, print_insight, print_messages, print_profiles, print_summary, print_tags,
};
use super::setup::{Cli, Commands, TagCommands, TagsArgs};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taptalk::api::{CmdResult, ConfigAction, SummaryWindow, TaptalkApi};
use taptalk::commands::helpers::resolve_profile;
use taptalk::config::TaptalkConfig;
use taptalk::error::{Result, TaptalkError};
use taptalk::insight::openai::OpenAiClient;
use taptalk::share::copy_to_clipboard;
use taptalk::store::fs_backend::FsBackend;
use taptalk::store::ProfileStore;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the data directory.
const HOME_ENV: &str = "TAPTALK_HOME";

struct AppContext {
    api: TaptalkApi<FsBackend>,
    config: TaptalkConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    if let Some(welcome) = ctx.api.intro()? {
        println!("{}\n", welcome);
    }

    match cli.command {
        None | Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Add { name }) => handle_add(&mut ctx, &name.join(" ")),
        Some(Commands::Delete { profile, yes }) => handle_delete(&mut ctx, &profile, yes),
        Some(Commands::Log { profile, tag }) => handle_log(&mut ctx, &profile, &tag.join(" ")),
        Some(Commands::Tags(TagsArgs { action, profile })) => match action {
            Some(TagCommands::Add { profile, tag }) => {
                let result = ctx.api.add_tag(&profile, &tag.join(" "))?;
                print_messages(&result.messages);
                Ok(())
            }
            Some(TagCommands::Remove { profile, tag }) => {
                let result = ctx.api.remove_tag(&profile, &tag.join(" "))?;
                print_messages(&result.messages);
                Ok(())
            }
            // clap requires the profile when no action is given
            None => handle_tags(&ctx, profile.as_deref().unwrap_or_default()),
        },
        Some(Commands::Summary {
            profile,
            month,
            week,
        }) => {
            let window = if month {
                SummaryWindow::Month
            } else if week {
                SummaryWindow::Week
            } else {
                SummaryWindow::All
            };
            handle_summary(&ctx, &profile, window)
        }
        Some(Commands::Insight {
            profile,
            share,
            print,
        }) => handle_insight(&ctx, &profile, share, print),
        Some(Commands::Share {
            profile,
            insight,
            print,
        }) => handle_share(&ctx, &profile, &insight, print),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; that one wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "taptalk", "taptalk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TaptalkError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = TaptalkConfig::load(&data_dir)?;
    let store = ProfileStore::load(FsBackend::new(&data_dir))?;

    Ok(AppContext {
        api: TaptalkApi::new(store, data_dir),
        config,
    })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_profiles()?;
    print_profiles(&result.listed_profiles);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.create_profile(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selector: &str, yes: bool) -> Result<()> {
    if !yes {
        let profile = resolve_profile(ctx.api.store(), selector, &Local::now())?;
        let prompt = format!(
            "Delete {} and all {} logged conflicts? [y/N] ",
            profile.name,
            profile.conflicts.len()
        );
        if !confirm(&prompt)? {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let result = ctx.api.delete_profile(selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn handle_log(ctx: &mut AppContext, selector: &str, tag: &str) -> Result<()> {
    let result = ctx.api.log_conflict(selector, tag)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.list_tags(selector)?;
    if let Some(profile) = result.affected_profiles.first() {
        print_tags(profile);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_summary(ctx: &AppContext, selector: &str, window: SummaryWindow) -> Result<()> {
    let result = ctx.api.summary(selector, window)?;
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_insight(ctx: &AppContext, selector: &str, share: bool, print: bool) -> Result<()> {
    let client = OpenAiClient::from_config(&ctx.config)
        .map_err(|e| TaptalkError::Api(format!("Could not set up the insight client: {}", e)))?;

    let result = ctx.api.insight(&client, selector)?;
    if let Some(insight) = &result.insight {
        print_insight(insight);
    }
    print_messages(&result.messages);

    if share || print {
        deliver_share_text(&result, print);
    }
    Ok(())
}

fn handle_share(ctx: &AppContext, selector: &str, insight_text: &str, print: bool) -> Result<()> {
    let result = ctx.api.share_text(selector, insight_text)?;
    deliver_share_text(&result, print);
    print_messages(&result.messages);
    Ok(())
}

/// Prints the share text, or copies it and falls back to printing when no clipboard
/// helper works.
fn deliver_share_text(result: &CmdResult, print: bool) {
    let Some(text) = &result.share_text else {
        return;
    };

    if print {
        println!("{}", text);
        return;
    }

    match copy_to_clipboard(text) {
        Ok(()) => println!("{}", "Share text copied to clipboard".green()),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            println!("{}", text);
        }
    }
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::Show,
        (Some(k), None) => ConfigAction::Get(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    print_config(&result.config);
    print_messages(&result.messages);
    Ok(())
}
