use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taptalk", bin_name = "taptalk", version)]
#[command(about = "A private journal for the conflicts in your relationships", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $TAPTALK_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List profiles, busiest first
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Create a profile
    #[command(alias = "n", display_order = 2)]
    Add {
        /// Name words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Delete a profile and its whole log
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Profile number, id or name
        profile: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Log a conflict
    #[command(alias = "l", display_order = 4)]
    Log {
        /// Profile number, id or name
        profile: String,

        /// Tag words, or the tag's number in `taptalk tags`
        #[arg(required = true, trailing_var_arg = true)]
        tag: Vec<String>,
    },

    /// Show or edit a profile's tags
    #[command(display_order = 5)]
    Tags(TagsArgs),

    /// Today's count, traffic level and themes for a profile
    #[command(alias = "s", display_order = 6)]
    Summary {
        /// Profile number, id or name
        profile: String,

        /// Only count this calendar month
        #[arg(long, conflicts_with = "week")]
        month: bool,

        /// Only count the past seven days
        #[arg(long)]
        week: bool,
    },

    /// Generate a weekly insight
    #[command(alias = "i", display_order = 7)]
    Insight {
        /// Profile number, id or name
        profile: String,

        /// Copy the share text to the clipboard
        #[arg(long)]
        share: bool,

        /// Print the share text instead of copying it
        #[arg(long)]
        print: bool,
    },

    /// Share themes and an insight you already have
    #[command(display_order = 8)]
    Share {
        /// Profile number, id or name
        profile: String,

        /// Insight text to include
        #[arg(long, default_value = "")]
        insight: String,

        /// Print the share text instead of copying it
        #[arg(long)]
        print: bool,
    },

    /// Get or set configuration
    #[command(display_order = 9)]
    Config {
        /// Configuration key (model, api_base, api_key)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: Option<TagCommands>,

    /// Profile number, id or name
    #[arg(required = true)]
    pub profile: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add a tag
    Add {
        profile: String,
        #[arg(required = true, trailing_var_arg = true)]
        tag: Vec<String>,
    },

    /// Remove a tag (logged conflicts keep it)
    #[command(alias = "rm")]
    Remove {
        profile: String,
        #[arg(required = true, trailing_var_arg = true)]
        tag: Vec<String>,
    },
}
