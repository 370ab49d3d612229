use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Rotating news headlines that never repeat what you just read")]
#[command(version)]
pub struct Cli {
    /// Log engine activity at debug level on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a first set of headlines and show it
    Show {
        /// Print HTML markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Show a fresh set, skipping headlines already shown
    Next {
        /// Print HTML markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Show a fresh set, skipping headlines already shown (same data as next)
    Previous {
        /// Print HTML markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Browse headlines: n/p rotate, a number opens that article, q quits
    Interactive,

    /// Show the current temperature for a city
    Weather {
        /// City name (defaults to HEADLINES_CITY, then Oakland)
        city: Option<String>,
    },

    /// Inspect or reset the remembered headline titles
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// List the titles the next refresh will exclude
    Show,

    /// Forget all remembered titles
    Clear,
}
