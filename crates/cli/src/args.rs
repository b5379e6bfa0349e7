use std::path::PathBuf;

use clap::Parser;
use reelhouse_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "reelhouse")]
#[command(about = "Video store inventory and rental ledger.")]
pub struct Args {
    /// Customer file: `id last first` per line
    #[arg(long, env = "REELHOUSE_CUSTOMERS", default_value = "data4customers.txt")]
    pub customers: PathBuf,

    /// Movie file: `genre, copies, director, title, extra` per line
    #[arg(long, env = "REELHOUSE_MOVIES", default_value = "data4movies.txt")]
    pub movies: PathBuf,

    /// Command file replayed after loading
    #[arg(long, env = "REELHOUSE_COMMANDS", default_value = "data4commands.txt")]
    pub commands: PathBuf,

    /// The one media type borrow and return accept
    #[arg(long, env = "REELHOUSE_MEDIA", default_value_t = 'D')]
    pub media: char,

    /// Log output: json or pretty
    #[arg(long, env = "REELHOUSE_LOG_FORMAT", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Write the final store state as JSON to this path
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
