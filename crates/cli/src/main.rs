mod args;

use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use reelhouse_store::loader::{load_customers_from_path, load_movies_from_path, process_commands_from_path};
use reelhouse_store::{CommandRegistry, Store, StoreConfig};

use args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    reelhouse_observability::init(args.log_format);

    let config = StoreConfig::default().with_media_tag(args.media);
    config.validate().context("invalid store configuration")?;

    let mut store = Store::with_config(config);
    let registry = CommandRegistry::with_defaults();

    load_customers_from_path(&mut store, &args.customers)?;
    load_movies_from_path(&mut store, &args.movies)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = process_commands_from_path(&mut store, &registry, &args.commands, &mut out)?;
    out.flush()?;
    tracing::info!(
        accepted = report.accepted,
        skipped = report.skipped,
        "run complete"
    );

    if let Some(path) = &args.snapshot {
        let json = store.snapshot().to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("writing snapshot to {}", path.display()))?;
    }

    Ok(())
}
