use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use swiss_dialects::cli::{CatalogArgs, Cli, Command, ReplayArgs, ShowArgs};
use swiss_dialects::runtime::AtlasRuntime;
use swiss_dialects::ui::launch_ui;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Some(Command::Show(args)) => handle_show(&args),
        None => handle_show(&ShowArgs::default()),
        Some(Command::List(args)) => handle_list(&args),
        Some(Command::Validate(args)) => handle_validate(&args),
        Some(Command::Replay(args)) => handle_replay(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_show(args: &ShowArgs) -> Result<()> {
    let config = args.app_config()?;
    let catalog = Arc::new(config.catalog.load()?);
    let runtime = AtlasRuntime::spawn(catalog, config.playback, config.map_mode)
        .context("failed to start atlas runtime")?;
    launch_ui(runtime)
}

fn handle_list(args: &CatalogArgs) -> Result<()> {
    let catalog = args.app_config()?.catalog.load()?;
    for dialect in catalog.dialects() {
        println!(
            "{}\t{}\t{}\t{}",
            dialect.id, dialect.name, dialect.region, dialect.language
        );
    }
    Ok(())
}

fn handle_validate(args: &CatalogArgs) -> Result<()> {
    let config = args.app_config()?;
    let catalog = config.catalog.load()?;
    info!(source = ?config.catalog, "catalog passed validation");
    println!(
        "catalog OK: {} dialects, {} regions",
        catalog.dialects().len(),
        catalog.regions().len()
    );
    Ok(())
}

fn handle_replay(args: &ReplayArgs) -> Result<()> {
    let state = args.run()?;
    let json = serde_json::to_string_pretty(&state).context("failed to encode view state")?;
    println!("{}", json);
    Ok(())
}
