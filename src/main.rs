mod cli;

use std::error::Error;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use soundbio::{config::load_config, GroqClient, GroqError};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Installed before the config is read so its warnings reach stderr.
/// Returns `None` when `RUST_LOG` is set and owns the filter.
fn init_logging() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let user_filtered = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new("warn,soundbio=info"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    (!user_filtered).then_some(handle)
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_handle = init_logging();
    let config = load_config();
    if let (true, Some(handle)) = (config.debug, log_handle) {
        handle.reload(EnvFilter::new("warn,soundbio=debug"))?;
    }

    if config.api_key().is_none() {
        eprintln!("{}", GroqError::MissingApiKey.to_string().red());
        std::process::exit(1);
    }
    let client = GroqClient::new(config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        cli::ask(&client, &args.join(" "))?;
        return Ok(());
    }

    println!(
        "{}",
        format!("soundbio v{}\nType an artist name, 'help' or 'exit'.", env!("CARGO_PKG_VERSION")).blue()
    );
    cli::run_cli(&client)?;

    println!("{}", "Goodbye!".blue());
    Ok(())
}
