mod config;
mod error;
mod executor;
mod host;
mod matcher;
mod model;
mod plugins;

use std::path::PathBuf;
use anyhow::{Context, Result, bail};
use clap::Parser;
use crate::config::load_config;
use crate::host::Host;
use crate::model::ResultItem;
use crate::plugins::PluginInstance;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Launcher input, starting with a plugin trigger (e.g. `code runner`)
    input: Vec<String>,

    /// Run the action of the N-th result (1-based)
    #[arg(short, long)]
    open: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List plugins and their triggers
    #[arg(long)]
    list: bool,

    /// Print each plugin's settings widget as JSON
    #[arg(long)]
    widgets: bool,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let config = load_config(args.config.as_deref())?;

    // 2. Load plugins
    let host = Host::new(&config)?;

    if args.list {
        for (id, name, trigger) in host.plugins() {
            println!("{:<10} {:<20} {}", trigger, name, id);
        }
        return Ok(());
    }

    if args.widgets {
        let mut widgets = serde_json::Map::new();
        for (id, _, _) in host.plugins() {
            if let Some(plugin) = host.plugin(id) {
                widgets.insert(id.to_string(), serde_json::to_value(plugin.config_widget())?);
            }
        }
        println!("{}", serde_json::to_string_pretty(&widgets)?);
        return Ok(());
    }

    // 3. Route the query
    let input = args.input.join(" ");
    let Some(items) = host.query(&input) else {
        bail!("no plugin registered for input '{}'", input);
    };

    if let Some(n) = args.open {
        let item = n
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .with_context(|| format!("no result #{} (got {})", n, items.len()))?;
        host.activate(item)?;
        return Ok(());
    }

    print_items(&items, args.json)
}

fn print_items(items: &[ResultItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}. {}", i + 1, item.text);
        println!("     {}", item.subtext);
    }
    Ok(())
}
