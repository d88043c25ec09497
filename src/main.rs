//! twinhub: command-line front-end for project lookup and learning hub content
//!
//! Reads settings from `twinhub.toml` (if present), keeps the local cache as
//! one JSON file per key under the data directory, and talks to the remote
//! project database only when both its URL and key are set.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use twinhub::{
    FileStore, HubConfig, LearningHub, LocalStore, PageState, ProjectPage, ProjectResolver,
    RemoteConfig, RemoteGateway, UnconfiguredGateway,
};

#[derive(Parser)]
#[command(name = "twinhub")]
#[command(about = "Digital twin project catalog and learning hub")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "twinhub.toml")]
    config: String,

    /// Local cache directory
    #[arg(short, long, env = "TWINHUB_DATA_DIR")]
    data_dir: Option<String>,

    /// Remote project database URL (overrides config file)
    #[arg(long, env = "TWINHUB_REMOTE_URL")]
    remote_url: Option<String>,

    /// Remote project database API key (overrides config file)
    #[arg(long, env = "TWINHUB_REMOTE_KEY", hide_env_values = true)]
    remote_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a project id and print its detail view
    Project {
        /// Project id (numeric or text)
        id: String,
    },

    /// List learning hub sections
    Sections,

    /// List learning pathways
    Pathways,

    /// Append an item to a section or pathway
    AddItem {
        #[arg(short, long, value_enum, default_value = "section")]
        kind: EntryKind,
        /// Section or pathway key
        key: String,
        /// Item text
        value: String,
    },

    /// Overwrite the item at a zero-based index
    ReplaceItem {
        #[arg(short, long, value_enum, default_value = "section")]
        kind: EntryKind,
        /// Section or pathway key
        key: String,
        /// Zero-based item index
        index: usize,
        /// New item text
        value: String,
    },

    /// Remove the item at a zero-based index
    RemoveItem {
        #[arg(short, long, value_enum, default_value = "section")]
        kind: EntryKind,
        /// Section or pathway key
        key: String,
        /// Zero-based item index
        index: usize,
    },

    /// Replace a section's detail document body (and optionally title)
    SetDetail {
        /// Section key
        key: String,
        /// New detail body (rich text)
        body: String,
        /// New detail title
        #[arg(short, long)]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntryKind {
    Section,
    Pathway,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("twinhub=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = HubConfig::load(Path::new(&cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = PathBuf::from(data_dir);
    }
    if let Some(url) = cli.remote_url {
        config.remote.base_url = Some(url);
    }
    if let Some(key) = cli.remote_key {
        config.remote.api_key = Some(key);
    }

    info!(data_dir = %config.storage.data_dir.display(), "Opening local cache");
    let cache: Arc<dyn LocalStore> = Arc::new(FileStore::open(&config.storage.data_dir)?);

    match cli.command {
        Command::Project { id } => {
            let remote = remote_gateway(config.remote)?;
            let resolver = ProjectResolver::new(remote, cache);
            let mut page = ProjectPage::new();
            match page.load(&resolver, &id).await {
                PageState::Loaded(view) => {
                    println!("{}", serde_json::to_string_pretty(view)?);
                }
                PageState::NotFound(not_found) => {
                    println!("{}", not_found.heading);
                    println!("{}", not_found.message);
                    println!("{} ({})", not_found.back_label, not_found.back_link);
                    std::process::exit(1);
                }
                PageState::Idle | PageState::Loading { .. } => {
                    anyhow::bail!("resolution for {id} did not complete");
                }
            }
        }
        Command::Sections => {
            let hub = LearningHub::load(cache);
            for (key, section) in hub.sections().list_all() {
                println!("{key}: {} ({} items)", section.title, section.items.len());
                for (i, item) in section.items.iter().enumerate() {
                    println!("  [{i}] {item}");
                }
            }
        }
        Command::Pathways => {
            let hub = LearningHub::load(cache);
            for (key, pathway) in hub.pathways().list_all() {
                println!("{key}: {} ({} items)", pathway.title, pathway.items.len());
                for (i, item) in pathway.items.iter().enumerate() {
                    println!("  [{i}] {item}");
                }
            }
        }
        Command::AddItem { kind, key, value } => {
            let mut hub = LearningHub::load(cache);
            hub.set_edit_mode(true);
            let changed = match kind {
                EntryKind::Section => hub.sections_mut()?.add_item(&key, &value)?,
                EntryKind::Pathway => hub.pathways_mut()?.add_item(&key, &value)?,
            };
            report(changed, "Added item", "Blank item ignored");
        }
        Command::ReplaceItem {
            kind,
            key,
            index,
            value,
        } => {
            let mut hub = LearningHub::load(cache);
            hub.set_edit_mode(true);
            let changed = match kind {
                EntryKind::Section => hub.sections_mut()?.replace_item_at(&key, index, &value)?,
                EntryKind::Pathway => hub.pathways_mut()?.replace_item_at(&key, index, &value)?,
            };
            report(changed, "Replaced item", "No item at that index");
        }
        Command::RemoveItem { kind, key, index } => {
            let mut hub = LearningHub::load(cache);
            hub.set_edit_mode(true);
            let changed = match kind {
                EntryKind::Section => hub.sections_mut()?.remove_item_at(&key, index)?,
                EntryKind::Pathway => hub.pathways_mut()?.remove_item_at(&key, index)?,
            };
            report(changed, "Removed item", "No item at that index");
        }
        Command::SetDetail { key, body, title } => {
            let mut hub = LearningHub::load(cache);
            hub.set_edit_mode(true);
            hub.open_detail(&key)?;
            let draft = hub.begin_edit()?;
            draft.body = body;
            if let Some(title) = title {
                draft.title = title;
            }
            hub.save_detail()?;
            println!("Saved detail for {key}");
        }
    }

    Ok(())
}

fn report(changed: bool, done: &str, skipped: &str) {
    if changed {
        println!("{done}");
    } else {
        println!("{skipped}");
    }
}

#[cfg(feature = "remote")]
fn remote_gateway(config: RemoteConfig) -> anyhow::Result<Arc<dyn RemoteGateway>> {
    if !config.is_configured() {
        info!("Remote project database not configured");
        return Ok(Arc::new(UnconfiguredGateway));
    }
    Ok(Arc::new(twinhub::HttpGateway::new(config)?))
}

#[cfg(not(feature = "remote"))]
fn remote_gateway(_config: RemoteConfig) -> anyhow::Result<Arc<dyn RemoteGateway>> {
    Ok(Arc::new(UnconfiguredGateway))
}
