use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::importer::{import_into, load_and_convert};
use crate::logging::init_logging;
use crate::store::{ConversationPatch, ConversationStore, NewConversation};
use crate::utils::{DATA_PATH_ENV, format_instant, get_default_store_path};

#[derive(Parser)]
#[command(name = "chat-archive")]
#[command(version = "0.1.0")]
#[command(about = "Archive exported chat conversations into a local record store", long_about = None)]
pub struct Cli {
    /// Path to the store file
    #[arg(long, global = true, env = DATA_PATH_ENV)]
    pub data: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an export file (JSON array of conversations) into the store
    Import {
        /// Path to the export JSON file
        file: PathBuf,
    },
    /// List archived conversations, most recently updated first
    List {
        /// Print JSON instead of one line per conversation
        #[arg(long)]
        json: bool,
    },
    /// Print one conversation with its messages as JSON
    Show { id: String },
    /// Create a conversation record by hand
    Create(CreateArgs),
    /// Edit the title, summary or dates of a conversation
    Edit(EditArgs),
    /// Delete one conversation
    Delete { id: String },
    /// Delete every conversation in the store
    DeleteAll,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub summary: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub date_started: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub date_ended: Option<String>,
    /// External reference to the original conversation
    #[arg(long)]
    pub source_id: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    /// Start date (YYYY-MM-DD, empty to clear)
    #[arg(long)]
    pub date_started: Option<String>,
    /// End date (YYYY-MM-DD, empty to clear)
    #[arg(long)]
    pub date_ended: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let store_path = match cli.data {
        Some(path) => path,
        None => get_default_store_path()?,
    };

    match command {
        Commands::Import { file } => import(&file, &store_path),
        Commands::List { json } => list(&store_path, json),
        Commands::Show { id } => show(&store_path, &id),
        Commands::Create(args) => create(&store_path, args),
        Commands::Edit(args) => edit(&store_path, args),
        Commands::Delete { id } => delete(&store_path, &id),
        Commands::DeleteAll => delete_all(&store_path),
    }
}

fn open_store(path: &Path) -> Result<ConversationStore> {
    ConversationStore::open(path)
        .with_context(|| format!("Failed to open store: {}", path.display()))
}

fn import(file: &Path, store_path: &Path) -> Result<()> {
    let records = load_and_convert(file)
        .with_context(|| format!("Failed to parse export: {}", file.display()))?;

    let store = open_store(store_path)?;
    let report = import_into(&store, records)
        .with_context(|| format!("Import into {} stopped", store_path.display()))?;

    println!(
        "Imported {} conversations ({} new, {} updated)",
        report.total, report.created, report.updated
    );

    Ok(())
}

fn list(store_path: &Path, json: bool) -> Result<()> {
    let store = open_store(store_path)?;
    let items = store.list();

    if json {
        let payload = serde_json::json!({ "conversations": items });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for item in &items {
        println!("{}\t{}\t{}", item.id, format_instant(item.updated_at.as_ref()), item.title);
    }
    eprintln!("{} conversations in {}", items.len(), store.path().display());

    Ok(())
}

fn show(store_path: &Path, id: &str) -> Result<()> {
    let store = open_store(store_path)?;
    let conversation = store.get(id)?;
    println!("{}", serde_json::to_string_pretty(&conversation)?);
    Ok(())
}

fn create(store_path: &Path, args: CreateArgs) -> Result<()> {
    let store = open_store(store_path)?;
    let created = store.create(NewConversation {
        title: args.title,
        summary: args.summary,
        date_started: args.date_started,
        date_ended: args.date_ended,
        source_id: args.source_id,
    })?;

    println!("{}", created.id);
    Ok(())
}

fn edit(store_path: &Path, args: EditArgs) -> Result<()> {
    let patch = ConversationPatch {
        title: args.title,
        summary: args.summary,
        date_started: args.date_started,
        date_ended: args.date_ended,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to edit: pass at least one of --title, --summary, --date-started, --date-ended");
    }

    let store = open_store(store_path)?;
    let updated = store.update(&args.id, patch)?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

fn delete(store_path: &Path, id: &str) -> Result<()> {
    let store = open_store(store_path)?;
    store.delete(id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn delete_all(store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let count = store.len();
    store.delete_all()?;
    println!("Deleted {} conversations", count);
    Ok(())
}
