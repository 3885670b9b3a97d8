use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use versekit::config::{get_cross_references_path, load_config, save_config, VerseKitConfig};
use versekit::crossref::{
    append_custom, normalize_reference, CrossRefKind, CrossReference, CrossReferenceIndex,
};
use versekit::errors::Result;
use versekit::format::{
    format_cross_references, format_passage_as_json, format_passage_as_text, format_search_hits,
};
use versekit::loader::{source_from_config, TranslationStore};
use versekit::passage::chapter_numbers;
use versekit::search::SearchIndex;

/// Scripture reference lookup.
#[derive(Parser)]
#[command(name = "versekit", about = "Look up, search and compare Bible passages")]
struct Cli {
    /// Project root holding `.versekit/` (default: current directory)
    #[arg(long, global = true)]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Init,
    /// Print a passage, e.g. "John 3:16-18"
    Lookup {
        /// Reference to look up
        reference: String,
        /// Translation id (default from config)
        #[arg(short, long)]
        translation: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List the books of a translation
    Books {
        #[arg(short, long)]
        translation: Option<String>,
    },
    /// List the chapters of a book
    Chapters {
        /// Book name or abbreviation
        book: String,
        #[arg(short, long)]
        translation: Option<String>,
    },
    /// Search verse text
    Search {
        /// Words to search for
        query: String,
        #[arg(short, long)]
        translation: Option<String>,
        /// Maximum results (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a passage in several translations
    Compare {
        /// Reference to compare
        reference: String,
        /// Comma-separated translation ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        translations: Vec<String>,
    },
    /// List translations available from the configured source
    Versions,
    /// Show cross references for a passage, or search them by topic
    Xrefs {
        /// Source reference, e.g. "Gen 1:1"
        #[arg(required_unless_present = "topic", conflicts_with = "topic")]
        reference: Option<String>,
        /// Words to look for in descriptions
        #[arg(long)]
        topic: Option<String>,
    },
    /// Record a cross reference in the project
    AddXref {
        /// Source reference
        source: String,
        /// Target reference
        target: String,
        /// direct, parallel or topical
        #[arg(short, long, default_value = "direct")]
        kind: CrossRefKind,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VERSEKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let root = resolve_path(cli.root);

    match cli.command {
        Commands::Init => {
            let config = VerseKitConfig::default();
            save_config(&root, &config)?;
            println!("Initialized VerseKit at {}", root.display());
            Ok(())
        }
        Commands::Xrefs { reference, topic } => {
            let index = CrossReferenceIndex::open(&get_cross_references_path(&root))?;
            if let Some(reference) = reference {
                let heading = normalize_reference(&reference)?;
                let xrefs = index.lookup(&heading)?;
                print!("{}", format_cross_references(&heading, &xrefs));
            } else if let Some(topic) = topic {
                let xrefs = index.search_by_topic(&topic);
                print!("{}", format_cross_references(&topic, &xrefs));
            }
            Ok(())
        }
        Commands::AddXref {
            source,
            target,
            kind,
            description,
        } => {
            let stored = append_custom(
                &get_cross_references_path(&root),
                CrossReference {
                    source,
                    target,
                    kind,
                    description,
                },
            )?;
            println!("Added {} -> {} [{}]", stored.source, stored.target, stored.kind);
            Ok(())
        }
        command => run_with_store(&root, command).await,
    }
}

/// Commands that read translations through the configured source.
async fn run_with_store(root: &Path, command: Commands) -> Result<()> {
    let config = load_config(root)?;
    let store = open_store(&config);
    let pick = |t: Option<String>| t.unwrap_or_else(|| config.default_translation.clone());

    match command {
        Commands::Init | Commands::Xrefs { .. } | Commands::AddXref { .. } => {}
        Commands::Lookup {
            reference,
            translation,
            json,
        } => {
            let passage = store.lookup(&reference, &pick(translation)).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&format_passage_as_json(&passage))
                        .unwrap_or_default()
                );
            }
            if let Some(err) = &passage.error {
                return Err(err.clone().into());
            }
            if !json {
                print!("{}", format_passage_as_text(&passage));
            }
        }
        Commands::Books { translation } => {
            let translation = store.get(&pick(translation)).await?;
            for name in translation.book_names() {
                println!("{}", name);
            }
        }
        Commands::Chapters { book, translation } => {
            let translation = store.get(&pick(translation)).await?;
            let chapters = chapter_numbers(&translation, &book)?;
            let listed: Vec<String> = chapters.iter().map(|c| c.to_string()).collect();
            println!("{}", listed.join(" "));
        }
        Commands::Search {
            query,
            translation,
            limit,
        } => {
            let translation = store.get(&pick(translation)).await?;
            let index = SearchIndex::build(&translation);
            let hits = index.search(&translation, &query, limit.unwrap_or(config.search_limit));
            print!("{}", format_search_hits(&query, &hits));
        }
        Commands::Compare {
            reference,
            translations,
        } => {
            for entry in store.compare(&reference, &translations).await? {
                println!("[{}]", entry.translation.to_uppercase());
                match entry.outcome {
                    Ok(passage) => print!("{}", format_passage_as_text(&passage)),
                    Err(e) => println!("  {}", e),
                }
            }
        }
        Commands::Versions => {
            let versions = store.available().await?;
            if versions.is_empty() {
                println!("No translations found");
            }
            for v in versions {
                println!("{}  {}", v.id, v.display_name);
            }
        }
    }
    Ok(())
}

/// Builds the store for the configured content source.
fn open_store(config: &VerseKitConfig) -> TranslationStore {
    let store = TranslationStore::new(source_from_config(config));
    match config.load_timeout() {
        Some(timeout) => store.with_timeout(timeout),
        None => store,
    }
}

/// Resolves an optional path argument to a `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf()),
    }
}
