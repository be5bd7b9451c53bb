//! Icebreaker CLI: curate the question corpus and draw decks from it.
//!
//! Usage:
//!   icebreaker prepare --input raw.json --output data/questions.json
//!   icebreaker spin --data data/questions.json [--occasion team] [--locked 1:abc,3:def]
//!   icebreaker questions --data data/questions.json [--occasion o] [--tone t] [--limit n]
//!   icebreaker pages --data data/questions.json
//!   icebreaker deck <subcommand> [--store path]

use clap::{Parser, Subcommand};
use icebreaker_deck::selection::pages::OCCASION_PAGES;
use icebreaker_deck::{
    ArcStage, BuildReport, Config, DatasetBuilder, Deck, DeckStore, LockMap, Occasion,
    OccasionFilter, QuestionIndex, QuestionQuery, SpinEngine, SpinResponse,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "icebreaker",
    version,
    about = "Conversation-arc question curation and deck selection"
)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    /// YAML file overriding quality and selection thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the curated dataset from the raw corpus
    Prepare {
        /// Raw corpus JSON file
        #[arg(long)]
        input: PathBuf,
        /// Where to write the curated dataset
        #[arg(long)]
        output: PathBuf,
    },
    /// Draw one question per arc slot
    Spin {
        /// Curated dataset file
        #[arg(long)]
        data: PathBuf,
        /// all, date_night, team, family, or party
        #[arg(long, default_value = "all")]
        occasion: String,
        /// Locked slots, e.g. "1:abc123,3:def456"
        #[arg(long)]
        locked: Option<String>,
        /// Seed the draw for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List questions for an occasion and tone
    Questions {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value = "all")]
        occasion: String,
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List landing pages and how many questions each would show
    Pages {
        #[arg(long)]
        data: PathBuf,
    },
    /// Manage saved decks
    Deck {
        #[command(subcommand)]
        action: DeckAction,
        /// Path to the deck store file
        #[arg(long, global = true)]
        store: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DeckAction {
    /// Spin and save the result as a named deck
    Save {
        #[arg(long)]
        data: PathBuf,
        /// Deck name (defaults to "Deck #<n>")
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "all")]
        occasion: String,
        #[arg(long)]
        locked: Option<String>,
    },
    /// List saved decks, newest first
    List,
    /// Show one deck's questions
    Show {
        id: String,
    },
    /// Delete a deck by id
    Delete {
        id: String,
    },
}

/// Default deck store (~/.local/share/icebreaker/decks.json)
fn default_store_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("icebreaker").join("decks.json")
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_index(path: &Path) -> Result<QuestionIndex, String> {
    QuestionIndex::load(path).map_err(|e| format!("Failed to load dataset: {}", e))
}

fn parse_locks(locked: Option<&str>) -> LockMap {
    locked
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn print_report(report: &BuildReport) {
    println!("Read {} questions from corpus", report.read);
    println!("After quality filter: {}", report.after_quality);
    println!("After dedup: {}", report.after_dedup);
    println!();
    println!("Arc position distribution:");
    for stage in ArcStage::ALL {
        println!("  {}. {}: {}", stage, stage.label(), report.arc_count(stage));
    }
    println!("  Total: {}", report.total());
    println!();
    println!("Occasion coverage:");
    for occasion in Occasion::TAGGABLE {
        println!("  {}: {}", occasion, report.occasion_count(occasion));
    }
}

fn cmd_prepare(config: &Config, input: &Path, output: &Path) -> i32 {
    let builder = DatasetBuilder::new(config.quality);
    match builder.run(input, output) {
        Ok(report) => {
            print_report(&report);
            println!();
            println!("Wrote {} questions to {}", report.total(), output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_spin(
    config: &Config,
    data: &Path,
    occasion: &str,
    locked: Option<&str>,
    seed: Option<u64>,
) -> i32 {
    let index = match load_index(data) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let engine = SpinEngine::new(&index, OccasionFilter::new(config.selection));
    let locks = parse_locks(locked);
    let occasion = Occasion::parse_or_all(occasion);

    let response = match seed {
        Some(seed) => SpinResponse {
            questions: engine.spin_with_rng(&locks, occasion, &mut StdRng::seed_from_u64(seed)),
            arc_slots: icebreaker_deck::arc_slots(),
        },
        None => engine.respond(&locks, occasion),
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_questions(
    config: &Config,
    data: &Path,
    occasion: &str,
    tone: Option<String>,
    limit: Option<usize>,
) -> i32 {
    let index = match load_index(data) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut query = QuestionQuery::new().with_occasion(Occasion::parse_or_all(occasion));
    if let Some(tone) = tone {
        query = query.with_tone(tone);
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let questions = query.execute(&index, &OccasionFilter::new(config.selection));
    if questions.is_empty() {
        println!("No matching questions.");
        return 0;
    }
    for q in questions {
        println!("[{}] {:<24} {}", q.arc_position, q.id, q.text);
    }
    0
}

fn cmd_pages(config: &Config, data: &Path) -> i32 {
    let index = match load_index(data) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let filter = OccasionFilter::new(config.selection);

    println!("{:<48}  {:>9}", "PAGE", "QUESTIONS");
    println!("{}", "-".repeat(59));
    for page in &OCCASION_PAGES {
        let count = page.questions(&index, &filter).len();
        println!("{:<48}  {:>9}", format!("/{}", page.slug), count);
        for tone in page.tones {
            let path = format!("/{}/{}", page.slug, tone);
            match page.tone_questions(tone, &index, &filter) {
                Some(questions) => println!("{:<48}  {:>9}", path, questions.len()),
                None => println!("{:<48}  {:>9}", path, "thin"),
            }
        }
    }
    0
}

fn cmd_deck_save(
    config: &Config,
    store: &DeckStore,
    data: &Path,
    name: Option<String>,
    occasion: &str,
    locked: Option<&str>,
) -> i32 {
    let index = match load_index(data) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let engine = SpinEngine::new(&index, OccasionFilter::new(config.selection));
    let occasion = Occasion::parse_or_all(occasion);
    let result = engine.spin(&parse_locks(locked), occasion);
    if result.is_empty() {
        eprintln!("Error: no questions available for occasion '{}'", occasion);
        return 1;
    }

    let name = name.unwrap_or_else(|| format!("Deck #{}", store.list().len() + 1));
    let deck = Deck::new(name, occasion, result.questions());
    let id = deck.id.clone();
    match store.save(deck) {
        Ok(()) => {
            println!("Saved deck {} ({} questions)", id, result.len());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_deck_list(store: &DeckStore) -> i32 {
    let decks = store.list();
    if decks.is_empty() {
        println!("No saved decks.");
        return 0;
    }
    println!("{:<36}  {:<24}  {:<10}  {:>9}  {}", "ID", "NAME", "OCCASION", "QUESTIONS", "CREATED");
    println!("{}", "-".repeat(104));
    for deck in decks {
        println!(
            "{:<36}  {:<24}  {:<10}  {:>9}  {}",
            deck.id,
            deck.name,
            deck.occasion,
            deck.questions.len(),
            deck.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    0
}

fn cmd_deck_show(store: &DeckStore, id: &str) -> i32 {
    let deck = match store.get(id) {
        Some(deck) => deck,
        None => {
            eprintln!("Error: deck '{}' not found", id);
            return 1;
        }
    };
    println!("{} ({})", deck.name, deck.occasion);
    for q in &deck.questions {
        println!("  {}. {:<16} {}", q.arc_position, q.arc_label, q.text);
    }
    0
}

fn cmd_deck_delete(store: &DeckStore, id: &str) -> i32 {
    match store.delete(id) {
        Ok(true) => {
            println!("Deleted deck {}", id);
            0
        }
        Ok(false) => {
            eprintln!("Error: deck '{}' not found", id);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Prepare { input, output } => cmd_prepare(&config, &input, &output),
        Commands::Spin { data, occasion, locked, seed } => {
            cmd_spin(&config, &data, &occasion, locked.as_deref(), seed)
        }
        Commands::Questions { data, occasion, tone, limit } => {
            cmd_questions(&config, &data, &occasion, tone, limit)
        }
        Commands::Pages { data } => cmd_pages(&config, &data),
        Commands::Deck { action, store } => {
            let store = DeckStore::open(store.unwrap_or_else(default_store_path));
            match action {
                DeckAction::Save { data, name, occasion, locked } => {
                    cmd_deck_save(&config, &store, &data, name, &occasion, locked.as_deref())
                }
                DeckAction::List => cmd_deck_list(&store),
                DeckAction::Show { id } => cmd_deck_show(&store, &id),
                DeckAction::Delete { id } => cmd_deck_delete(&store, &id),
            }
        }
    };
    std::process::exit(code);
}
