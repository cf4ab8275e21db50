use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use itertools::Itertools;
use lucid_journal::{
    Config, DreamEntry, DreamType, Emotion, EntryPatch, Journal,
    config::{LoggingConfig, generate_default_config},
    detect_patterns,
    format::{capitalize, format_dream_date, format_percentage, format_relative_time, generate_id, truncate},
    lucidity_level, seed, sleep_quality_label,
    stats::{quality_profile, type_distribution},
    storage,
};
use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "Lucid Journal")]
#[command(version)]
#[command(about = "Dream journal with lucidity, sleep and streak analytics")]
struct Cli {
    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Dream(DreamCommands),
    Stats,
    Patterns {
        /// Minimum number of dreams a pattern must appear in
        #[arg(short, long, default_value = "2")]
        min: usize,
    },
    /// Fill the journal with sample dreams
    Seed {
        /// Replace an existing journal
        #[arg(long)]
        force: bool,
    },
    Config(ConfigCommands),
}

#[derive(Args)]
struct DreamCommands {
    #[command(subcommand)]
    action: DreamActions,
}

#[derive(Subcommand)]
enum DreamActions {
    Add(AddArgs),
    List {
        #[arg(short = 't', long = "type")]
        category: Option<DreamType>,
        #[arg(short, long)]
        starred: bool,
    },
    View { id: String },
    Search {
        query: String,
        #[arg(short = 't', long = "type")]
        category: Option<DreamType>,
    },
    Star { id: String },
    Delete { id: String },
    Edit(EditArgs),
    Related { id: String },
}

#[derive(Args)]
struct AddArgs {
    title: String,
    /// Dream narrative; read from stdin when omitted
    #[arg(long)]
    content: Option<String>,
    #[arg(short = 't', long = "type", default_value = "normal")]
    category: DreamType,
    #[arg(short, long, value_delimiter = ',')]
    emotions: Vec<Emotion>,
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    clarity: u8,
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    lucidity: u8,
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    characters: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    locations: Vec<String>,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    sleep_quality: u8,
    /// REM duration in minutes
    #[arg(long, default_value_t = 0)]
    duration: u32,
    #[arg(long)]
    analysis: Option<String>,
    /// Ids of related dreams
    #[arg(long, value_delimiter = ',')]
    connect: Vec<String>,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(short = 't', long = "type")]
    category: Option<DreamType>,
    #[arg(short, long, value_delimiter = ',')]
    emotions: Option<Vec<Emotion>>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    clarity: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    lucidity: Option<u8>,
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    characters: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    locations: Option<Vec<String>>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    sleep_quality: Option<u8>,
    /// REM duration in minutes
    #[arg(long)]
    duration: Option<u32>,
    /// When the dream happened, RFC 3339 (e.g. 2024-06-12T06:30:00Z)
    #[arg(long)]
    date: Option<DateTime<Utc>>,
    #[arg(long)]
    analysis: Option<String>,
    /// Ids of related dreams, replacing the current list
    #[arg(long, value_delimiter = ',')]
    connect: Option<Vec<String>>,
}

impl From<EditArgs> for EntryPatch {
    fn from(args: EditArgs) -> Self {
        EntryPatch {
            title: args.title,
            content: args.content,
            date: args.date,
            category: args.category,
            emotions: args.emotions,
            clarity: args.clarity,
            lucidity: args.lucidity,
            tags: args.tags,
            symbols: args.symbols,
            characters: args.characters,
            locations: args.locations,
            sleep_quality: args.sleep_quality,
            duration: args.duration,
            is_starred: None,
            ai_analysis: args.analysis,
            connections: args.connect,
        }
    }
}

#[derive(Args)]
struct ConfigCommands {
    #[command(subcommand)]
    action: ConfigActions,
}

#[derive(Subcommand)]
enum ConfigActions {
    /// Write a commented default config
    Init {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the resolved journal location and settings
    Show,
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lucid_journal={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Dream(dream_cmd) => match dream_cmd.action {
            DreamActions::Add(args) => add_dream(&config, args)?,
            DreamActions::List { category, starred } => list_dreams(&config, category, starred)?,
            DreamActions::View { id } => view_dream(&config, &id)?,
            DreamActions::Search { query, category } => search_dreams(&config, &query, category)?,
            DreamActions::Star { id } => star_dream(&config, &id)?,
            DreamActions::Delete { id } => delete_dream(&config, &id)?,
            DreamActions::Edit(args) => edit_dream(&config, args)?,
            DreamActions::Related { id } => related_dreams(&config, &id)?,
        },
        Commands::Stats => show_statistics(&config)?,
        Commands::Patterns { min } => show_patterns(&config, min)?,
        Commands::Seed { force } => seed_journal(&config, force)?,
        Commands::Config(config_cmd) => match config_cmd.action {
            ConfigActions::Init { output } => init_config(output)?,
            ConfigActions::Show => show_config(&config),
        },
    }

    Ok(())
}

fn open_journal(config: &Config) -> anyhow::Result<Journal> {
    let entries = storage::load_entries(&config.journal.file)?;
    Ok(Journal::from_entries(entries))
}

fn save_journal(config: &Config, journal: &Journal) -> anyhow::Result<()> {
    storage::save_entries(&config.journal.file, journal.entries())?;
    Ok(())
}

fn add_dream(config: &Config, args: AddArgs) -> anyhow::Result<()> {
    let mut journal = open_journal(config)?;
    let now = Utc::now();

    let content = match args.content {
        Some(content) => content,
        None => {
            if io::stdin().is_terminal() {
                println!("Dream content (Ctrl+D when finished):");
            }
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
    };

    let mut entry = DreamEntry::new(generate_id(now), args.title.trim(), content.trim(), now)
        .category(args.category)
        .emotions(args.emotions)
        .clarity(args.clarity)
        .lucidity(args.lucidity)
        .tags(args.tags)
        .symbols(args.symbols)
        .characters(args.characters)
        .locations(args.locations)
        .sleep(args.sleep_quality, args.duration);
    if let Some(analysis) = args.analysis {
        entry = entry.analysis(analysis);
    }
    if !args.connect.is_empty() {
        entry = entry.connections(args.connect);
    }

    let id = journal.add(entry)?.id.clone();
    save_journal(config, &journal)?;
    println!("Dream {} added successfully!", id.bold());
    Ok(())
}

fn print_table(entries: &[&DreamEntry]) {
    let now = Utc::now();
    println!("{:<18} {:<14} {:<30} {:<10} {}", "ID", "Date", "Title", "Type", "Tags");
    for dream in entries {
        let star = if dream.is_starred { "★ " } else { "" };
        println!(
            "{:<18} {:<14} {:<30} {:<10} {}",
            dream.id,
            format_dream_date(dream.date, now),
            format!("{}{}", star, truncate(&dream.title, 26)),
            dream.category,
            dream.tags.iter().join(", ")
        );
    }
}

fn list_dreams(config: &Config, category: Option<DreamType>, starred: bool) -> anyhow::Result<()> {
    let journal = open_journal(config)?;
    if journal.is_empty() {
        println!("No dreams recorded yet.");
        return Ok(());
    }

    let mut shown = journal.filtered_by(category);
    if starred {
        shown.retain(|d| d.is_starred);
    }
    println!("{} dreams recorded", journal.len());
    print_table(&shown);
    Ok(())
}

fn view_dream(config: &Config, id: &str) -> anyhow::Result<()> {
    let mut journal = open_journal(config)?;
    journal.select(Some(id));
    let Some(dream) = journal.selected() else {
        println!("Dream {} not found.", id);
        return Ok(());
    };
    let now = Utc::now();

    println!("\n--- {} ---", dream.title.clone().bold().yellow());
    println!(
        "{} ({}) · {}",
        format_dream_date(dream.date, now),
        format_relative_time(dream.date, now),
        capitalize(dream.category.as_str())
    );
    if dream.is_starred {
        println!("★ Starred");
    }
    println!("\n{}\n", dream.content);

    println!("Clarity: {}/5", dream.clarity);
    println!(
        "Lucidity: {}% ({})",
        dream.lucidity,
        lucidity_level(dream.lucidity as f64)
    );
    println!(
        "Sleep quality: {}% ({}), {} min REM",
        dream.sleep_quality,
        sleep_quality_label(dream.sleep_quality as f64),
        dream.duration
    );

    if !dream.emotions.is_empty() {
        println!("Emotions: {}", dream.emotions.iter().join(", "));
    }
    let lists = [
        ("Tags", &dream.tags),
        ("Symbols", &dream.symbols),
        ("Characters", &dream.characters),
        ("Locations", &dream.locations),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            println!("{}: {}", label, values.iter().join(", "));
        }
    }

    if let Some(analysis) = &dream.ai_analysis {
        println!("\n{} {}", "Analysis:".bold().cyan(), analysis);
    }

    let related = journal.related(id)?;
    if !related.is_empty() {
        println!("\nConnected dreams:");
        for other in related {
            println!("  {} {}", other.id, other.title);
        }
    }

    Ok(())
}

fn search_dreams(config: &Config, query: &str, category: Option<DreamType>) -> anyhow::Result<()> {
    let mut journal = open_journal(config)?;
    journal.set_search_query(query);
    let found = journal.filtered_by(category);

    if found.is_empty() {
        println!("No dreams found matching '{}'", query);
        return Ok(());
    }
    print_table(&found);
    Ok(())
}

fn star_dream(config: &Config, id: &str) -> anyhow::Result<()> {
    let mut journal = open_journal(config)?;
    let starred = journal.toggle_starred(id)?;
    save_journal(config, &journal)?;
    if starred {
        println!("Dream {} starred.", id);
    } else {
        println!("Dream {} unstarred.", id);
    }
    Ok(())
}

fn delete_dream(config: &Config, id: &str) -> anyhow::Result<()> {
    let mut journal = open_journal(config)?;
    let removed = journal.delete(id)?;
    save_journal(config, &journal)?;
    println!("Dream {} ({}) deleted.", id, removed.title);
    Ok(())
}

fn edit_dream(config: &Config, args: EditArgs) -> anyhow::Result<()> {
    let id = args.id.clone();
    let patch = EntryPatch::from(args);
    if patch.is_empty() {
        return Err(anyhow::anyhow!("Nothing to change for dream {}", id));
    }

    let mut journal = open_journal(config)?;
    journal.update(&id, patch)?;
    save_journal(config, &journal)?;
    println!("Dream {} updated.", id);
    Ok(())
}

fn related_dreams(config: &Config, id: &str) -> anyhow::Result<()> {
    let journal = open_journal(config)?;
    let related = journal.related(id)?;
    if related.is_empty() {
        println!("Dream {} has no connected dreams.", id);
        return Ok(());
    }
    print_table(&related);
    Ok(())
}

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "▇".repeat((count * width).div_ceil(max))
}

fn show_statistics(config: &Config) -> anyhow::Result<()> {
    let journal = open_journal(config)?;
    let stats = journal.stats(Utc::now(), &config.analytics.stats_options());

    println!("\n{}", "DREAM STATISTICS".bold().blue());
    println!("Total dreams recorded: {}", stats.total_dreams);
    println!(
        "Lucid dreams: {} ({})",
        stats.lucid_dreams,
        format_percentage(stats.lucid_percentage as f64)
    );
    println!("Average clarity: {:.1}/5", stats.avg_clarity);
    println!(
        "Average sleep quality: {} ({})",
        format_percentage(stats.avg_sleep_quality),
        sleep_quality_label(stats.avg_sleep_quality)
    );
    println!("Current streak: {} days", stats.streak_days);

    if !stats.most_common_emotions.is_empty() {
        println!("\n{}", "MOST COMMON EMOTIONS".bold().blue());
        for (i, item) in stats.most_common_emotions.iter().enumerate() {
            println!("{}. {} ({} dreams)", i + 1, capitalize(item.emotion.as_str()), item.count);
        }
    }

    if let Some(top) = stats.most_common_tags.first() {
        println!("\n{}", "TOP TAGS".bold().blue());
        for item in &stats.most_common_tags {
            println!("{:<16} {} {}", item.tag, bar(item.count, top.count, 20), item.count);
        }
    }

    println!("\n{}", "WEEKLY ACTIVITY".bold().blue());
    let busiest = stats.weekly_activity.iter().map(|d| d.count).max().unwrap_or(0);
    for day in &stats.weekly_activity {
        println!("{} {} {}", day.day, bar(day.count, busiest, 20), day.count);
    }

    println!("\n{}", "MONTHLY TREND".bold().blue());
    println!("{:<6} {:>6} {:>7}", "Month", "Lucid", "Normal");
    for month in &stats.monthly_trend {
        println!("{:<6} {:>6} {:>7}", month.month, month.lucid, month.normal);
    }

    let distribution = type_distribution(journal.entries());
    if !distribution.is_empty() {
        println!("\n{}", "DREAM TYPES".bold().blue());
        for share in distribution {
            println!("{:<10} {}", capitalize(share.name.as_str()), share.value);
        }
    }

    println!("\n{}", "QUALITY PROFILE".bold().blue());
    for score in quality_profile(&stats) {
        println!("{:<9} {:>5.1}", score.quality, score.value);
    }

    let starred = journal.starred(config.analytics.starred_limit);
    if !starred.is_empty() {
        println!("\n{}", "STARRED DREAMS".bold().blue());
        for dream in starred {
            println!("★ {} ({})", dream.title, dream.id);
        }
    }

    Ok(())
}

fn show_patterns(config: &Config, min: usize) -> anyhow::Result<()> {
    let journal = open_journal(config)?;
    let patterns = detect_patterns(journal.entries(), min);
    if patterns.is_empty() {
        println!("No recurring patterns yet.");
        return Ok(());
    }

    println!("{:<10} {:<20} {:<6} {}", "Kind", "Pattern", "Seen", "Dreams");
    for pattern in patterns {
        println!(
            "{:<10} {:<20} {:<6} {}",
            pattern.kind.as_str(),
            pattern.name,
            pattern.frequency,
            pattern.associated_dreams.iter().join(", ")
        );
    }
    Ok(())
}

fn seed_journal(config: &Config, force: bool) -> anyhow::Result<()> {
    let journal = open_journal(config)?;
    if !journal.is_empty() && !force {
        return Err(anyhow::anyhow!(
            "Journal already has {} dreams; use --force to replace them",
            journal.len()
        ));
    }

    let seeded = Journal::from_entries(seed::sample_entries(Utc::now()));
    save_journal(config, &seeded)?;
    println!("Seeded {} sample dreams into {:?}", seeded.len(), config.journal.file);
    Ok(())
}

fn init_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let template = generate_default_config();
    match output {
        Some(path) => {
            if path.exists() {
                return Err(anyhow::anyhow!("{:?} already exists", path));
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, template)?;
            println!("Wrote config to {:?}", path);
        }
        None => print!("{}", template),
    }
    Ok(())
}

fn show_config(config: &Config) {
    println!("Journal file: {:?}", config.journal.file);
    println!(
        "Analytics: top {} · {} months · {} starred",
        config.analytics.top_n, config.analytics.months_back, config.analytics.starred_limit
    );
    println!("Logging: {} ({})", config.logging.level, config.logging.format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn edit_patch(args: &[&str]) -> EntryPatch {
        let cli = Cli::try_parse_from(["lucid-journal", "dream", "edit"].iter().chain(args)).unwrap();
        match cli.command {
            Commands::Dream(DreamCommands { action: DreamActions::Edit(edit) }) => edit.into(),
            _ => panic!("expected dream edit"),
        }
    }

    #[test]
    fn test_edit_sets_people_places_and_links() {
        let patch = edit_patch(&[
            "d-1",
            "--characters",
            "Mom,Sister",
            "--locations",
            "kitchen",
            "--duration",
            "42",
            "--date",
            "2024-06-12T06:30:00Z",
            "--connect",
            "d-2,d-3",
        ]);

        assert_eq!(patch.characters, Some(vec!["Mom".to_string(), "Sister".to_string()]));
        assert_eq!(patch.locations, Some(vec!["kitchen".to_string()]));
        assert_eq!(patch.duration, Some(42));
        assert_eq!(patch.date, Some(Utc.with_ymd_and_hms(2024, 6, 12, 6, 30, 0).unwrap()));
        assert_eq!(patch.connections, Some(vec!["d-2".to_string(), "d-3".to_string()]));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_edit_without_flags_is_empty() {
        assert!(edit_patch(&["d-1"]).is_empty());
    }

    #[test]
    fn test_edit_rejects_bad_date() {
        let parsed = Cli::try_parse_from(["lucid-journal", "dream", "edit", "d-1", "--date", "yesterday"]);
        assert!(parsed.is_err());
    }
}
