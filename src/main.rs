use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tango::app::App;
use tango::config::Config;
use tango::corpus::Entry;
use tango::typing::LanguageMode;

#[derive(Parser)]
#[command(name = "tango", version, about = "Vocabulary drills: listening, quizzes and romaji typing")]
struct Cli {
    #[arg(short, long, help = "Path to config.toml")]
    config: Option<PathBuf>,

    #[arg(long, conflicts_with = "corpus_url", help = "Tab-separated corpus file")]
    corpus: Option<String>,

    #[arg(long, help = "Fetch the corpus from this URL instead of a file")]
    corpus_url: Option<String>,

    #[arg(short, long, help = "Level to practise (0 = every level)")]
    level: Option<u32>,

    #[arg(short, long, help = "Number of quiz options")]
    options: Option<usize>,

    #[arg(long, help = "Seed for reproducible shuffles")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Step through words one at a time
    Listen,
    /// Multiple-choice definitions
    Quiz,
    /// Type example sentences
    Type {
        #[arg(short, long, value_enum, default_value = "japanese")]
        mode: Mode,
    },
    /// List unmastered words at a level, or mastered words at level 0
    Search {
        #[arg(default_value_t = 0)]
        level: u32,
    },
    /// Inspect or edit the mastered list
    Mastered {
        #[command(subcommand)]
        action: MasteredAction,
    },
    /// Write the effective config to the default config path
    InitConfig,
}

#[derive(Subcommand)]
enum MasteredAction {
    List,
    Add { id: u32 },
    Remove { id: u32 },
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    English,
    Japanese,
}

impl From<Mode> for LanguageMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::English => LanguageMode::English,
            Mode::Japanese => LanguageMode::Japanese,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(corpus) = cli.corpus {
        config.use_corpus_file(corpus);
    }
    if let Some(url) = cli.corpus_url {
        config.use_corpus_url(url);
    }
    if let Some(level) = cli.level {
        config.default_level = level;
    }
    if let Some(options) = cli.options {
        config.options_count = options;
        config.validate();
    }

    init_tracing(&config.log_filter);

    if let Command::InitConfig = cli.command {
        config.save()?;
        println!("wrote {}", Config::config_path().display());
        return Ok(());
    }

    let mut app = App::new(config, cli.seed)?;
    let level = app.config.default_level;

    match cli.command {
        Command::Listen => run_listen(&mut app, level),
        Command::Quiz => run_quiz(&mut app, level),
        Command::Type { mode } => run_typing(&mut app, mode.into()),
        Command::Search { level } => {
            for entry in app.host_mut().search_entries(level)? {
                print_entry(&entry);
            }
            Ok(())
        }
        Command::Mastered { action } => run_mastered(&mut app, action),
        Command::InitConfig => Ok(()),
    }
}

/// RUST_LOG wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_entry(entry: &Entry) {
    println!(
        "{:>5}  L{}  {}  [{}]  {}",
        entry.id(),
        entry.level(),
        entry.word(),
        entry.kana(),
        entry.definition_en()
    );
}

fn prompt(text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn run_listen(app: &mut App, level: u32) -> Result<()> {
    let count = app.host_mut().start_listening(level)?;
    if count == 0 {
        println!("nothing to practise at this level");
        return Ok(());
    }
    println!("{count} words. Enter for next, m to mark mastered, q to quit.");
    while let Some(entry) = app.host_mut().next_listening_item()? {
        println!();
        println!("{}  ({})", entry.word(), entry.kana());
        println!("  {}", entry.definition_en());
        println!("  {}", entry.definition_ja());
        println!("  {}", entry.example_en());
        println!("  {}", entry.example_ja());
        match prompt("> ")?.as_deref() {
            None | Some("q") => break,
            Some("m") => {
                let size = app.mark_mastered(entry.id())?;
                println!("marked ({size} mastered)");
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn run_quiz(app: &mut App, level: u32) -> Result<()> {
    let options_count = app.config.options_count;
    let count = app.host_mut().start_quiz(level, options_count)?;
    if count == 0 {
        println!("nothing to quiz at this level");
        return Ok(());
    }
    let mut asked = 0usize;
    let mut correct = 0usize;
    while let Some(entry) = app.host_mut().next_quiz_item()? {
        let options = app.host().current_quiz_options()?;
        println!();
        println!("{}  ({})", entry.word(), entry.kana());
        for (i, option) in options.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.definition_en());
        }
        let Some(answer) = prompt("answer (number, m = mastered, q = quit): ")? else {
            break;
        };
        match answer.as_str() {
            "q" => break,
            "m" => {
                let size = app.mark_mastered(entry.id())?;
                println!("marked ({size} mastered)");
                continue;
            }
            _ => {}
        }
        asked += 1;
        let picked = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.options.get(i));
        if picked.is_some_and(|o| o.id() == entry.id()) {
            correct += 1;
            println!("correct");
        } else {
            println!("no: {}", entry.definition_en());
        }
    }
    if asked > 0 {
        println!("{correct}/{asked} correct");
    }
    Ok(())
}

fn run_typing(app: &mut App, mode: LanguageMode) -> Result<()> {
    let count = app.host_mut().start_typing()?;
    for position in 0..count {
        let Some(entry) = app.host_mut().typing_item_at(position)? else {
            break;
        };
        let target = match mode {
            LanguageMode::English => entry.example_en(),
            LanguageMode::Japanese => entry.kana(),
        };
        let tokens = app.host().tokens_for(mode)?.len();
        if tokens == 0 {
            continue;
        }
        println!();
        println!("{target}");
        let Some(line) = prompt("> ")? else {
            break;
        };
        if line == "q" {
            break;
        }

        // Feed the line one character at a time, as a keyboard would.
        let mut index = 0;
        let mut typed = String::new();
        for ch in line.chars() {
            typed.push(ch);
            index = app.host().on_keystroke(&typed, index, mode)?;
            if index >= tokens {
                break;
            }
        }
        if index >= tokens {
            println!("complete");
        } else {
            println!("{index}/{tokens} tokens");
        }
    }
    Ok(())
}

fn run_mastered(app: &mut App, action: MasteredAction) -> Result<()> {
    match action {
        MasteredAction::List => {
            for entry in app.host_mut().search_entries(0)? {
                print_entry(&entry);
            }
        }
        MasteredAction::Add { id } => {
            let size = app.mark_mastered(id)?;
            println!("{size} mastered");
        }
        MasteredAction::Remove { id } => {
            let size = app.unmark_mastered(id)?;
            println!("{size} mastered");
        }
        MasteredAction::Clear => {
            app.clear_mastered()?;
            println!("cleared");
        }
    }
    Ok(())
}
