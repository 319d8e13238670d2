//! rate-gap CLI - compare a KRW/USD exchange against the published rate
//!
//! ## Example Usage
//!
//! ```bash
//! # Show the latest published rate
//! rate-gap rate
//!
//! # Compare an exchange and keep it in history
//! rate-gap compare --krw 135,000 --usd 95 --save
//!
//! # Work offline with a known rate
//! rate-gap compare --krw 135000 --usd 95 --rate 1350 --as-of 2024-01-02
//!
//! # Review history
//! rate-gap history list
//! rate-gap history export --format csv --output history.csv
//!
//! # Line-oriented shell
//! rate-gap interactive
//! ```

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rate_gap::comparator::Direction;
use rate_gap::config::Config;
use rate_gap::currency::CurrencyPair;
use rate_gap::format::{format_delta, format_impact, format_rate, ComparisonView, RateView};
use rate_gap::history::{export, ExportFormat, HistoryEntry};
use rate_gap::rates::{FrankfurterSource, PublishedRate, RateSource, RateStatus};
use rate_gap::session::Session;
use rate_gap::storage::KeyValueStore;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// rate-gap: how much did that exchange cost you?
#[derive(Parser)]
#[command(name = "rate-gap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compare a KRW/USD exchange against the published market rate", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the latest published rate
    Rate,

    /// Compare an exchange against the published rate
    Compare {
        /// KRW amount (commas allowed)
        #[arg(short = 'k', long)]
        krw: String,

        /// USD amount (commas allowed)
        #[arg(short = 'u', long)]
        usd: String,

        /// Use this published rate instead of fetching one
        #[arg(short = 'r', long)]
        rate: Option<f64>,

        /// Date label for --rate
        #[arg(long, requires = "rate")]
        as_of: Option<String>,

        /// Save the comparison to history
        #[arg(short = 's', long)]
        save: bool,
    },

    /// Manage comparison history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Interactive session: type amounts, refresh, save
    Interactive,

    /// Show configuration and build information
    Info,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved comparisons, newest first
    List,

    /// Delete one entry
    Remove {
        /// Entry id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete every entry
    Clear {
        /// Required to confirm
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Export history as JSON or CSV
    Export {
        /// Output format (json, csv)
        #[arg(short = 'F', long, default_value = "json")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Check that stored history is readable
    Check,
}

type CliSession = Session<Box<dyn KeyValueStore>>;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());
    if let Err(e) = config.ensure_dirs() {
        eprintln!(
            "{} Failed to create directories: {}",
            "Error:".red().bold(),
            e
        );
        process::exit(1);
    }

    if cli.verbose {
        println!(
            "{} v{}",
            "rate-gap".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Data dir: {}",
            config.data_dir.display().to_string().dimmed()
        );
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let store = config.open_store().context("opening history storage")?;
    let mut session: CliSession = Session::new(store);

    match cli.command {
        Commands::Rate => {
            let source = rate_source(&config)?;
            fetch_with_spinner(&mut session, &source).await;
            print_rate(&session.rate_view());
            if matches!(session.rate_status(), RateStatus::Failed(_)) {
                bail!("published rate unavailable");
            }
            Ok(())
        }

        Commands::Compare {
            krw,
            usd,
            rate,
            as_of,
            save,
        } => {
            match rate {
                Some(rate) => {
                    let label = as_of.unwrap_or_else(|| "manual".to_string());
                    session.set_published_rate(PublishedRate::new(rate, label)?);
                }
                None => {
                    let source = rate_source(&config)?;
                    fetch_with_spinner(&mut session, &source).await;
                }
            }

            session.set_krw_text(krw);
            session.set_usd_text(usd);

            print_rate(&session.rate_view());
            print_view(&session.view());

            if save {
                match session.save()? {
                    Some(entry) => println!(
                        "{} Saved as {}",
                        "✓".green().bold(),
                        entry.id.bright_green()
                    ),
                    None => bail!("nothing to save: {}", session.view().caption),
                }
            }
            Ok(())
        }

        Commands::History { action } => handle_history_action(action, &mut session, cli.verbose),

        Commands::Interactive => {
            let source = rate_source(&config)?;
            run_interactive(&mut session, &source).await
        }

        Commands::Info => {
            show_info(&config);
            Ok(())
        }
    }
}

fn rate_source(config: &Config) -> anyhow::Result<FrankfurterSource> {
    Ok(FrankfurterSource::with_url(
        config.api_url.clone(),
        config.timeout(),
    )?)
}

async fn fetch_with_spinner<R: RateSource>(session: &mut CliSession, source: &R) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching latest rate from {}...", source.name()));
    pb.enable_steady_tick(Duration::from_millis(100));

    session.refresh(source).await;

    pb.finish_and_clear();
}

fn handle_history_action(
    action: HistoryAction,
    session: &mut CliSession,
    verbose: bool,
) -> anyhow::Result<()> {
    match action {
        HistoryAction::List => {
            print_history(&session.history(), verbose);
            Ok(())
        }

        HistoryAction::Remove { id } => {
            session.remove(&id)?;
            println!("{} Removed {}", "✓".green().bold(), id);
            Ok(())
        }

        HistoryAction::Clear { force } => {
            if !force {
                bail!("refusing to clear history without --force");
            }
            session.clear_history()?;
            println!("{} History cleared", "✓".green().bold());
            Ok(())
        }

        HistoryAction::Export { format, output } => {
            let format = ExportFormat::from_name(&format)?;
            let text = export(&session.history(), format)?;
            match output {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "{} Exported to {}",
                        "✓".green().bold(),
                        path.display()
                    );
                }
                None => print!("{}", text),
            }
            Ok(())
        }

        HistoryAction::Check => match session.history_store().load() {
            Ok(entries) => {
                println!(
                    "{} History readable ({} entries)",
                    "✓".green().bold(),
                    entries.len()
                );
                Ok(())
            }
            Err(e) => bail!("{}", e),
        },
    }
}

const INTERACTIVE_HELP: &str = "Commands:
  krw <amount>    set the KRW amount
  usd <amount>    set the USD amount
  refresh         fetch the published rate again
  save            save the current comparison
  history         list saved comparisons
  delete <id>     delete one saved comparison
  clear           delete all saved comparisons
  help            show this help
  quit            leave";

async fn run_interactive<R: RateSource>(session: &mut CliSession, source: &R) -> anyhow::Result<()> {
    println!("{}", "rate-gap interactive".cyan().bold());
    println!("{}", INTERACTIVE_HELP.dimmed());
    println!();

    fetch_with_spinner(session, source).await;
    print_rate(&session.rate_view());
    print_view(&session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "krw" => {
                session.set_krw_text(arg);
                print_view(&session.view());
            }
            "usd" => {
                session.set_usd_text(arg);
                print_view(&session.view());
            }
            "refresh" => {
                fetch_with_spinner(session, source).await;
                print_rate(&session.rate_view());
                print_view(&session.view());
            }
            "save" => match session.save()? {
                Some(entry) => println!("{} Saved as {}", "✓".green().bold(), entry.id),
                None => println!("{}", session.view().caption.yellow()),
            },
            "history" => print_history(&session.history(), false),
            "delete" if !arg.is_empty() => {
                session.remove(arg)?;
                println!("{} Removed {}", "✓".green().bold(), arg);
            }
            "clear" => {
                session.clear_history()?;
                println!("{} History cleared", "✓".green().bold());
            }
            "help" => println!("{}", INTERACTIVE_HELP),
            "quit" | "exit" => break,
            _ => println!("{} {}", "Unknown command:".yellow(), line),
        }
    }

    Ok(())
}

fn print_rate(view: &RateView) {
    println!("{}", format!("Published Rate ({})", CurrencyPair::USD_KRW).bold());
    println!("  {}", view.rate.cyan().bold());
    if !view.meta.is_empty() {
        println!("  {}", view.meta.dimmed());
    }
    println!();
}

fn print_view(view: &ComparisonView) {
    println!("{}", "Your Exchange".bold());
    println!("  {} {}", "Effective rate:".bold(), view.effective_rate);
    let delta = match view.direction {
        Some(Direction::Lost) => view.delta.red().bold(),
        Some(Direction::Gained) => view.delta.bright_green().bold(),
        None => view.delta.normal(),
    };
    println!("  {} {}", "Difference:    ".bold(), delta);
    println!("  {} {}", "Impact:        ".bold(), view.impact);
    println!("  {}", view.caption.dimmed());
    println!();
}

fn print_history(entries: &[HistoryEntry], verbose: bool) {
    println!("{}", "History".cyan().bold());
    println!("{}", "=======".cyan());

    if entries.is_empty() {
        println!("{}", "  No saved comparisons.".dimmed());
        println!();
        return;
    }

    for entry in entries {
        let caption = match entry.direction() {
            Direction::Lost => "lost".red(),
            Direction::Gained => "gained".bright_green(),
        };
        println!(
            "  {} {} KRW -> {} USD  @ {} vs {} ({})  {} {} {}",
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            format_rate(entry.krw_amount),
            format_rate(entry.usd_amount),
            format_rate(entry.effective_rate),
            format_rate(entry.published_rate),
            entry.rate_as_of,
            format_delta(entry.delta_pct),
            format_impact(entry.impact_usd()),
            caption
        );
        if verbose {
            println!("     Id: {}", entry.id.dimmed());
        }
    }
    println!();
}

fn show_info(config: &Config) {
    println!(
        "{} {}",
        "rate-gap".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Data directory:".bold(), config.data_dir.display());
    println!("  {} {:?}", "Storage:".bold(), config.storage);
    println!("  {} {}", "Rate source:".bold(), config.api_url);
    println!("  {} {}s", "Timeout:".bold(), config.timeout_secs);
    println!();

    println!("{}", "Features".bold());
    println!("{}", "========".dimmed());
    println!(
        "  {} {}",
        "SQLite storage:".bold(),
        feature_status(cfg!(feature = "rusqlite-support"))
    );
    println!(
        "  {} {}",
        "Async runtime:".bold(),
        feature_status(cfg!(feature = "async"))
    );
    println!();
}

fn feature_status(enabled: bool) -> colored::ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".dimmed()
    }
}
