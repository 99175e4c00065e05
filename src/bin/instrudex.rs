//! Instrudex Command Line Interface
//!
//! A terminal browser for the surgical instrument catalog.
//!
//! # Usage
//!
//! ```bash
//! # List specializations with their sets and counts
//! instrudex specializations
//!
//! # Search everything
//! instrudex search "cardiac"
//!
//! # Show one instrument card
//! instrudex show "Bone Cutter"
//!
//! # Interactive browse loop
//! instrudex browse
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use instrudex::catalog::{set_accent_hex, CatalogStore, Instrument, SpecialityColor};
use instrudex::navigation::{NavCommand, NavExecutor, NavResult, Session, View};
use instrudex::search::search;

#[derive(Parser)]
#[command(name = "instrudex")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search the surgical instrument catalog")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Load the catalog from a directory instead of the bundled data
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Force a fresh fetch from the configured sheet (remote feature)
    #[arg(long, global = true)]
    refresh: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List specializations with their sets and instrument counts
    Specializations,

    /// List sets, optionally restricted to one speciality
    Sets {
        /// Speciality name filter (e.g. "Orthopedic Surgery")
        #[arg(short, long)]
        speciality: Option<String>,
    },

    /// List instruments, optionally restricted to one set
    Instruments {
        /// Set name filter (e.g. "Ortho Basic Set")
        #[arg(short, long)]
        set: Option<String>,
    },

    /// Search specializations, sets, and instruments
    Search {
        /// Query text (case-insensitive substring)
        query: String,
    },

    /// Show one instrument card by exact name
    Show {
        /// Instrument name
        name: String,
    },

    /// Interactive browse loop
    Browse,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = match load_catalog(&cli) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            eprintln!("The catalog is empty. Fix the data source and retry with --refresh.");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Specializations => cmd_specializations(&catalog, cli.format),
        Commands::Sets { speciality } => cmd_sets(&catalog, speciality.as_deref(), cli.format),
        Commands::Instruments { set } => cmd_instruments(&catalog, set.as_deref(), cli.format),
        Commands::Search { query } => cmd_search(&catalog, query, cli.format),
        Commands::Show { name } => cmd_show(&catalog, name, cli.format),
        Commands::Browse => cmd_browse(&catalog),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!(r#"{{"error": "{}"}}"#, e.to_string().replace('"', "\\\""));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(cli: &Cli) -> anyhow::Result<CatalogStore> {
    if let Some(dir) = &cli.data {
        return Ok(instrudex::loader::load_from_dir(dir)?);
    }

    #[cfg(feature = "remote")]
    if cli.refresh {
        // A forced refresh always hits the sheet, even though the bundled
        // instrument list would normally win.
        let config = instrudex::loader::LoadConfig::from_env();
        let sheet_id = config.sheet_id.ok_or(instrudex::LoadError::MissingSheetId {
            env_var: instrudex::loader::ENV_SHEET_ID,
        })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let instruments =
            runtime.block_on(instrudex::loader::fetch_instruments_from_sheet(&sheet_id))?;
        let sets = instrudex::loader::load_bundled()?.sets().to_vec();
        return Ok(CatalogStore::new(sets, instruments));
    }
    #[cfg(not(feature = "remote"))]
    if cli.refresh {
        anyhow::bail!("this build has no remote support; rebuild with the 'remote' feature");
    }

    Ok(instrudex::loader::load_bundled()?)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_specializations(catalog: &CatalogStore, format: OutputFormat) -> anyhow::Result<()> {
    let view = catalog.specializations_view();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            for spec in &view {
                println!(
                    "{}\t{} sets\t{} instruments",
                    spec.tag.display_name(),
                    spec.sets.len(),
                    spec.count
                );
            }
        }
        OutputFormat::Pretty => {
            for spec in &view {
                println!(
                    "{}  {} sets \u{2022} {} instruments",
                    paint(spec.tag.display_name(), spec.color).bold(),
                    spec.sets.len(),
                    spec.count
                );
                for set in &spec.sets {
                    println!("    {}", set.name);
                }
            }
        }
    }
    Ok(())
}

fn cmd_sets(
    catalog: &CatalogStore,
    speciality: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let sets: Vec<_> = match speciality {
        Some(name) => catalog
            .specializations_view()
            .into_iter()
            .find(|spec| spec.tag.display_name().eq_ignore_ascii_case(name))
            .map(|spec| spec.sets)
            .unwrap_or_default(),
        None => catalog.sets().to_vec(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sets)?),
        OutputFormat::Text => {
            for set in &sets {
                println!("{}\t{} instruments", set.name, set.count);
            }
        }
        OutputFormat::Pretty => {
            for set in &sets {
                let accent = hex_color(set_accent_hex(&set.name));
                println!(
                    "{} {}  {} instruments",
                    "\u{25cf}".truecolor(accent.0, accent.1, accent.2),
                    set.name.bold(),
                    set.count
                );
                if let Some(desc) = &set.set_description {
                    println!("    {desc}");
                }
            }
        }
    }
    Ok(())
}

fn cmd_instruments(
    catalog: &CatalogStore,
    set: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let instruments: Vec<&Instrument> = match set {
        Some(name) => catalog.instruments_in_set(name),
        None => catalog.instruments().iter().collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&instruments)?),
        OutputFormat::Text => {
            for inst in &instruments {
                println!("{}\t{}", inst.name, inst.category);
            }
        }
        OutputFormat::Pretty => {
            for inst in &instruments {
                println!("{}  [{}]", inst.name.bold(), inst.category);
            }
        }
    }
    Ok(())
}

fn cmd_search(catalog: &CatalogStore, query: &str, format: OutputFormat) -> anyhow::Result<()> {
    let results = search(query, catalog);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            for spec in &results.specializations {
                println!("specialization\t{}", spec.tag.display_name());
            }
            for set in &results.sets {
                println!("set\t{}", set.name);
            }
            for inst in &results.instruments {
                println!("instrument\t{}", inst.name);
            }
        }
        OutputFormat::Pretty => {
            if results.is_empty() {
                println!("No results found for \"{query}\"");
                return Ok(());
            }
            println!(
                "{} results for \"{}\"\n",
                results.total().to_string().bold(),
                query
            );
            if !results.specializations.is_empty() {
                println!("{}", "Specializations".underline());
                for spec in &results.specializations {
                    println!(
                        "  {}  {} sets",
                        paint(spec.tag.display_name(), spec.color),
                        spec.sets.len()
                    );
                }
            }
            if !results.sets.is_empty() {
                println!("{}", "Sets".underline());
                for set in &results.sets {
                    println!("  {}  {} instruments", set.name, set.count);
                }
            }
            if !results.instruments.is_empty() {
                println!("{}", "Instruments".underline());
                for inst in &results.instruments {
                    println!("  {}  [{}]", inst.name, inst.category);
                }
            }
        }
    }
    Ok(())
}

fn cmd_show(catalog: &CatalogStore, name: &str, format: OutputFormat) -> anyhow::Result<()> {
    let inst = catalog
        .instrument_by_name(name)
        .ok_or_else(|| anyhow::anyhow!("no instrument named '{name}'"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(inst)?),
        OutputFormat::Text | OutputFormat::Pretty => print_card(inst),
    }
    Ok(())
}

fn print_card(inst: &Instrument) {
    println!("{}  [{}]", inst.name.bold(), inst.category);
    if let Some(brief) = &inst.brief {
        println!("{brief}");
    }
    println!("\n{}", inst.description);
    println!("\nUsage: {}", inst.usage);
    if !inst.features.is_empty() {
        println!("Features:");
        for feature in &inst.features {
            println!("  - {feature}");
        }
    }
    println!(
        "Material: {}  Size: {}  Sterilization: {}",
        inst.material, inst.size, inst.sterilization
    );
    if !inst.sets.is_empty() {
        println!("Sets: {}", inst.sets.join(", "));
    }
}

// =============================================================================
// INTERACTIVE BROWSE LOOP
// =============================================================================

fn cmd_browse(catalog: &CatalogStore) -> anyhow::Result<()> {
    let mut session = Session::new();
    let mut editor = rustyline::DefaultEditor::new()?;

    println!("Type 'help' for commands, 'quit' to leave.\n");
    print_view(&session, catalog);

    loop {
        let line = match editor.readline("instrudex> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line)?;

        let (verb, rest) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "quit" | "exit" | "q" => break,
            "help" => print_help(),
            "list" | "ls" => print_view(&session, catalog),
            "open" => {
                match rest.parse::<usize>() {
                    Ok(n) if n >= 1 => {
                        let result = open_entry(&mut session, catalog, n - 1);
                        report(result);
                    }
                    _ => println!("usage: open <number>"),
                }
                print_view(&session, catalog);
            }
            "back" | "b" => {
                let cmd = match session.current_view() {
                    View::Specializations => None,
                    View::SpecializationSets => Some(NavCommand::GoBackToSpecializations),
                    View::SetDetail => Some(NavCommand::GoBackToSpecializationSets),
                    View::InstrumentDetail => Some(NavCommand::GoBackToSetDetail),
                    View::SearchResults => Some(NavCommand::ClearSearch),
                };
                match cmd {
                    Some(cmd) => {
                        report(session.execute_nav(cmd, catalog));
                        print_view(&session, catalog);
                    }
                    None => println!("Already at the top."),
                }
            }
            "search" | "s" => {
                report(session.execute_nav(NavCommand::Search(rest.to_string()), catalog));
                print_view(&session, catalog);
            }
            "clear" => {
                report(session.execute_nav(NavCommand::ClearSearch, catalog));
                print_view(&session, catalog);
            }
            "next" | "n" => {
                report(session.execute_nav(NavCommand::CycleNext, catalog));
                print_view(&session, catalog);
            }
            "prev" | "p" => {
                report(session.execute_nav(NavCommand::CyclePrevious, catalog));
                print_view(&session, catalog);
            }
            _ => println!("Unknown command '{verb}'. Type 'help'."),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  list            show the current view");
    println!("  open <n>        open entry n of the current view");
    println!("  back            go back one level (or clear the search)");
    println!("  search <text>   search everything");
    println!("  clear           drop the active search");
    println!("  next / prev     cycle through the current set's instruments");
    println!("  quit            leave");
}

/// Open the n-th entry of whatever the current view lists.
fn open_entry(session: &mut Session, catalog: &CatalogStore, index: usize) -> NavResult {
    match session.current_view() {
        View::Specializations => {
            let view = catalog.specializations_view();
            match view.into_iter().nth(index) {
                Some(spec) => session.execute_nav(NavCommand::SelectSpecialization(spec), catalog),
                None => NavResult::Ignored {
                    reason: "no such entry".into(),
                },
            }
        }
        View::SpecializationSets => {
            let set = session
                .selected_specialization()
                .and_then(|spec| spec.sets.get(index).cloned());
            match set {
                Some(set) => session.execute_nav(NavCommand::SelectSet(set), catalog),
                None => NavResult::Ignored {
                    reason: "no such entry".into(),
                },
            }
        }
        View::SetDetail => {
            let inst = session
                .selected_set()
                .map(|set| catalog.instruments_in_set(&set.name))
                .and_then(|members| members.get(index).cloned().cloned());
            match inst {
                Some(inst) => session.execute_nav(NavCommand::SelectInstrument(inst), catalog),
                None => NavResult::Ignored {
                    reason: "no such entry".into(),
                },
            }
        }
        View::SearchResults => {
            // Numbering runs specializations, then sets, then instruments.
            let Some(results) = session.search_results().cloned() else {
                return NavResult::Ignored {
                    reason: "no search results".into(),
                };
            };
            let n_specs = results.specializations.len();
            let n_sets = results.sets.len();
            if index < n_specs {
                session.execute_nav(
                    NavCommand::SelectSpecialization(results.specializations[index].clone()),
                    catalog,
                )
            } else if index < n_specs + n_sets {
                session.execute_nav(
                    NavCommand::SelectSet(results.sets[index - n_specs].clone()),
                    catalog,
                )
            } else if let Some(inst) = results.instruments.get(index - n_specs - n_sets) {
                session.execute_nav(NavCommand::SelectInstrument(inst.clone()), catalog)
            } else {
                NavResult::Ignored {
                    reason: "no such entry".into(),
                }
            }
        }
        View::InstrumentDetail => NavResult::Ignored {
            reason: "use next/prev or back here".into(),
        },
    }
}

fn print_view(session: &Session, catalog: &CatalogStore) {
    let banner = session.banner();
    let accent = hex_color(session.active_color().hex());
    println!(
        "\n{}",
        banner.title.truecolor(accent.0, accent.1, accent.2).bold()
    );
    if !banner.subtitle.is_empty() {
        println!("{}", banner.subtitle.dimmed());
    }

    match session.current_view() {
        View::Specializations => {
            for (i, spec) in catalog.specializations_view().iter().enumerate() {
                println!(
                    "  {}. {}  {} sets \u{2022} {} instruments",
                    i + 1,
                    paint(spec.tag.display_name(), spec.color),
                    spec.sets.len(),
                    spec.count
                );
            }
        }
        View::SpecializationSets => {
            if let Some(spec) = session.selected_specialization() {
                for (i, set) in spec.sets.iter().enumerate() {
                    println!("  {}. {}  {} instruments", i + 1, set.name, set.count);
                }
            }
        }
        View::SetDetail => {
            if let Some(set) = session.selected_set() {
                if let Some(desc) = &set.set_description {
                    println!("{desc}");
                }
                for (i, inst) in catalog.instruments_in_set(&set.name).iter().enumerate() {
                    println!("  {}. {}  [{}]", i + 1, inst.name, inst.category);
                }
            }
        }
        View::InstrumentDetail => {
            if let Some(inst) = session.selected_instrument() {
                println!();
                print_card(inst);
            }
        }
        View::SearchResults => {
            if let Some(results) = session.search_results() {
                let mut n = 0;
                for spec in &results.specializations {
                    n += 1;
                    println!(
                        "  {}. {}  (specialization)",
                        n,
                        paint(spec.tag.display_name(), spec.color)
                    );
                }
                for set in &results.sets {
                    n += 1;
                    println!("  {}. {}  (set)", n, set.name);
                }
                for inst in &results.instruments {
                    n += 1;
                    println!("  {}. {}  (instrument)", n, inst.name);
                }
                if n == 0 {
                    println!("  No results. Try different terms.");
                }
            }
        }
    }
    println!();
}

fn report(result: NavResult) {
    if let NavResult::Ignored { reason } = result {
        println!("({reason})");
    }
}

// =============================================================================
// COLOR HELPERS
// =============================================================================

fn paint(text: &str, color: SpecialityColor) -> colored::ColoredString {
    let (r, g, b) = hex_color(color.hex());
    text.truecolor(r, g, b)
}

/// Parse a `#RRGGBB` token. The tables only carry well-formed tokens, so
/// malformed input just falls back to white.
fn hex_color(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return (255, 255, 255);
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).unwrap_or(255)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}
