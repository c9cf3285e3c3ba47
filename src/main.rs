//! Alloy Calculator
//!
//! Works out how many nuggets of each base metal an alloy needs.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};

use alloy_calculator::balancer::{self, Outcome};
use alloy_calculator::error::SessionError;
use alloy_calculator::i18n::{self, Text, Translations};
use alloy_calculator::loader::{self, DataBundle};
use alloy_calculator::report::{self, ResultsReport};
use alloy_calculator::sample;
use alloy_calculator::session::{Edit, Session, Update};
use alloy_calculator::units::metal_units_to_nuggets;

#[derive(Parser)]
#[command(name = "alloy-calculator")]
#[command(about = "Alloy composition calculator")]
struct Cli {
    /// Directory holding data/metals.json and lang/<code>.json
    #[arg(short, long, default_value = "public", global = true)]
    data_dir: PathBuf,

    /// Language code (defaults to the LANG locale when available, else fr)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable alloys with their component ranges
    List,

    /// List languages that have a string table
    Languages,

    /// Show the valid nugget range of each component
    Bounds {
        /// Alloy id (e.g. "tinbronze")
        alloy: String,

        /// Desired quantity in metal units
        #[arg(short, long, allow_negative_numbers = true)]
        units: f64,
    },

    /// Calculate the composition of an alloy
    Calc {
        /// Alloy id (e.g. "tinbronze")
        alloy: String,

        /// Desired quantity in metal units
        #[arg(short, long, allow_negative_numbers = true)]
        units: f64,

        /// Component edits applied in order: METAL=N, METAL+=N or METAL-=N
        #[arg(short, long = "edit")]
        edits: Vec<Edit>,
    },

    /// Write the sample data set into a directory
    Init {
        /// Target directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let available = loader::available_languages(&cli.data_dir);
    let locale = std::env::var("LANG").ok();
    let language = i18n::resolve_language(cli.lang.as_deref(), locale.as_deref(), &available);

    match &cli.command {
        Commands::Init { dir } => {
            sample::write_sample(dir)?;
            println!("Sample data written to {}", dir.display());
            return Ok(());
        }
        Commands::Languages => {
            if available.is_empty() {
                println!("No language files under {}", cli.data_dir.display());
            }
            for code in &available {
                let marker = if *code == language { " (selected)" } else { "" };
                println!("  {code}{marker}");
            }
            return Ok(());
        }
        _ => {}
    }

    let bundle = match loader::load_bundle(&cli.data_dir, &language) {
        Ok(bundle) => bundle,
        Err(e) => {
            debug!(error = %e, "failed to load calculator data");
            // The string table may still be readable even if the catalog is not
            let message = loader::load_translations(&loader::language_path(&cli.data_dir, &language))
                .map(|t| t.get(Text::ErrorDataLoading).to_string())
                .unwrap_or_else(|_| Text::ErrorDataLoading.fallback().to_string());
            eprintln!("{message}");
            process::exit(1);
        }
    };

    match cli.command {
        Commands::List => list_alloys(&bundle),

        Commands::Bounds { alloy, units } => {
            let t = &bundle.translations;
            let alloy = bundle
                .catalog
                .find_alloy(&alloy)
                .ok_or_else(|| SessionError::UnknownAlloy(alloy.clone()))?;

            match balancer::bounds(alloy, metal_units_to_nuggets(units)) {
                None => println!("{}", t.get(Text::SelectValidAlloyAndQuantity)),
                Some(all) => {
                    println!("{}", report::alloy_label(t, alloy));
                    for range in &all {
                        let name = report::metal_label(&bundle.catalog, t, &range.metal_id);
                        println!("  {:<20} {}", name, report::range_hint(t, range));
                    }
                }
            }
        }

        Commands::Calc { alloy, units, edits } => {
            let t = &bundle.translations;
            let mut session = Session::new(&bundle.catalog);
            session.select_alloy(&alloy)?;

            let mut update = match session.set_quantity(units) {
                Ok(update) => update,
                Err(SessionError::InvalidQuantity(_)) => {
                    println!("{}", t.get(Text::ErrorPositiveQuantity));
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            for edit in &edits {
                update = session.apply(edit)?;
            }

            print_update(&bundle, &session, &update, units);
        }

        Commands::Init { .. } | Commands::Languages => {}
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn list_alloys(bundle: &DataBundle) {
    let t = &bundle.translations;
    let alloys = bundle.catalog.alloys();

    println!("{}", t.get(Text::AppTitle));
    if alloys.is_empty() {
        println!("{}", t.get(Text::NoAlloysFound));
        return;
    }

    println!("{}", t.get(Text::LabelMetalSelect));
    println!("{:<16} {:<24} Components", "Id", "Name");
    println!("{}", "-".repeat(72));
    for alloy in alloys {
        let components: Vec<String> = alloy
            .components
            .iter()
            .map(|c| {
                format!(
                    "{} {}-{}%",
                    report::metal_label(&bundle.catalog, t, &c.metal_id),
                    c.min_percent,
                    c.max_percent
                )
            })
            .collect();
        println!(
            "{:<16} {:<24} {}",
            alloy.id,
            report::alloy_label(t, alloy),
            components.join(", ")
        );
    }
}

fn print_update(bundle: &DataBundle, session: &Session<'_>, update: &Update, units: f64) {
    let t: &Translations = &bundle.translations;
    let Some(alloy) = session.alloy() else {
        println!("{}", t.get(Text::SelectValidAlloyAndQuantity));
        return;
    };

    println!("{}", report::alloy_label(t, alloy));
    println!("{} {}", t.get(Text::LabelDesiredQuantity), units);

    if update.outcome == Outcome::NoComputation {
        println!("{}", t.get(Text::SelectValidAlloyAndQuantity));
        return;
    }

    println!();
    println!("{}", t.get(Text::OutputUnitText));
    let nuggets_short = t.get(Text::NuggetsShort);
    for range in &update.bounds {
        let name = report::metal_label(&bundle.catalog, t, &range.metal_id);
        let value = session
            .value(&range.metal_id)
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let flag = match &update.outcome {
            Outcome::Invalid(inv) if inv.is_flagged(&range.metal_id) => "  <!>",
            _ => "",
        };
        println!(
            "  {:<20} {:>6} {}  [{}]{}",
            name,
            value,
            nuggets_short,
            report::range_hint(t, range),
            flag
        );
    }
    println!();

    match &update.outcome {
        Outcome::Balanced(balanced) => {
            let results = ResultsReport::build(&bundle.catalog, t, alloy, balanced, units);
            print!("{results}");
        }
        Outcome::Invalid(invalid) => {
            if let Some(violation) = invalid.headline() {
                println!("{}", report::violation_message(&bundle.catalog, t, violation));
            }
        }
        Outcome::NoComputation => {}
    }
}
