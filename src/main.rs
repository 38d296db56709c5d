//! AllerLens - Food label allergen scanner
//!
//! Command-line front end over the scanning library.

use allerlens::config::Config;
use allerlens::ocr;
use allerlens::scanner::{IngredientList, Scanner};
use allerlens::store::SqliteStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Ingredient database path (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// OCR label images; several images are read as frames of one label
    Scan {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Check text for trigger ingredients (reads stdin when TEXT is omitted)
    Check {
        text: Option<String>,

        /// Report which layer matched each ingredient
        #[arg(long)]
        explain: bool,
    },
    /// Add a trigger ingredient
    Add { ingredient: String },
    /// List trigger ingredients
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging on stderr before loading config; the configured level
    // replaces the initial filter once it is known.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let initial = env_filter.unwrap_or_else(|| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if !from_env && !args.verbose {
        filter_handle
            .modify(|filter| *filter = EnvFilter::new(&config.log_level))
            .context("Failed to apply configured log level")?;
    }

    debug!("🔎 AllerLens v{} starting...", env!("CARGO_PKG_VERSION"));

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.db_path));
    let store = Arc::new(SqliteStore::open(&db_path)?);
    let source = ocr::create_source(&config.ocr)?;
    let scanner = Scanner::new(source, store, &config);

    match args.command {
        Cmd::Scan { images } => {
            let mut frames = Vec::with_capacity(images.len());
            for path in &images {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read image {}", path.display()))?;
                frames.push(bytes);
            }

            if frames.len() == 1 {
                let image = frames.remove(0);
                let report = scanner.scan_image(image).await?;
                if args.json {
                    print_json(&report)?;
                } else {
                    println!("Extracted text:\n{}\n", report.extracted_text);
                    print_flagged(&report.flagged_ingredients);
                }
            } else {
                let report = scanner.scan_frames(frames).await?;
                if args.json {
                    print_json(&report)?;
                } else {
                    for (path, text) in images.iter().zip(&report.all_text) {
                        println!("{}:\n{}\n", path.display(), text);
                    }
                    print_flagged(&report.flagged_ingredients);
                }
            }
        }
        Cmd::Check { text, explain } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read text from stdin")?;
                    buf
                }
            };

            if explain {
                let triggers = scanner.list_ingredients()?;
                let found = scanner.explain_text(&text, &triggers);
                if args.json {
                    print_json(&found)?;
                } else if found.is_empty() {
                    println!("✅ No trigger ingredients found.");
                } else {
                    for m in &found {
                        println!("⚠️  {} ({:?})", m.ingredient, m.kind);
                    }
                }
            } else {
                let report = scanner.scan_text(&text)?;
                if args.json {
                    print_json(&report)?;
                } else {
                    print_flagged(&report.flagged_ingredients);
                }
            }
        }
        Cmd::Add { ingredient } => {
            let stored = scanner.add_ingredient(&ingredient)?;
            if args.json {
                print_json(&serde_json::json!({
                    "message": format!("Ingredient \"{}\" added.", stored)
                }))?;
            } else {
                println!("Ingredient \"{}\" added.", stored);
            }
        }
        Cmd::List => {
            let ingredients = scanner.list_ingredients()?;
            if args.json {
                print_json(&IngredientList { ingredients })?;
            } else {
                for ingredient in &ingredients {
                    println!("{}", ingredient);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_flagged(flagged: &[String]) {
    if flagged.is_empty() {
        println!("✅ No trigger ingredients found.");
    } else {
        println!("⚠️  Trigger ingredients found:");
        for ingredient in flagged {
            println!("  - {}", ingredient);
        }
    }
}
