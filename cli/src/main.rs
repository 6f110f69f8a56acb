use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use libspz_core::layout::derive_display_layout;
use libspz_core::pipeline::process_with_padding;
use libspz_core::plate::{plate_number, PlateData};
use libspz_core::prefs::Preferences;
use libspz_core::saved::{SavedPlateEntry, SavedPlates};

#[derive(Parser)]
#[command(name = "libspz")]
#[command(about = "Czech custom registration plate candidate derivation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Single input for a quick derivation
    input: Option<String>,

    /// Padding character override (must be a valid plate character)
    #[arg(long)]
    padding_char: Option<char>,

    /// Print the full derivation result as JSON
    #[arg(long)]
    json: bool,

    /// Preferences file (TOML); defaults to ~/.libspz/prefs.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Saved plates database; defaults to ~/.libspz/saved.redb
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: derive a plate for every input line
    Repl,
    /// Derive a plate and store it in the saved plates database
    Save { input: String },
    /// List saved plates
    List,
    /// Remove a saved plate by its list index
    Remove { index: usize },
    /// Remove all saved plates
    Clear,
}

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".libspz")
}

fn load_prefs(cli: &Cli) -> Result<Preferences> {
    if let Some(path) = &cli.config {
        return Preferences::load_toml(path)
            .map_err(|e| anyhow!("failed to load preferences from {}: {e}", path.display()));
    }
    let default_path = data_dir().join("prefs.toml");
    if default_path.exists() {
        return Preferences::load_toml(&default_path)
            .map_err(|e| anyhow!("failed to load preferences from {}: {e}", default_path.display()));
    }
    Ok(Preferences::default())
}

fn open_store(cli: &Cli) -> SavedPlates {
    let path = cli
        .db
        .clone()
        .unwrap_or_else(|| data_dir().join("saved.redb"));
    SavedPlates::new_redb(&path).unwrap_or_else(|e| {
        eprintln!(
            "warning: failed to open saved plates at {:?}: {}; using in-memory store",
            path, e
        );
        SavedPlates::new_in_memory()
    })
}

fn render_plate(data: &PlateData, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    if let Some(message) = &data.metadata.error_message {
        eprintln!("error: {}", message);
    }
    if data.candidates.is_empty() {
        println!("(no plate)");
        return Ok(());
    }

    let layout = derive_display_layout(&data.candidates);
    let vowel_line: String = layout
        .vowel_row
        .vowels
        .iter()
        .map(|v| match v {
            Some(c) => c.selected.clone(),
            None => "·".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    let plate_line: String = layout
        .plate_row
        .candidates
        .iter()
        .map(|c| c.selected.clone())
        .collect::<Vec<_>>()
        .join(" ");

    // The vowel row has nine slots; offsetting the plate row by one puts
    // each cell between the two slots that surround it.
    println!("{}", vowel_line);
    println!(" {}", plate_line);
    println!("plate: {}", plate_number(&data.candidates));

    for err in layout
        .vowel_row
        .errors
        .iter()
        .chain(layout.plate_row.errors.iter())
    {
        eprintln!("display: {}", err);
    }
    Ok(())
}

fn run_repl(padding_char: char, json: bool) -> Result<()> {
    println!("libspz — type text and press Enter to derive a plate");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line?;
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }
        let data = process_with_padding(input, padding_char);
        render_plate(&data, json)?;
        println!();
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let prefs = load_prefs(&cli)?;
    let padding_char = match cli.padding_char {
        Some(ch) if libspz_core::charset::is_valid_char(ch) => ch,
        Some(ch) => bail!("'{}' is not a valid plate character", ch),
        None => prefs.effective_padding_char(),
    };

    match &cli.command {
        Some(Commands::Repl) => run_repl(padding_char, cli.json),
        Some(Commands::Save { input }) => {
            let data = process_with_padding(input, padding_char);
            if !data.metadata.is_valid {
                bail!(
                    "cannot save invalid plate: {}",
                    data.metadata.error_message.as_deref().unwrap_or("unknown error")
                );
            }
            let store = open_store(&cli);
            store.add(SavedPlateEntry::from_plate(&data))?;
            render_plate(&data, cli.json)?;
            Ok(())
        }
        Some(Commands::List) => {
            let store = open_store(&cli);
            let entries = store.list()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("(no saved plates)");
            }
            for (i, entry) in entries.iter().enumerate() {
                if entry.vowels.is_empty() {
                    println!("{}. {} ({})", i, entry.plate_number, entry.input);
                } else {
                    println!(
                        "{}. {} ({}, vowels {})",
                        i, entry.plate_number, entry.input, entry.vowels
                    );
                }
            }
            Ok(())
        }
        Some(Commands::Remove { index }) => {
            let store = open_store(&cli);
            match store.remove(*index)? {
                Some(entry) => {
                    println!("removed {}. {}", index, entry.plate_number);
                    Ok(())
                }
                None => bail!("no saved plate at index {}", index),
            }
        }
        Some(Commands::Clear) => {
            let store = open_store(&cli);
            store.clear()?;
            println!("saved plates cleared");
            Ok(())
        }
        None => {
            if let Some(input) = &cli.input {
                let data = process_with_padding(input, padding_char);
                render_plate(&data, cli.json)
            } else {
                run_repl(padding_char, cli.json)
            }
        }
    }
}
