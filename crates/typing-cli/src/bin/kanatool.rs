use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use typing_cli::commands::{config_ops, match_ops, session_ops};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "kanatool", about = "Romaji typing matcher diagnostics")]
struct Cli {
    /// Custom romaji table TOML (replaces the embedded default)
    #[arg(long, global = true)]
    romaji: Option<String>,
    /// Custom settings TOML (replaces the embedded default)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSON-lines debug traces into this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match romaji input against the head of a kana target
    Match {
        /// Kana target (hiragana)
        target: String,
        /// Romaji input
        input: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether romaji input can still become a match
    Prefix {
        /// Kana target (hiragana)
        target: String,
        /// Romaji input
        input: String,
    },
    /// List the keys that keep the input viable
    Hints {
        /// Kana target (hiragana)
        target: String,
        /// Romaji typed so far
        #[arg(default_value = "")]
        input: String,
    },
    /// Show the romaji spellings of one kana unit
    Spellings {
        /// Kana (1-2 characters)
        kana: String,
    },
    /// Print the active romaji table
    Table,
    /// Type a key sequence through a session and report every step
    Simulate {
        /// Kana target (hiragana or katakana)
        target: String,
        /// Keys to type
        keys: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let _trace = cli
        .trace_dir
        .as_deref()
        .map(|dir| die!(kana_typing::init_tracing(dir), "Error opening trace directory: {}"));
    let engine = || {
        die!(
            config_ops::load_engine(cli.romaji.as_deref(), cli.settings.as_deref()),
            "{}"
        )
    };

    match cli.command {
        Command::Match {
            target,
            input,
            json,
        } => {
            let engine = engine();
            let report = match_ops::match_report(engine.matcher(), &target, &input);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                print!("{}", match_ops::format_match(&report));
            }
        }
        Command::Prefix { target, input } => {
            let engine = engine();
            println!("{}", match_ops::prefix(engine.matcher(), &target, &input));
        }
        Command::Hints { target, input } => {
            let engine = engine();
            println!("{}", match_ops::hints(engine.matcher(), &target, &input));
        }
        Command::Spellings { kana } => {
            let engine = engine();
            let list = die!(match_ops::spellings(engine.matcher(), &kana), "{}");
            println!("{list}");
        }
        Command::Table => {
            let engine = engine();
            print!("{}", match_ops::format_table(engine.matcher().table()));
        }
        Command::Simulate { target, keys, json } => {
            let engine = engine();
            let report = session_ops::simulate(&engine, &target, &keys);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                print!("{}", session_ops::format_simulation(&report));
            }
        }
        Command::RomajiExport => print!("{}", config_ops::romaji_export()),
        Command::RomajiValidate { file } => {
            println!("{}", die!(config_ops::romaji_validate(&file), "{}"));
        }
        Command::SettingsExport => print!("{}", config_ops::settings_export()),
        Command::SettingsValidate { file } => {
            println!("{}", die!(config_ops::settings_validate(&file), "{}"));
        }
    }
}
