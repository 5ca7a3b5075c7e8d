//! Terminal front-end
//!
//! Each stdin line is one edit event. Lines starting with `:` are commands.

use std::path::PathBuf;

use clap::Parser;

use crate::core::features::keyboard::{key_at, MANSI_KEYS};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mansi-translator", about = "Russian <-> Mansi translator")]
pub struct CliArgs {
    /// Settings file to use instead of the platform config directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the translation endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Apply every response as it arrives, even for superseded requests
    #[arg(long)]
    pub last_arrival_wins: bool,

    /// Enable debug mode with verbose logging
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Swap,
    Copy,
    Key(char),
    Keys,
    Show,
    Quit,
    Help,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Text(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("swap"), None) => Command::Swap,
            (Some("copy"), None) => Command::Copy,
            (Some("keys"), None) => Command::Keys,
            (Some("show"), None) => Command::Show,
            (Some("quit"), None) | (Some("q"), None) => Command::Quit,
            (Some("help"), None) => Command::Help,
            (Some("key"), Some(index)) => match index.parse::<usize>().ok().and_then(key_at) {
                Some(ch) => Command::Key(ch),
                None => Command::Invalid(format!("no key {} (0..{})", index, MANSI_KEYS.len())),
            },
            _ => Command::Invalid(format!("unknown command: {}", line)),
        }
    }
}

pub const HELP: &str = "\
text      replace the input with this line
:swap     switch translation direction
:copy     copy the translation
:key N    append picker key N
:keys     list picker keys
:show     print the current session
:quit     exit";

pub fn format_keys() -> String {
    MANSI_KEYS
        .iter()
        .enumerate()
        .map(|(i, ch)| format!("{}:{}", i, ch))
        .collect::<Vec<_>>()
        .join(" ")
}
