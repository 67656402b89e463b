use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// List bookable resources
    Resources,

    /// List committed bookings
    Bookings,

    /// Show the 24 hourly slots of a resource on a date
    Availability {
        #[arg(short, long)]
        resource: String,

        /// Calendar date, YYYY-MM-DD
        #[arg(short, long)]
        date: String,
    },

    /// Reserve one hourly slot
    Reserve {
        #[arg(short, long)]
        resource: String,

        #[arg(short, long)]
        date: String,

        #[arg(long, allow_hyphen_values = true)]
        hour: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,
    },

    /// Read commands from stdin against a single in-process ledger
    Shell,
}

/// shell 模式下每一行的解析器
#[derive(Debug, Parser)]
#[command(name = "shell", no_binary_name = true, disable_help_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Quit,
    Run(Command),
}

/// 解析一行 shell 輸入；錯誤訊息交給 clap 產生
pub fn parse_shell_line(line: &str) -> Result<ShellInput, clap::Error> {
    let tokens = split_words(line);
    match tokens.first().map(String::as_str) {
        None => Ok(ShellInput::Empty),
        Some("quit") | Some("exit") => Ok(ShellInput::Quit),
        Some(_) => ShellLine::try_parse_from(tokens).map(|l| ShellInput::Run(l.command)),
    }
}

// 以空白切字，雙引號內保留空白
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}
