use anyhow::{Context, Result};
use shell_argv::Argv;
use std::{
    env,
    io::{self, BufRead, Write},
};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROMPT: &str = "$ ";

/// Settings read from the environment.
struct Config {
    prompt: String,
}

impl Config {
    fn from_env() -> Self {
        Config {
            prompt: env::var("SHELL_ARGV_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();

    if termion::is_tty(&io::stdin()) {
        interactive(&config)
    } else {
        piped()
    }
}

/// Reads lines from a non-terminal stdin until EOF.
fn piped() -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read line from stdin")?;
        print_tokens(&line)?;
    }
    Ok(())
}

/// Prompts for lines, editing them in raw mode.
fn interactive(config: &Config) -> Result<()> {
    loop {
        print!("{}", config.prompt);
        io::stdout().flush()?;

        // Enter raw mode to handle input character by character
        let mut stdout = io::stdout()
            .into_raw_mode()
            .context("failed to enter raw mode")?;
        let stdin = io::stdin();
        let mut buffer = String::new();

        for c in stdin.keys() {
            match c.context("failed to read key")? {
                Key::Ctrl('c') => {
                    buffer.clear();
                    write!(stdout, "\r\n")?;
                    break;
                }
                Key::Ctrl('d') => {
                    if buffer.is_empty() {
                        write!(stdout, "\r\n")?;
                        return Ok(());
                    }
                }
                Key::Char('\n') | Key::Char('\r') => {
                    write!(stdout, "\r\n")?;
                    break;
                }
                Key::Backspace => {
                    if buffer.pop().is_some() {
                        // Move cursor back, erase char with space, move back again
                        write!(stdout, "\x08 \x08")?;
                        stdout.flush()?;
                    }
                }
                Key::Char(c) => {
                    buffer.push(c);
                    write!(stdout, "{}", c)?;
                    stdout.flush()?;
                }
                _ => {}
            }
        }

        // Disable raw mode
        drop(stdout);

        print_tokens(&buffer)?;
    }
}

/// Tokenizes one line and prints its words, or the error on stderr.
fn print_tokens(line: &str) -> Result<()> {
    let argv = match line.parse::<Argv>() {
        Ok(argv) => argv,
        Err(e) => {
            eprintln!("shell-argv: {}", e);
            return Ok(());
        }
    };
    debug!(program = ?argv.program(), args = argv.args().len(), "parsed line");

    let mut stdout = io::stdout().lock();
    for (i, token) in argv.iter().enumerate() {
        writeln!(stdout, "argv[{}] = {:?}", i, token)?;
    }
    stdout.flush()?;
    Ok(())
}
