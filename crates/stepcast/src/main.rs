mod app;
mod cli;
mod commands;
mod config;
mod render;
mod theme;

use clap::Parser;
use colored::Colorize;

fn log_level(verbose: u8, quiet: bool) -> tracing::Level {
    if quiet {
        return tracing::Level::ERROR;
    }
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(log_level(2, true), tracing::Level::ERROR);
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(log_level(0, false), tracing::Level::WARN);
        assert_eq!(log_level(1, false), tracing::Level::DEBUG);
        assert_eq!(log_level(5, false), tracing::Level::TRACE);
    }
}
