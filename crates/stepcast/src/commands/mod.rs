pub mod check;
pub mod completion;
pub mod config;
pub mod trace;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        "stepcast".bold(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
