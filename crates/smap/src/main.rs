//! smap CLI - Sitemap generator.
//!
//! Provides commands for:
//! - `render`: Render the configured sitemap as an HTML fragment
//! - `check`: Verify that every configured section resolves against the content

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// smap - Sitemap generator.
#[derive(Parser)]
#[command(name = "smap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the sitemap.
    Render(RenderArgs),
    /// Check sitemap sections against the content snapshot.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.site.verbose,
            Self::Check(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from(["smap", "render", "--current", "42", "-v"]).unwrap();

        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::try_parse_from(["smap", "check"]).unwrap();

        assert!(!cli.command.verbose());
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_current() {
        assert!(Cli::try_parse_from(["smap", "render", "--current", "home"]).is_err());
    }
}
