//! CLI module for RAGBot
//!
//! Provides command-line interface parsing for the ragbot-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RAGBot - PDF question answering server
///
/// Indexes PDF documents into a local vector index and answers questions
/// about them with an OpenAI-compatible chat model.
#[derive(Parser, Debug)]
#[command(
    name = "ragbot-server",
    version,
    about = "RAGBot - PDF question answering server",
    long_about = "Indexes PDF documents into a local vector index and answers questions\n\
                  about them with an OpenAI-compatible chat model (Groq by default).\n\n\
                  Run without arguments to start the HTTP server.",
    after_help = "EXAMPLES:\n    \
                  ragbot-server                          # Start the server\n    \
                  ragbot-server ingest manual.pdf        # Index a PDF locally\n    \
                  ragbot-server query \"How do I reset?\"  # Ask a question\n    \
                  ragbot-server stats                    # Show index statistics"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ragbot.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Index a PDF file into the knowledge base
    Ingest {
        /// Path to the PDF
        path: PathBuf,
    },

    /// Answer a question from the indexed documents
    Query {
        /// The question
        text: String,
    },

    /// Show knowledge base statistics
    Stats,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether `--config` was given explicitly. An explicit file must exist.
    pub fn config_is_explicit(&self) -> bool {
        self.config != PathBuf::from("ragbot.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["ragbot-server"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("ragbot.toml"));
        assert!(!cli.config_is_explicit());
    }

    #[test]
    fn test_ingest_and_global_flags() {
        let cli = Cli::try_parse_from([
            "ragbot-server",
            "ingest",
            "docs/manual.pdf",
            "--no-color",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Ingest {
                path: PathBuf::from("docs/manual.pdf")
            })
        );
        assert!(cli.no_color);
        assert!(cli.config_is_explicit());
    }

    #[test]
    fn test_query_takes_text() {
        let cli = Cli::try_parse_from(["ragbot-server", "query", "what is it?"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Query {
                text: "what is it?".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["ragbot-server", "init"]).is_err());
    }
}
