//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the ragbot-server CLI.

use crate::db::KnowledgeBaseStats;
use crate::rag::IngestOutcome;
use crate::types::RagQueryResponse;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup banner
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "ragbot".bright_cyan().bold(),
                version.dimmed(),
                "PDF question answering server".bright_white()
            );
        } else {
            println!("\n   ragbot {}\n   PDF question answering server\n", version);
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Summary of an ingested document.
    pub fn indexed(&self, outcome: &IngestOutcome) {
        self.success(&format!("Indexed {}", outcome.file));
        self.kv("chunks", &outcome.chunks.to_string());
        self.kv("total chunks", &outcome.total_chunks.to_string());
        self.kv("document hash", &outcome.document_hash);
    }

    /// An answer followed by the files it drew on.
    pub fn answer(&self, response: &RagQueryResponse) {
        self.header("Answer");
        for line in response.answer.lines() {
            println!("    {}", line);
        }

        self.header("Sources");
        if response.sources.is_empty() {
            self.warning("No indexed documents matched");
        }
        for source in &response.sources {
            self.list_item(source);
        }
        println!();
    }

    pub fn stats(&self, stats: &KnowledgeBaseStats) {
        self.header("Knowledge base");
        self.kv("chunks", &stats.chunks.to_string());
        self.kv("vectors", &stats.vectors.to_string());
        self.kv("dimensions", &stats.dimensions.to_string());

        self.header(&format!("Sources ({})", stats.sources.len()));
        for source in &stats.sources {
            self.list_item(source);
        }
        println!();
    }
}
