//! Command-line interface for the viewer.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DEFAULT_LANGUAGE, TEXT_WRAP_WIDTH};
use crate::error::Result;
use crate::fetch::download_document;
use crate::header::{extract_meta, DocumentMeta};
use crate::html::{save_page, strip_tags};
use crate::http::create_client;
use crate::viewer::{load_tree, render_document, RenderOptions};

/// Recto Viewer - Render TEI documents as standalone HTML pages.
#[derive(Parser)]
#[command(name = "recto-viewer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a TEI document to an HTML page.
    Render {
        /// Input file path or http(s) URL
        input: String,

        /// Output file (default: derived from the document title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preferred language for abstract selection
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the parsed tag tree as JSON.
    Tree {
        /// Input file path or http(s) URL
        input: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Show document metadata without rendering.
    Info {
        /// Input file path or http(s) URL
        input: String,

        /// Preferred language for abstract selection
        #[arg(short, long)]
        language: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            language,
        } => render_command(&input, output.as_deref(), language.as_deref()),
        Commands::Tree {
            input,
            output,
            compact,
        } => tree_command(&input, output.as_deref(), compact),
        Commands::Info { input, language } => info_command(&input, language.as_deref()),
    }
}

/// Load document text from a file path or URL.
fn load_input(input: &str) -> Result<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message(format!("Downloading {input}..."));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let client = create_client()?;
        let result = download_document(&client, input);
        pb.finish_and_clear();
        result
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

/// Execute the render command.
fn render_command(input: &str, output: Option<&Path>, language: Option<&str>) -> Result<()> {
    let mut options = RenderOptions::new();
    if let Some(language) = language {
        options = options.with_language(language);
    }

    println!(
        "{} {}",
        style("Rendering").bold(),
        style(input).cyan()
    );

    let xml = load_input(input)?;
    let rendered = render_document(&xml, &options)?;

    println!("  Title: {}", style(&rendered.meta.title).green());
    if !rendered.meta.authors.is_empty() {
        println!("  Authors: {}", author_line(&rendered.meta));
    }
    println!("  Language: {}", rendered.language);
    if !rendered.footnotes.is_empty() {
        println!("  Footnotes: {}", rendered.footnotes.len());
    }

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&rendered.meta));
    save_page(&output_path, &rendered.page)?;

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the tree command.
fn tree_command(input: &str, output: Option<&Path>, compact: bool) -> Result<()> {
    let xml = load_input(input)?;
    let roots = load_tree(&xml)?;

    let json = if compact {
        serde_json::to_string(&roots)?
    } else {
        serde_json::to_string_pretty(&roots)?
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            println!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Execute the info command.
fn info_command(input: &str, language: Option<&str>) -> Result<()> {
    let xml = load_input(input)?;
    let roots = load_tree(&xml)?;
    let meta = extract_meta(&roots);

    let title = if meta.title.is_empty() {
        "(untitled)".to_string()
    } else {
        meta.title.clone()
    };
    println!("{}", style(&title).bold());

    if !meta.authors.is_empty() {
        println!("{}", author_line(&meta));
    }
    if let Some(declared) = &meta.language {
        println!("Language: {declared}");
    }
    if let Some(publication) = &meta.publication {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(journal) = &publication.journal {
            parts.push(journal);
        }
        if let Some(publisher) = &publication.publisher {
            parts.push(publisher);
        }
        if let Some(date) = &publication.date {
            parts.push(date);
        }
        println!("Published: {}", parts.join(", "));
    }
    if !meta.keywords.is_empty() {
        println!("Keywords: {}", meta.keywords.join(", "));
    }

    let requested = language.unwrap_or(DEFAULT_LANGUAGE);
    if let Some(selected) = meta.select_abstract(requested) {
        println!();
        println!("{} ({})", style("Abstract").bold(), selected.lang);
        println!("{}", textwrap::fill(&strip_tags(&selected.html), TEXT_WRAP_WIDTH));
    }

    Ok(())
}

/// Comma-separated author names.
fn author_line(meta: &DocumentMeta) -> String {
    meta.authors
        .iter()
        .map(|author| author.full_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Output file name derived from the document title.
fn default_output_path(meta: &DocumentMeta) -> PathBuf {
    let slug = meta.to_slug();
    if slug.is_empty() {
        PathBuf::from("document.html")
    } else {
        PathBuf::from(format!("{slug}.html"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from(["recto-viewer", "render", "article.xml"]);

        let Commands::Render {
            input,
            output,
            language,
        } = cli.command
        else {
            panic!("expected render command");
        };
        assert_eq!(input, "article.xml");
        assert!(output.is_none());
        assert!(language.is_none());
    }

    #[test]
    fn test_cli_parse_render_with_options() {
        let cli = Cli::parse_from([
            "recto-viewer",
            "render",
            "article.xml",
            "--output",
            "out.html",
            "--language",
            "fr",
        ]);

        let Commands::Render {
            input,
            output,
            language,
        } = cli.command
        else {
            panic!("expected render command");
        };
        assert_eq!(input, "article.xml");
        assert_eq!(output, Some(PathBuf::from("out.html")));
        assert_eq!(language, Some("fr".to_string()));
    }

    #[test]
    fn test_cli_parse_tree_compact() {
        let cli = Cli::parse_from(["recto-viewer", "tree", "article.xml", "--compact"]);

        let Commands::Tree {
            input,
            output,
            compact,
        } = cli.command
        else {
            panic!("expected tree command");
        };
        assert_eq!(input, "article.xml");
        assert!(output.is_none());
        assert!(compact);
    }

    #[test]
    fn test_cli_parse_info() {
        let cli = Cli::parse_from(["recto-viewer", "info", "article.xml", "-l", "fr"]);

        let Commands::Info { input, language } = cli.command else {
            panic!("expected info command");
        };
        assert_eq!(input, "article.xml");
        assert_eq!(language, Some("fr".to_string()));
    }

    #[test]
    fn test_default_output_path_from_title() {
        let meta = DocumentMeta {
            title: "Tree Rendering".to_string(),
            ..DocumentMeta::default()
        };
        assert_eq!(default_output_path(&meta), PathBuf::from("tree_rendering.html"));
    }

    #[test]
    fn test_default_output_path_untitled() {
        let meta = DocumentMeta::default();
        assert_eq!(default_output_path(&meta), PathBuf::from("document.html"));
    }
}
