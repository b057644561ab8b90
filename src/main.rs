//! PDF cover-and-replace CLI application.
//!
//! This binary drives the overstamp library: it loads the input PDFs and a
//! rectangle spec file into a session, runs one composition job, and writes
//! the merged, stamped output. An `extract` subcommand dumps a PDF's text
//! for verifying stamp output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use overstamp::{
    ComposeService, CompositionJob, PixelRect, RectStyle, SessionState, DEFAULT_OUTPUT_NAME,
    DEFAULT_PREVIEW_SCALE,
};

/// PDF cover-and-replace tool
///
/// Merge PDF documents and stamp replacement text over redaction
/// rectangles. By default, performs composition. Use the 'extract'
/// subcommand to dump document text.
#[derive(Parser)]
#[command(name = "overstamp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF files, merged in the order given
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// JSON file describing the stamp rectangles
    #[arg(short, long, value_name = "FILE")]
    rects: Option<PathBuf>,

    /// Fallback replacement text for rectangles without their own text
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    text: String,

    /// Preview scale the rectangle coordinates were captured at
    #[arg(long, value_name = "FACTOR", default_value_t = DEFAULT_PREVIEW_SCALE)]
    scale: f32,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF (for debugging and verification)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// One rectangle in the spec file. Geometry is required; style fields fall
/// back to the interactive control defaults and text to empty (meaning
/// "use the job fallback").
#[derive(Debug, Deserialize)]
struct RectEntry {
    #[serde(flatten)]
    bounds: PixelRect,
    #[serde(flatten)]
    style: RectStyle,
    #[serde(default)]
    text: String,
}

/// Composition command handler.
struct StampHandler {
    service: ComposeService,
    verbose: bool,
}

impl StampHandler {
    fn new(verbose: bool) -> Self {
        Self {
            service: ComposeService::new(),
            verbose,
        }
    }

    /// Executes one composition run.
    fn stamp(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        entries: Vec<RectEntry>,
        fallback_text: &str,
        scale: f32,
    ) -> Result<()> {
        if inputs.is_empty() {
            anyhow::bail!("No input files specified. Pass one or more PDFs to merge.");
        }
        for input in inputs {
            if !input.exists() {
                anyhow::bail!("Input file does not exist: {}", input.display());
            }
        }

        let session = build_session(inputs, entries)?;

        if self.verbose {
            for doc in session.documents() {
                println!("Input:  {}", doc.display_name);
            }
            println!("Output: {}", output.display());
            println!("Rectangles: {} stamp rectangle(s)", session.rects().len());
        }

        let job = CompositionJob::from_session(&session, fallback_text, scale);
        let composed = self
            .service
            .compose(&job)
            .with_context(|| "Composition failed")?;

        std::fs::write(output, &composed.bytes)
            .with_context(|| format!("Failed to write to {}", output.display()))?;

        if self.verbose {
            println!("\nComposition Summary:");
            println!("  Documents merged: {}", composed.stats.documents_merged);
            println!("  Pages processed:  {}", composed.stats.pages_processed);
            println!("  Stamps applied:   {}", composed.stats.stamps_applied);
        }

        println!(
            "✓ Composed {} page(s) → {}",
            composed.stats.pages_processed,
            output.display()
        );

        Ok(())
    }

    /// Extracts text from a PDF.
    fn extract(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let text = self
            .service
            .extract_text(input)
            .with_context(|| "Text extraction failed")?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} characters → {}",
                text.len(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }

        Ok(())
    }
}

/// Loads rectangle entries from a JSON spec file.
fn load_rect_entries(path: &Path) -> Result<Vec<RectEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rectangle spec {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid rectangle spec in {}", path.display()))
}

/// Builds the session the job will borrow: documents in argument order,
/// rectangles in spec-file order.
fn build_session(inputs: &[PathBuf], entries: Vec<RectEntry>) -> Result<SessionState> {
    let mut session = SessionState::new();

    for input in inputs {
        let bytes =
            std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        session.add_document(name, bytes);
    }

    for entry in entries {
        let id = session.add_rectangle(entry.bounds, entry.style);
        if !entry.text.is_empty() {
            session.set_rectangle_text(id, entry.text);
        }
    }

    Ok(session)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let handler = StampHandler::new(cli.verbose);

    match &cli.command {
        Some(Commands::Extract { input, output }) => {
            handler.extract(input, output.as_deref())?;
        }
        None => {
            let entries = match &cli.rects {
                Some(path) => load_rect_entries(path)?,
                None => Vec::new(),
            };
            handler.stamp(&cli.inputs, &cli.output, entries, &cli.text, cli.scale)?;
        }
    }

    Ok(())
}
