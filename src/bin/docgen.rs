//! CLI binary for vehicle-docgen.
//!
//! A thin shim over the library crate: reads a queue event from a file (or
//! stdin), maps CLI flags to `DocGenConfig`, runs the batch and prints the
//! queue's partial batch response.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use vehicle_docgen::pipeline::decode::parse_event;
use vehicle_docgen::{
    map_batch, process_batch, BatchProgressCallback, DocGenConfig, FileSystemStore, HttpRenderer,
    ProgressCallback,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Live progress bar plus one log line per message. Messages complete out of
/// order, so start times are tracked per index.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<usize, Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} documents  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Generating");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    fn elapsed_secs(&self, index: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut times| times.remove(&index))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_items: usize) {
        self.bar.set_length(total_items as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_items} queued requests…"))
        ));
    }

    fn on_item_start(&self, index: usize, _total: usize) {
        if let Ok(mut times) = self.start_times.lock() {
            times.insert(index, Instant::now());
        }
    }

    fn on_item_complete(&self, index: usize, total: usize, filename: &str) {
        let secs = self.elapsed_secs(index);
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            green("✓"),
            index + 1,
            total,
            filename,
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_item_error(&self, index: usize, total: usize, error: &str) {
        let secs = self.elapsed_secs(index);
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index + 1,
            total,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_items: usize, success_count: usize) {
        let failed = total_items.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} documents stored",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} documents stored  ({} failed)",
                if failed == total_items {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_items,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Map only: print the renderer payloads and metadata
  docgen --dry-run event.json

  # Render through a local renderer and store under ./documents/develop/
  BRANCH=develop docgen --renderer-url http://localhost:3001 event.json

  # Read the event from stdin, print the full batch report
  cat event.json | docgen --json -

EVENT FORMAT:
  { "Records": [ { "messageId": "...", "body": "<DocumentRequest JSON>" } ] }

SUPPORTED DOCUMENTS:
  VTG6_VTG7             Ministry plate
  VTG6_VTG7_TRL         Ministry plate (trailer)
  ADR_PASS_CERTIFICATE  ADR pass certificate
  TRL_INTO_SERVICE      Trailer into service letter

ENVIRONMENT VARIABLES:
  BRANCH                    Deployment environment; only "prod" removes the watermark
  SHOULD_EMAIL_CERTIFICATE  Copied into the should-email-certificate metadata tag
  DOCUMENT_LINK_URL         Base URL for the link-to-document metadata tag
  DOC_GEN_NAME              Renderer function name
  DOCGEN_RENDERER_URL       Renderer invocation API root
  DOCGEN_OUTPUT_DIR         Root directory for stored documents
"#;

/// Generate vehicle documents from a queue event.
#[derive(Parser, Debug)]
#[command(
    name = "docgen",
    version,
    about = "Generate vehicle plates, ADR certificates and trailer letters from queued requests",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Queue event JSON file, or `-` for stdin.
    input: String,

    /// Deployment environment.
    #[arg(long, env = "BRANCH", default_value = "local")]
    environment: String,

    /// Value of the should-email-certificate metadata tag.
    #[arg(long, env = "SHOULD_EMAIL_CERTIFICATE", default_value = "false")]
    should_email_certificate: String,

    /// Base URL for link-to-document.
    #[arg(long, env = "DOCUMENT_LINK_URL", default_value = "")]
    document_link_url: String,

    /// Renderer function name.
    #[arg(long, env = "DOC_GEN_NAME", default_value = "doc-gen")]
    renderer_target: String,

    /// Renderer invocation API root.
    #[arg(long, env = "DOCGEN_RENDERER_URL", default_value = "http://localhost:3001")]
    renderer_url: String,

    /// Root directory for stored documents.
    #[arg(short, long, env = "DOCGEN_OUTPUT_DIR", default_value = "documents")]
    output_dir: PathBuf,

    /// Map requests only; print the document models and exit.
    #[arg(long)]
    dry_run: bool,

    /// Number of messages processed concurrently.
    #[arg(short, long, env = "DOCGEN_CONCURRENCY", default_value_t = 10)]
    concurrency: usize,

    /// Retries per document on renderer failure.
    #[arg(long, env = "DOCGEN_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Per-render timeout in seconds.
    #[arg(long, env = "DOCGEN_RENDER_TIMEOUT", default_value_t = 60)]
    render_timeout: u64,

    /// Print the full batch report instead of the partial batch response.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "DOCGEN_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOCGEN_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.dry_run;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read event ───────────────────────────────────────────────────────
    let raw = read_input(&cli.input).await?;
    let event = parse_event(&raw).context("Failed to parse queue event")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Dry run ──────────────────────────────────────────────────────────
    if cli.dry_run {
        let mapped = map_batch(&event, &config).context("Mapping failed")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&mapped).context("Failed to serialise documents")?
        );
        return Ok(());
    }

    // ── Render and store ─────────────────────────────────────────────────
    let renderer = Arc::new(
        HttpRenderer::new(&cli.renderer_url, &config).context("Failed to create renderer")?,
    );
    let store = Arc::new(FileSystemStore::new(
        &cli.output_dir,
        config.environment.clone(),
    ));

    let output = process_batch(&event, renderer, store, &config)
        .await
        .context("Batch failed")?;

    let json = if cli.json {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string_pretty(&output.batch_item_failures())
    }
    .context("Failed to serialise output")?;
    println!("{json}");

    if !cli.quiet && !show_progress {
        eprintln!(
            "Stored {}/{} documents ({} bytes) in {}ms",
            output.stats.succeeded,
            output.stats.total_items,
            output.stats.total_bytes,
            output.stats.total_duration_ms
        );
    }

    Ok(())
}

/// Read the event from a file or stdin.
async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read event from {input:?}"))
    }
}

/// Map CLI args to `DocGenConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<DocGenConfig> {
    let mut builder = DocGenConfig::builder()
        .environment(cli.environment.clone())
        .should_email_certificate(cli.should_email_certificate.clone())
        .document_link_url(cli.document_link_url.clone())
        .renderer_target(cli.renderer_target.clone())
        .concurrency(cli.concurrency)
        .max_retries(cli.max_retries)
        .render_timeout_secs(cli.render_timeout);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
