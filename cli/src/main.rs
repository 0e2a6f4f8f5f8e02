//! xarticle CLI - X long-form article exporter

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use xarticle::export::{today_utc, ExportSink};
use xarticle::fetch::JITTER_MS;
use xarticle::render::{self, JsonFormat, RenderOptions};
use xarticle::settings::{self, Settings};
use xarticle::{
    ExportPayload, ExportReport, Exporter, FolderLayout, FsExporter, HttpImageSource,
    ImageFetcher, ImageRef, ImageSink, ParseOptions, Throttle,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_OUTPUT: &str = "output";

#[derive(Parser)]
#[command(name = "xarticle")]
#[command(version)]
#[command(about = "Export X long-form articles to Markdown with downloaded images", long_about = None)]
struct Cli {
    /// Saved article HTML or CDP DOM snapshot (JSON)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    export: ExportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Default)]
struct ExportArgs {
    /// Base delay between image downloads in milliseconds (default 1200)
    #[arg(long, value_name = "MS", allow_hyphen_values = true)]
    image_delay_ms: Option<String>,

    /// Address of the article page, used when the page has no permalink
    #[arg(long, value_name = "URL")]
    page_url: Option<String>,

    /// Nest the export in a <YYYY-MM-DD>-<title> folder
    #[arg(long)]
    dated: bool,

    /// Settings file
    #[arg(long, value_name = "FILE", env = settings::CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an article and download its images
    Convert {
        /// Saved article HTML or CDP DOM snapshot (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Print the export payload JSON without downloading anything
    Payload {
        /// Saved article HTML or CDP DOM snapshot (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Address of the article page
        #[arg(long, value_name = "URL")]
        page_url: Option<String>,
    },

    /// Export a payload JSON file into a dated folder
    Download {
        /// Export payload JSON
        #[arg(value_name = "PAYLOAD")]
        payload: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Base delay between image downloads in milliseconds
        #[arg(long, value_name = "MS", allow_hyphen_values = true)]
        image_delay_ms: Option<String>,

        /// Settings file
        #[arg(long, value_name = "FILE", env = settings::CONFIG_ENV)]
        config: Option<PathBuf>,
    },

    /// Show or change the persisted image delay
    Config {
        /// New base delay in milliseconds
        #[arg(long, value_name = "MS", allow_hyphen_values = true)]
        image_delay_ms: Option<String>,

        /// Settings file
        #[arg(long, value_name = "FILE", env = settings::CONFIG_ENV)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            export,
        }) => cmd_convert(&input, output.as_deref(), &export),
        Some(Commands::Payload {
            input,
            output,
            compact,
            page_url,
        }) => cmd_payload(&input, output.as_deref(), compact, page_url),
        Some(Commands::Download {
            payload,
            output,
            image_delay_ms,
            config,
        }) => cmd_download(&payload, output.as_deref(), image_delay_ms, config),
        Some(Commands::Config {
            image_delay_ms,
            config,
        }) => cmd_config(image_delay_ms.as_deref(), config),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.export)
            } else {
                println!("{}", "Usage: xarticle <INPUT> [OUTPUT] [--image-delay-ms <MS>]".yellow());
                println!("       xarticle --help for more information");
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>, args: &ExportArgs) -> CliResult<()> {
    let mut options = ParseOptions::new();
    if let Some(url) = &args.page_url {
        options = options.with_page_url(url.as_str());
    }

    let article = xarticle::parse_file_with_options(input, options)?;
    let payload = article.to_payload(&RenderOptions::default());
    log::info!(
        "{} blocks, {} words, {} images",
        article.stats.block_count(),
        article.stats.word_count,
        article.image_count()
    );

    let layout = if args.dated {
        FolderLayout::Dated
    } else {
        FolderLayout::Flat
    };
    let out_dir = absolute(output.unwrap_or(Path::new(DEFAULT_OUTPUT)))?;
    let exporter = FsExporter::for_payload(&out_dir, &payload, layout, today_utc());

    let delay_ms = effective_delay(args.image_delay_ms.as_deref(), args.config.clone());
    let report = export(&payload, exporter.clone(), delay_ms)?;

    println!("Markdown written to: {}", exporter.markdown_path().display());
    println!("Images downloaded: {}", report.image_count);
    println!("Image directory: {}", exporter.image_dir().display());
    print_delay(report.delay_ms);

    Ok(())
}

fn cmd_payload(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    page_url: Option<String>,
) -> CliResult<()> {
    let mut options = ParseOptions::new();
    if let Some(url) = page_url {
        options = options.with_page_url(url);
    }
    let article = xarticle::parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&article.to_payload(&RenderOptions::default()), format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_download(
    payload_path: &Path,
    output: Option<&Path>,
    image_delay_ms: Option<String>,
    config: Option<PathBuf>,
) -> CliResult<()> {
    let payload = ExportPayload::from_json(&fs::read_to_string(payload_path)?)?;

    let out_dir = absolute(output.unwrap_or(Path::new(DEFAULT_OUTPUT)))?;
    let exporter = FsExporter::for_payload(&out_dir, &payload, FolderLayout::Dated, today_utc());

    let delay_ms = effective_delay(image_delay_ms.as_deref(), config);
    let report = export(&payload, exporter.clone(), delay_ms)?;

    println!("{} {}", "Exported to".green().bold(), exporter.root().display());
    println!("Images downloaded: {}", report.image_count);
    print_delay(report.delay_ms);

    Ok(())
}

fn cmd_config(image_delay_ms: Option<&str>, config: Option<PathBuf>) -> CliResult<()> {
    let path = config
        .or_else(Settings::default_path)
        .ok_or("cannot locate a settings file; pass --config")?;
    let mut current = Settings::load(&path)?;

    if let Some(raw) = image_delay_ms {
        current.image_delay_ms = settings::parse_delay(raw)
            .ok_or_else(|| format!("invalid image delay: {}", raw))?;
        current.save(&path)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    println!("{}: {}ms", "Image delay".bold(), current.image_delay_ms);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "xarticle".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("X long-form article exporter");
    println!();
    println!("License: MIT");
}

/// Flag, then persisted setting, then the built-in default.
fn effective_delay(flag: Option<&str>, config: Option<PathBuf>) -> u64 {
    let settings = config
        .or_else(Settings::default_path)
        .and_then(|path| match Settings::load(&path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                None
            }
        });
    settings::resolve_delay(flag, settings.as_ref())
}

fn print_delay(delay_ms: u64) {
    println!(
        "Image delay: {}ms (+ up to {}ms jitter)",
        delay_ms,
        JITTER_MS - 1
    );
}

fn absolute(path: &Path) -> CliResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Run the export on a single-threaded runtime.
fn export(payload: &ExportPayload, exporter: FsExporter, delay_ms: u64) -> CliResult<ExportReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let fetcher = ImageFetcher::new(HttpImageSource::new()?, Throttle::from_millis(delay_ms));
    let mut sink = ProgressSink::new(exporter, payload.images.len());

    let report = runtime.block_on(Exporter::new(fetcher).run(payload, &mut sink));
    sink.finish(report.is_ok());
    Ok(report?)
}

/// Export sink that advances a progress bar per stored image.
struct ProgressSink<K> {
    inner: K,
    bar: ProgressBar,
}

impl<K> ProgressSink<K> {
    fn new(inner: K, total: usize) -> Self {
        let bar = if total == 0 {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message("Downloading images...");
        Self { inner, bar }
    }

    fn finish(&self, ok: bool) {
        if ok {
            self.bar.finish_and_clear();
        } else {
            self.bar.abandon();
        }
    }
}

#[async_trait]
impl<K: ImageSink> ImageSink for ProgressSink<K> {
    async fn store(&mut self, image: &ImageRef, bytes: Vec<u8>) -> xarticle::Result<()> {
        self.bar.set_message(image.filename.clone());
        self.inner.store(image, bytes).await?;
        self.bar.inc(1);
        Ok(())
    }
}

#[async_trait]
impl<K: ExportSink> ExportSink for ProgressSink<K> {
    async fn write_markdown(&mut self, markdown: &str) -> xarticle::Result<()> {
        self.inner.write_markdown(markdown).await
    }

    async fn prepare_images(&mut self) -> xarticle::Result<()> {
        self.inner.prepare_images().await
    }
}
