use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite", version)]
#[command(about = "Convert Markdown content into a static HTML site")]
struct Cli {
    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and render every Markdown page through the template
    Build(BuildArgs),
    /// Convert a single Markdown file to an HTML fragment
    Convert(ConvertArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Site configuration file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Directory of static assets copied verbatim
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Directory of Markdown content
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// HTML template with {{ Title }} and {{ Content }} placeholders
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep existing files in the output directory
    #[arg(long)]
    no_clean: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input Markdown file
    input: PathBuf,

    /// Output HTML file (defaults to input name with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    fn into_config(self) -> Config {
        let mut config = Config::load(&self.config);
        let paths = &mut config.paths;
        if let Some(dir) = self.static_dir {
            paths.static_dir = dir;
        }
        if let Some(dir) = self.content_dir {
            paths.content_dir = dir;
        }
        if let Some(template) = self.template {
            paths.template = template;
        }
        if let Some(dir) = self.output_dir {
            paths.output_dir = dir;
        }
        if self.no_clean {
            config.build.clean = false;
        }
        config
    }
}

fn build(args: BuildArgs) -> Result<(), Box<dyn Error>> {
    let config = args.into_config();
    let stats = mdsite::site::build_site(&config)?;
    println!(
        "Built {} page(s) and copied {} asset(s) into {}",
        stats.pages_generated,
        stats.assets_copied,
        config.paths.output_dir.display()
    );
    Ok(())
}

fn convert(args: ConvertArgs) -> Result<(), Box<dyn Error>> {
    let markdown = fs::read_to_string(&args.input)
        .map_err(|e| format!("reading {}: {e}", args.input.display()))?;

    let html = mdsite::markdown_to_html(&markdown)?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("html"));
    fs::write(&output, html).map_err(|e| format!("writing {}: {e}", output.display()))?;

    println!("Created {}", output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Build(args) => build(args),
        Command::Convert(args) => convert(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
