//! cloudgen CLI entrypoint
//! Parses command-line arguments and drives the scaffold transport.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use cloudgen::catalog::MetadataCatalog;
use cloudgen::config::ScaffoldConfig;
use cloudgen::services::ServiceRegistry;
use cloudgen::transport::ScaffoldTransport;

#[derive(Parser)]
#[command(name = "cloudgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a server project and write it as a zip archive
    Scaffold {
        /// Property file describing the project, or `-` to read stdin
        #[arg(long, short)]
        properties: PathBuf,
        /// Directory the archive is written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Scaffolder config file (.yaml, .yml or .toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// Keep the generated project directory after packaging
        #[arg(long)]
        keep_output: bool,
    },
    /// Print the configuration catalog
    Metadata {
        #[arg(long, value_enum, default_value_t = CatalogFormat::Yaml)]
        format: CatalogFormat,
    },
    /// Write a starter property file
    Init {
        /// Destination file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List the server types that can be scaffolded
    Servers,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

struct ScaffoldArgs<'a> {
    properties: &'a Path,
    output_dir: &'a Option<PathBuf>,
    config: &'a Option<PathBuf>,
    template_dir: &'a Option<PathBuf>,
    keep_output: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Scaffold {
            properties,
            output_dir,
            config,
            template_dir,
            keep_output,
        } => {
            scaffold(ScaffoldArgs {
                properties,
                output_dir,
                config,
                template_dir,
                keep_output: *keep_output,
            })
            .await?
        }
        Commands::Metadata { format } => print_metadata(*format)?,
        Commands::Init { output, force } => write_starter(output.as_deref(), *force).await?,
        Commands::Servers => list_servers()?,
    }
    Ok(())
}

async fn scaffold(args: ScaffoldArgs<'_>) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => ScaffoldConfig::from_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScaffoldConfig::default(),
    }
    .with_env_overrides();
    if let Some(dir) = args.template_dir {
        config.template_dir = Some(dir.clone());
    }
    config.keep_output |= args.keep_output;

    let text = read_properties(args.properties).await?;
    let transport = ScaffoldTransport::new(config).context("Failed to initialize scaffolder")?;
    let properties = ScaffoldTransport::parse_properties(&text)
        .with_context(|| format!("Invalid property file {}", args.properties.display()))?;

    let archive = match transport.generate(&properties).await {
        Ok(archive) => archive,
        Err(e) => {
            let kind = e.kind();
            error!(kind = %kind, error = %e, "Scaffold failed");
            return Err(anyhow::Error::new(e).context(format!("Scaffold failed ({kind})")));
        }
    };

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(&archive.file_name);
    tokio::fs::write(&path, &archive.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    for failure in &archive.failures {
        warn!(generator = %failure.generator, error = %failure.error, "Generator failed");
    }
    info!(path = %path.display(), files = archive.files.len(), "Wrote archive");
    println!("{}", path.display());
    Ok(())
}

async fn read_properties(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read properties from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read property file {}", path.display()))
}

fn print_metadata(format: CatalogFormat) -> anyhow::Result<()> {
    let catalog = MetadataCatalog::builtin()?;
    let rendered = match format {
        CatalogFormat::Yaml => catalog.to_yaml()?,
        CatalogFormat::Json => catalog.to_json()?,
    };
    println!("{rendered}");
    Ok(())
}

async fn write_starter(output: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let content = MetadataCatalog::builtin()?.default_properties();
    let Some(path) = output else {
        print!("{content}");
        return Ok(());
    };

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote starter properties");
    Ok(())
}

fn list_servers() -> anyhow::Result<()> {
    let registry = ServiceRegistry::with_defaults()?;
    for kind in registry.kinds() {
        let aliases = kind.aliases();
        if aliases.is_empty() {
            println!("{:<16} {}", kind.as_str(), kind.display_name());
        } else {
            println!(
                "{:<16} {} (also: {})",
                kind.as_str(),
                kind.display_name(),
                aliases.join(", ")
            );
        }
    }
    Ok(())
}
