use anyhow::{Context as AnyhowContext, Result};
use beerlog_catalog::{
    BrandRepository, SqliteCatalog, SqliteDataSource, StoreRepository, StoreView,
};
use beerlog_map::{render_map, BrandCatalogue, MapAssembler, MapSummary};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod page;

pub use config::{AppConfig, DatabaseConfig, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE};
pub use page::render_page;

#[derive(Parser)]
#[command(name = "beerlog")]
#[command(about = "Render the beer brand store map", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./beerlog.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the store map page (or bare map fragment)
    Render(RenderArgs),

    /// List brands in catalogue order
    Brands(ListArgs),

    /// List stores with their resolved brand
    Stores(ListArgs),
}

#[derive(Args)]
struct DbArgs {
    /// SQLite database with `stores` and `brands` tables
    #[arg(long, env = "BEERLOG_DB")]
    db: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    db: DbArgs,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Emit only the embeddable map fragment, without page chrome
    #[arg(long)]
    fragment: bool,

    /// Page heading
    #[arg(long, default_value = "Beerlog")]
    title: String,

    /// Print a JSON summary of the map to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    db: DbArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RenderReport {
    output: Option<PathBuf>,
    fingerprint: String,
    #[serde(flatten)]
    summary: MapSummary,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON
    let json_output = match &cli.command {
        Commands::Render(args) => args.json,
        Commands::Brands(args) | Commands::Stores(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render(args) => run_render(args, &config)?,
        Commands::Brands(args) => run_brands(args, &config)?,
        Commands::Stores(args) => run_stores(args, &config)?,
    }

    Ok(())
}

fn open_catalog(db: &DbArgs, config: &AppConfig) -> SqliteCatalog {
    let path = config.database.resolve_path(db.db.as_deref());
    log::debug!("Using catalog database {}", path.display());
    SqliteCatalog::new(SqliteDataSource::with_config(
        path,
        config.database.sqlite(),
    ))
}

fn run_render(args: RenderArgs, config: &AppConfig) -> Result<()> {
    let catalog = open_catalog(&args.db, config);
    let assembler = MapAssembler::new(config.map.clone()).context("Invalid map config")?;

    let doc = render_map(&catalog, &assembler).context("Failed to load stores and brands")?;

    let html = if args.fragment {
        doc.to_html()?
    } else {
        let brands = catalog.list_brands().context("Failed to load brands")?;
        let catalogue = BrandCatalogue::from_brands(&brands, config.map.catalogue_columns);
        render_page(&args.title, &catalogue, &doc)?
    };

    match &args.out {
        Some(path) => {
            write_output(path, &html)?;
            log::info!("Wrote store map to {}", path.display());
        }
        None if !args.json => print!("{html}"),
        None => {}
    }

    if args.json {
        let report = RenderReport {
            output: args.out.clone(),
            fingerprint: doc.fingerprint()?,
            summary: doc.summary(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn run_brands(args: ListArgs, config: &AppConfig) -> Result<()> {
    let brands = open_catalog(&args.db, config)
        .list_brands()
        .context("Failed to load brands")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&brands)?);
        return Ok(());
    }

    for brand in &brands {
        let image = if brand.image.is_empty() { "-" } else { "image" };
        println!("{}\t{}\t{}", brand.id, brand.name, image);
    }
    Ok(())
}

fn run_stores(args: ListArgs, config: &AppConfig) -> Result<()> {
    let stores = open_catalog(&args.db, config)
        .list_stores_with_brand()
        .context("Failed to load stores")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stores)?);
        return Ok(());
    }

    for store in &stores {
        println!(
            "{}\t{}\t{}\t{}",
            store.store_id(),
            store.store_name(),
            store.brand_name(),
            format_position(store)
        );
    }
    Ok(())
}

fn format_position(store: &StoreView) -> String {
    match (store.lat(), store.lng()) {
        (Some(lat), Some(lng)) => format!("{lat},{lng}"),
        _ => "-".to_string(),
    }
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Cannot write {}", path.display()))
}
