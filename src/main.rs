mod browser;
mod crawl;
mod extract;
mod local_api;
mod menu_tab;
mod menu_text;
mod navigator;
mod page;
mod preprocess;
mod query;
mod table;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing::warn;

use browser::BrowserArgs;
use table::EnrichedRow;

/// Fixed pause after each Local API call.
const API_DELAY: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "matzip_scraper", about = "Naver Place restaurant crawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich restaurant rows via the Naver Local search API
    Enrich {
        /// Input CSV (restaurant_name, sig_kor_nm, emd_kor_nm[, address])
        #[arg(short, long)]
        input: PathBuf,
        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
        /// Max rows to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Resolve restaurants to places via map search and crawl detail facets
    Places {
        /// Input CSV (restaurant_name, sig_kor_nm, emd_kor_nm)
        #[arg(short, long)]
        input: PathBuf,
        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
        /// Max rows to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Resolve place ids only, skip the detail facets
        #[arg(long)]
        id_only: bool,
        #[command(flatten)]
        browser: BrowserArgs,
    },
    /// Crawl menu items for already-resolved place ids
    Menus {
        /// Input CSV with a place_id column
        #[arg(short, long)]
        input: PathBuf,
        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
        /// Max place ids to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[command(flatten)]
        browser: BrowserArgs,
    },
    /// Normalize crawled menu rows into (place_id, menu, price)
    Clean {
        /// Input CSV (place_id, menu[, price])
        #[arg(short, long)]
        input: PathBuf,
        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Enrich { input, output, limit } => run_enrich(&input, &output, limit).await,
        Commands::Places {
            input,
            output,
            limit,
            id_only,
            browser,
        } => run_places(&input, &output, limit, id_only, &browser).await,
        Commands::Menus {
            input,
            output,
            limit,
            browser,
        } => run_menus(&input, &output, limit, &browser).await,
        Commands::Clean { input, output } => run_clean(&input, &output),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run_enrich(
    input: &PathBuf,
    output: &PathBuf,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let api = local_api::LocalApi::from_env()?;
    let mut records = table::read_input(input)?;
    if let Some(n) = limit {
        records.truncate(n);
    }
    if records.is_empty() {
        println!("No input rows.");
        return Ok(());
    }
    println!("Enriching {} rows via local search...", records.len());

    let pb = crawl::row_progress(records.len());
    let mut rows = Vec::with_capacity(records.len());
    let mut hits = 0usize;

    for record in &records {
        let cleaned = record
            .address
            .as_deref()
            .map(|a| query::clean_address(Some(a)))
            .filter(|a| !a.is_empty());
        let q = match &cleaned {
            Some(addr) => format!("{} {}", record.restaurant_name, addr),
            None => query::build_query(
                &record.restaurant_name,
                &record.sig_kor_nm,
                &record.emd_kor_nm,
            ),
        };

        let mut row = EnrichedRow {
            restaurant_name: record.restaurant_name.clone(),
            sig_kor_nm: record.sig_kor_nm.clone(),
            emd_kor_nm: record.emd_kor_nm.clone(),
            address: record.address.clone(),
            cleaned_address: cleaned,
            ..Default::default()
        };

        match api.lookup(&q).await {
            Ok(Some(item)) => {
                let (major, minor) = local_api::split_category(&item.category);
                row.title = Some(item.title);
                row.link = Some(item.link);
                row.category_major = Some(major);
                row.category_minor = Some(minor);
                row.description = Some(item.description);
                row.telephone = Some(item.telephone);
                row.lot_address = Some(item.address);
                row.road_address = Some(item.road_address);
                row.mapx = Some(item.mapx);
                row.mapy = Some(item.mapy);
                hits += 1;
            }
            Ok(None) => {}
            Err(e) => warn!("lookup failed for {:?}: {:#}", q, e),
        }

        rows.push(row);
        pb.inc(1);
        tokio::time::sleep(API_DELAY).await;
    }
    pb.finish_and_clear();

    table::write_rows(output, &rows)?;
    println!(
        "Done: {} rows, {} with a search hit -> {}",
        rows.len(),
        hits,
        output.display()
    );
    Ok(())
}

async fn run_places(
    input: &PathBuf,
    output: &PathBuf,
    limit: Option<usize>,
    id_only: bool,
    browser_args: &BrowserArgs,
) -> anyhow::Result<()> {
    let mut records = table::read_input(input)?;
    if let Some(n) = limit {
        records.truncate(n);
    }
    if records.is_empty() {
        println!("No input rows.");
        return Ok(());
    }
    println!("Crawling {} restaurants...", records.len());

    let driver = browser::connect(browser_args).await?;
    let (rows, stats) =
        crawl::crawl_places(&driver, &records, id_only, browser_args.page_timeout()).await;
    driver.quit().await?;

    table::write_rows(output, &rows)?;
    println!(
        "Done: {} rows ({} ok, {} errors) -> {}",
        stats.total,
        stats.ok,
        stats.errors,
        output.display()
    );
    Ok(())
}

async fn run_menus(
    input: &PathBuf,
    output: &PathBuf,
    limit: Option<usize>,
    browser_args: &BrowserArgs,
) -> anyhow::Result<()> {
    let mut place_ids = table::read_place_ids(input)?;
    if let Some(n) = limit {
        place_ids.truncate(n);
    }
    if place_ids.is_empty() {
        println!("No place ids in input.");
        return Ok(());
    }
    println!("Crawling menus for {} places...", place_ids.len());

    let driver = browser::connect(browser_args).await?;
    let (rows, stats) =
        crawl::crawl_menus(&driver, &place_ids, browser_args.page_timeout()).await;
    driver.quit().await?;

    table::write_rows(output, &rows)?;
    println!(
        "Done: {} places ({} with menus, {} errors), {} rows -> {}",
        stats.total,
        stats.ok,
        stats.errors,
        rows.len(),
        output.display()
    );
    Ok(())
}

fn run_clean(input: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    let rows = table::read_raw_menu_rows(input)?;
    println!("Cleaning {} rows...", rows.len());

    let (kept, summary) = preprocess::run(&rows);
    table::write_rows(output, &kept)?;

    let places: HashSet<&str> = kept.iter().map(|r| r.place_id.as_str()).collect();
    println!(
        "Kept {} menu rows across {} places, dropped {} (of {} input rows) -> {}",
        summary.kept,
        places.len(),
        summary.dropped,
        summary.input,
        output.display()
    );
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
