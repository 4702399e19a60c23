use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenix::config::Config;
use maintenix::history::{ExportFormat, FilterCriteria, HistoryView, TypeSelection};
use maintenix::store::InMemoryStore;

#[derive(Parser)]
#[command(name = "maintenix")]
#[command(about = "Maintenix history and reporting CLI", long_about = None)]
struct Cli {
    /// JSON snapshot of records (overrides the configured path)
    #[arg(short = 'd', long, env = "MAINTENIX_SNAPSHOT")]
    data: Option<PathBuf>,

    /// Owner whose history to load
    #[arg(short, long, default_value = "admin")]
    owner: String,

    /// Display name stamped into export headers
    #[arg(short, long)]
    user_label: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List history records under the given filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show summary statistics for the filtered history
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the filtered history to a file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Export format (csv, json or txt)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file (defaults to the configured directory and prefix)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Record type: all, requests or reports
    #[arg(short = 'k', long, default_value = "all")]
    kind: TypeSelection,

    /// Status to match (exact, case-insensitive)
    #[arg(short, long)]
    status: Option<String>,

    /// Priority to match (exact, case-insensitive)
    #[arg(short, long)]
    priority: Option<String>,

    /// Earliest creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new().with_type(self.kind);
        if let Some(status) = self.status {
            criteria = criteria.with_status(status);
        }
        if let Some(priority) = self.priority {
            criteria = criteria.with_priority(priority);
        }
        criteria.with_date_range(self.from, self.to)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maintenix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("failed to load configuration: {e}, using defaults");
        Config {
            export: Default::default(),
            snapshot: Default::default(),
        }
    });

    tracing::info!("Starting Maintenix v{}", env!("CARGO_PKG_VERSION"));

    let store = load_store(cli.data.or(config.snapshot.path.clone())).await?;

    let mut view = HistoryView::new(store);
    view.set_user_label(cli.user_label.unwrap_or_else(|| cli.owner.clone()));
    view.load(&cli.owner).await;

    match cli.command {
        Commands::List { filters } => {
            view.set_filter(filters.into_criteria());
            print_list(&view);
        }
        Commands::Stats { filters } => {
            view.set_filter(filters.into_criteria());
            print_stats(&view);
        }
        Commands::Export {
            filters,
            format,
            output,
        } => {
            view.set_filter(filters.into_criteria());
            let format = format.unwrap_or(config.export.default_format);
            let path = output.unwrap_or_else(|| default_export_path(&config, format));
            view.export_to_file(&path, format)
                .await
                .with_context(|| format!("export to {} failed", path.display()))?;
            println!("Exported history to {}", path.display());
        }
    }

    Ok(())
}

async fn load_store(path: Option<PathBuf>) -> anyhow::Result<Arc<InMemoryStore>> {
    let Some(path) = path else {
        tracing::warn!("no snapshot path given, starting with an empty store");
        return Ok(Arc::new(InMemoryStore::new()));
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("snapshot {} is not valid JSON", path.display()))?;

    let store = InMemoryStore::from_snapshot(&snapshot);
    tracing::info!(records = store.len(), path = %path.display(), "loaded snapshot");
    Ok(Arc::new(store))
}

fn default_export_path(config: &Config, format: ExportFormat) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    config.export.output_dir.join(format!(
        "{}_{stamp}.{}",
        config.export.file_prefix,
        format.extension()
    ))
}

fn print_list(view: &HistoryView) {
    let snapshot = view.snapshot();
    println!("{}", view.criteria().describe());
    println!();

    println!("Equipment Requests ({})", snapshot.requests.len());
    for record in &snapshot.requests {
        println!(
            "  {} | {} | {} | {} | {}",
            record.created_label(),
            record.subject,
            record.detail,
            record.priority,
            record.status
        );
    }
    println!();

    println!("Maintenance Reports ({})", snapshot.reports.len());
    for record in &snapshot.reports {
        println!(
            "  {} | {} | {} | {} | {}",
            record.created_label(),
            record.subject,
            record.detail,
            record.priority,
            record.status
        );
    }
}

fn print_stats(view: &HistoryView) {
    let stats = view.stats();
    println!("{}", view.criteria().describe());
    println!();
    println!("Total records:   {}", stats.total);
    println!(
        "Inactive:        {} ({:.1}%)",
        stats.inactive_count, stats.inactive_percentage
    );
    println!();
    println!("Priority breakdown:");
    for slice in &stats.priority_breakdown {
        println!(
            "  {:<8} {} ({:.1}%)",
            slice.priority, slice.count, slice.percentage
        );
    }
    println!();
    println!("Monthly activity:");
    for month in &stats.monthly_activity {
        println!(
            "  {:<4} {} (completed {}, inactive {})",
            month.month, month.count, month.completed, month.inactive
        );
    }
}
