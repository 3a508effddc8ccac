use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dotenvy::dotenv;

use finance_tracker_backend::cli_utils::formatting::{
    format_amount, format_count, format_decimal, format_progress, format_signed_amount,
    print_header, print_section,
};
use finance_tracker_backend::cli_utils::{
    confirm, format_record, format_table, print_error, print_info, print_success, print_warning,
};
use finance_tracker_backend::finance_store::audit::audit_categories;
use finance_tracker_backend::finance_store::models::{FinanceSnapshot, SnapshotPayload};
use finance_tracker_backend::utils::app_config::{AppConfig, DatabaseArgs};

#[derive(Parser, Debug)]
#[command(name = "Finance CLI")]
#[command(about = "Inspect and maintain the finance tracker database", long_about = None)]
struct Args {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored profile, transactions, categories, goals and achievements
    Show {
        /// Only list the most recent N transactions
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Write the stored snapshot to a JSON file
    Export {
        /// Target file (default: finance-snapshot-<timestamp>.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Replace all stored data with the snapshot in a JSON file
    Import {
        /// Snapshot file in the same shape POST /api/data accepts
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete every record and zero the profile
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Compare stored category totals with the stored transactions
    Audit {
        /// Only count transactions of this type (e.g. expense)
        #[arg(long)]
        kind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let app_config = match AppConfig::connect(&args.database).await {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("Failed to open {}: {}", args.database.database_url, e));
            return Err(e);
        }
    };

    match args.command {
        Command::Show { limit } => show(&app_config, limit).await,
        Command::Export { output } => export(&app_config, output).await,
        Command::Import { path, yes } => import(&app_config, path, yes).await,
        Command::Reset { yes } => reset(&app_config, yes).await,
        Command::Audit { kind } => audit(&app_config, kind).await,
    }
}

async fn show(app_config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let snapshot = app_config.store.fetch_all(app_config.tenant).await?;

    print_header("Finance Snapshot");
    format_record(vec![
        ("Balance", format_amount(snapshot.balance)),
        ("Initial balance", format_amount(snapshot.initial_balance)),
        ("Monthly budget", format_amount(snapshot.monthly_budget)),
        ("Savings goal", format!("{}%", snapshot.savings_goal)),
    ]);

    print_section(&format_count("Transactions", snapshot.transactions.len()));
    let shown = limit.unwrap_or(snapshot.transactions.len());
    format_table(
        vec!["ID", "Date", "Type", "Amount", "Category", "Description"],
        snapshot
            .transactions
            .iter()
            .take(shown)
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.clone(),
                    t.kind.clone(),
                    format_signed_amount(&t.kind, t.amount),
                    format!("{} {}", t.emoji, t.category),
                    t.description.clone(),
                ]
            })
            .collect(),
    );

    print_section(&format_count("Categories", snapshot.categories.len()));
    format_table(
        vec!["Name", "Total", "Count"],
        snapshot
            .categories
            .iter()
            .map(|(name, totals)| {
                vec![
                    format!("{} {}", totals.emoji, name),
                    format_amount(totals.total),
                    totals.count.to_string(),
                ]
            })
            .collect(),
    );

    print_section(&format_count("Goals", snapshot.goals.len()));
    format_table(
        vec!["ID", "Name", "Saved", "Target", "Progress", "Deadline"],
        snapshot
            .goals
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    format_amount(g.current_amount),
                    format_amount(g.target_amount),
                    format_progress(g.current_amount, g.target_amount),
                    g.deadline.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect(),
    );

    print_section(&format_count("Achievements", snapshot.achievements.len()));
    format_table(
        vec!["ID", "Unlocked at"],
        snapshot
            .achievements
            .iter()
            .map(|a| vec![a.id.clone(), a.unlocked_at.clone().unwrap_or_else(|| "-".to_string())])
            .collect(),
    );

    Ok(())
}

async fn export(app_config: &AppConfig, output: Option<PathBuf>) -> Result<()> {
    let snapshot = app_config.store.fetch_all(app_config.tenant).await?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "finance-snapshot-{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    });

    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    print_success(&format!(
        "Exported {} transactions to {}",
        snapshot.transactions.len(),
        path.display()
    ));
    Ok(())
}

async fn import(app_config: &AppConfig, path: PathBuf, yes: bool) -> Result<()> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let payload: SnapshotPayload = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid snapshot", path.display()))?;
    let snapshot = FinanceSnapshot::from(payload);

    print_info(&format!(
        "{} holds {} transactions, {} categories, {} goals, {} achievements",
        path.display(),
        snapshot.transactions.len(),
        snapshot.categories.len(),
        snapshot.goals.len(),
        snapshot.achievements.len()
    ));

    if !yes && !confirm("Replace ALL stored data with this snapshot?")? {
        print_warning("Import cancelled");
        return Ok(());
    }

    let summary = app_config
        .store
        .replace_all(app_config.tenant, snapshot)
        .await?;

    print_success(&format!(
        "Imported {} transactions, {} categories, {} goals, {} achievements",
        summary.transactions, summary.categories, summary.goals, summary.achievements
    ));
    Ok(())
}

async fn reset(app_config: &AppConfig, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete every transaction, category, goal and achievement?")? {
        print_warning("Reset cancelled");
        return Ok(());
    }

    app_config.store.reset_all(app_config.tenant).await?;

    print_success("All data reset successfully");
    Ok(())
}

async fn audit(app_config: &AppConfig, kind: Option<String>) -> Result<()> {
    let snapshot = app_config.store.fetch_all(app_config.tenant).await?;
    let drift = audit_categories(&snapshot, kind.as_deref());

    print_header("Category Audit");
    if drift.is_empty() {
        print_success(&format!(
            "All {} categories match the stored transactions",
            snapshot.categories.len()
        ));
        return Ok(());
    }

    format_table(
        vec!["Category", "Stored total", "Computed total", "Stored count", "Computed count", "Difference"],
        drift
            .iter()
            .map(|d| {
                vec![
                    d.name.clone(),
                    d.stored_total
                        .as_ref()
                        .map(format_decimal)
                        .unwrap_or_else(|| "missing".to_string()),
                    format_decimal(&d.computed_total),
                    d.stored_count
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "missing".to_string()),
                    d.computed_count.to_string(),
                    format_decimal(&d.total_difference()),
                ]
            })
            .collect(),
    );

    println!();
    print_warning(&format!(
        "{} categories drift from their transactions; stored values were left unchanged",
        drift.len().to_string().bold()
    ));
    Ok(())
}
