//! mspdash - MSP Leadership Dashboard
//!
//! A terminal dashboard over a precomputed snapshot of managed clients,
//! licensed users, and devices. Loads the dataset once and renders counters,
//! sortable/filterable tables, per-client drill-downs, and bar charts.

// Module declarations
mod config;
mod dataset;
mod display;
mod error;
mod filter;
mod helpers;
mod modal;
mod models;
mod sort;
mod summary;
mod tabs;
mod terminal;
mod tui;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use config::Config;
use dataset::{DATASET_ENV, DatasetLoader};
use display::{
    display_client_detail, display_count_label, display_json, display_rows, display_summary,
    display_validation_issues, print_error, print_info, print_warning,
};
use error::DashboardError;
use filter::{
    DEVICE_HEADERS, USER_HEADERS, count_label, device_rows, filter_devices, filter_users,
    user_rows,
};
use modal::DetailModal;
use sort::{SortState, SortableRow, TableRow, sort_rows};
use std::path::PathBuf;
use summary::{CLIENT_HEADERS, ClientRow, Totals, alphabetical_clients, ranked_clients};
use tabs::Tab;
use terminal::DisplayMode;
use tui::TuiApp;

#[derive(Parser)]
#[command(name = "mspdash")]
#[command(about = "MSP leadership dashboard - clients, licensed users, and devices")]
#[command(version)]
#[command(
    long_about = "mspdash renders a precomputed MSP dataset (clients, licensed users, devices) as a terminal dashboard.

The dataset is a JSON file, or the `window.MSP_DASHBOARD_DATA = {...};` script written by the build step.

EXAMPLES:
  mspdash                               # Launch the dashboard
  mspdash --data dashboard-data.js tui  # Use a specific dataset
  mspdash summary                       # Counters and clients ranked by users
  mspdash users --search e5 --client Alliant
  mspdash devices --sort 2 --desc       # Devices by OS, descending
  mspdash client \"Pure Cycle\"           # Drill into one client
  mspdash --json clients                # Alphabetical client table as JSON
  mspdash check                         # Validate dataset consistency"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to the dataset file",
        long_help = "Path to the dataset file (JSON or script form)\nFalls back to $MSPDASH_DATA, then dataset_path in the config file,\nthen ./dashboard-data.json or ./dashboard-data.js"
    )]
    data: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Output in JSON format",
        long_help = "Print report commands as JSON instead of tables\nExample: mspdash --json summary | jq '.ranked[0]'"
    )]
    json: bool,

    #[arg(
        long,
        help = "Force compact display mode",
        long_help = "Hide wide columns (licenses) in report tables\nAutomatic below 100 terminal columns"
    )]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Launch the interactive dashboard (default)")]
    #[command(
        long_about = "Launch the full-screen dashboard\n\nTABS: Overview, Users, Devices, Clients, Charts\n\nKEYBOARD SHORTCUTS:\n  q: Quit  Tab/1-5: Switch tab  j/k: Navigate  /: Search\n  c: Cycle client filter  F1-F4: Sort column  Enter: Client details"
    )]
    Tui {
        #[arg(
            long,
            value_name = "TAB",
            help = "Tab to open on (overview, users, devices, clients, charts)"
        )]
        tab: Option<String>,
    },
    #[command(about = "Show global counters and clients ranked by users")]
    Summary,
    #[command(about = "List all clients alphabetically")]
    Clients {
        #[arg(long, value_name = "COL", help = "Sort by zero-based column index")]
        sort: Option<usize>,
        #[arg(long, help = "Sort descending (applies the column sort twice)")]
        desc: bool,
    },
    #[command(about = "List licensed users")]
    Users {
        #[arg(short, long, default_value = "", help = "Case-insensitive text filter")]
        search: String,
        #[arg(short, long, default_value = "", help = "Exact client name")]
        client: String,
        #[arg(long, value_name = "COL", help = "Sort by zero-based column index")]
        sort: Option<usize>,
        #[arg(long, help = "Sort descending (applies the column sort twice)")]
        desc: bool,
    },
    #[command(about = "List devices")]
    Devices {
        #[arg(short, long, default_value = "", help = "Case-insensitive text filter")]
        search: String,
        #[arg(long, value_name = "COL", help = "Sort by zero-based column index")]
        sort: Option<usize>,
        #[arg(long, help = "Sort descending (applies the column sort twice)")]
        desc: bool,
    },
    #[command(about = "Show users and devices for one client")]
    Client {
        #[arg(help = "Client name")]
        name: String,
    },
    #[command(about = "Validate dataset consistency")]
    Check,
    #[command(about = "Show effective configuration")]
    Config {
        #[arg(long, help = "Show current configuration")]
        show: bool,
    },
}

/// Application entry point
fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<DashboardError>() {
            Some(err) => print_error(&err.detailed_message()),
            None => print_error(&format!("{}", e)),
        }
        std::process::exit(1);
    }
}

/// Main application logic
fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            print_warning(&format!("Ignoring config file: {}", e));
            Config::default()
        }
    };

    if let Some(Commands::Config { show }) = &cli.command {
        return handle_config_command(&config, *show);
    }

    // Missing or unreadable dataset is the only fatal condition
    let dataset = DatasetLoader::load_resolved(cli.data.as_deref(), &config)?;

    let issues = dataset.validate();
    if !issues.is_empty() && !matches!(cli.command, Some(Commands::Check)) {
        print_warning(&format!(
            "Dataset has {} consistency issue(s); run `mspdash check` for details",
            issues.len()
        ));
    }

    let mode = DisplayMode::detect(cli.compact || config.compact);
    let command = cli.command.unwrap_or(Commands::Tui { tab: None });

    match command {
        Commands::Tui { tab } => {
            let tab_id = tab.unwrap_or_else(|| config.default_tab.clone());
            let initial = Tab::from_id(&tab_id).unwrap_or_else(|| {
                print_warning(&format!("Unknown tab '{}', opening overview", tab_id));
                Tab::Overview
            });
            let mut app = TuiApp::new(&dataset, initial, config.chart_top_n);
            app.run()?;
        }
        Commands::Summary => {
            let totals = Totals::from_dataset(&dataset, Local::now());
            let ranked = ranked_clients(&dataset);
            if cli.json {
                display_json(&serde_json::json!({ "totals": totals, "ranked": ranked }));
            } else {
                display_summary(&totals, &client_table_rows(&ranked), &CLIENT_HEADERS);
            }
        }
        Commands::Clients { sort, desc } => {
            let clients = alphabetical_clients(&dataset);
            let rows = client_table_rows(&clients);
            let (clients, rows, state) =
                sort_records(clients.iter().collect(), rows, &CLIENT_HEADERS, sort, desc)?;
            if cli.json {
                display_json(&clients);
            } else {
                display_rows(&CLIENT_HEADERS, &rows, &state);
            }
        }
        Commands::Users {
            search,
            client,
            sort,
            desc,
        } => {
            let users = filter_users(&dataset.all_users, &search, &client);
            let label = count_label(users.len(), "users");
            let rows = user_rows(&users);
            let (users, mut rows, state) =
                sort_records(users, rows, &USER_HEADERS, sort, desc)?;
            if cli.json {
                display_json(&users);
            } else if mode.should_show_licenses() {
                display_rows(&USER_HEADERS, &rows, &state);
            } else {
                let narrow = &USER_HEADERS[..USER_HEADERS.len() - 1];
                for row in &mut rows {
                    row.cells.truncate(narrow.len());
                }
                display_rows(narrow, &rows, &state);
            }
            if !cli.json {
                display_count_label(&label);
            }
        }
        Commands::Devices { search, sort, desc } => {
            let devices = filter_devices(&dataset.all_devices, &search);
            let label = count_label(devices.len(), "devices");
            let rows = device_rows(&devices);
            let (devices, rows, state) =
                sort_records(devices, rows, &DEVICE_HEADERS, sort, desc)?;
            if cli.json {
                display_json(&devices);
            } else {
                display_rows(&DEVICE_HEADERS, &rows, &state);
                display_count_label(&label);
            }
        }
        Commands::Client { name } => {
            let mut modal = DetailModal::default();
            modal.open(&dataset, &name);
            if cli.json {
                display_json(&serde_json::json!({
                    "client": name,
                    "users": modal.users(),
                    "devices": modal.devices(),
                }));
            } else {
                if !dataset.per_client.contains_key(&name) {
                    print_info(&format!("'{}' is not a known client", name));
                }
                display_client_detail(&modal);
            }
        }
        Commands::Check => {
            display_validation_issues(&issues);
            if !issues.is_empty() {
                anyhow::bail!("dataset failed {} consistency check(s)", issues.len());
            }
        }
        Commands::Config { show } => handle_config_command(&config, show)?,
    }

    Ok(())
}

fn client_table_rows(clients: &[ClientRow]) -> Vec<TableRow> {
    clients.iter().map(ClientRow::to_table_row).collect()
}

/// Sort once for ascending; a second pass on the same column flips to descending
fn apply_sort<R: SortableRow>(
    rows: &mut [R],
    columns: usize,
    column: Option<usize>,
    desc: bool,
) -> Result<SortState> {
    let mut state = SortState::default();
    if let Some(column) = column {
        if column >= columns {
            anyhow::bail!(
                "--sort {} is out of range; this table has columns 0 to {}",
                column,
                columns.saturating_sub(1)
            );
        }
        sort_rows(rows, column, &mut state);
        if desc {
            sort_rows(rows, column, &mut state);
        }
    }
    Ok(state)
}

/// Sort rendered rows and keep the source records in the same order
fn sort_records<'a, T>(
    records: Vec<&'a T>,
    rows: Vec<TableRow>,
    headers: &[&str],
    column: Option<usize>,
    desc: bool,
) -> Result<(Vec<&'a T>, Vec<TableRow>, SortState)> {
    let mut paired: Vec<(TableRow, &'a T)> = rows.into_iter().zip(records).collect();
    let state = apply_sort(&mut paired, headers.len(), column, desc)?;
    let (rows, records): (Vec<TableRow>, Vec<&'a T>) = paired.into_iter().unzip();
    Ok((records, rows, state))
}

/// Print the effective configuration and where it came from
fn handle_config_command(config: &Config, show: bool) -> Result<()> {
    if !show {
        print_info("Use `mspdash config --show` to print the current configuration");
        return Ok(());
    }

    println!("Current Configuration:");
    println!("Dataset Path: {:?}", config.dataset_path);
    println!(
        "Dataset Env ({}): {:?}",
        DATASET_ENV,
        std::env::var_os(DATASET_ENV)
    );
    println!("Default Tab: {}", config.default_tab);
    println!("Chart Top N: {}", config.chart_top_n);
    println!("Compact: {}", config.compact);
    println!("Config File: {:?}", Config::config_path()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;
    use crate::models::fixtures::{dataset_from, device, sample, user};

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_sort_desc_toggles() {
        let dataset = sample();
        let mut rows = client_table_rows(&alphabetical_clients(&dataset));
        let state = apply_sort(&mut rows, CLIENT_HEADERS.len(), Some(1), true).unwrap();
        assert_eq!(state.direction, sort::SortDirection::Desc);
        assert_eq!(rows[0].cells[0], "Pure Cycle");
    }

    #[test]
    fn test_apply_sort_without_column_keeps_order() {
        let dataset = sample();
        let mut rows = client_table_rows(&alphabetical_clients(&dataset));
        let before = rows.clone();
        let state = apply_sort(&mut rows, CLIENT_HEADERS.len(), None, true).unwrap();
        assert_eq!(state, SortState::default());
        assert_eq!(rows, before);
    }

    #[test]
    fn test_apply_sort_rejects_out_of_range_column() {
        let dataset = sample();
        let mut rows = client_table_rows(&alphabetical_clients(&dataset));
        let before = rows.clone();
        let err = apply_sort(&mut rows, CLIENT_HEADERS.len(), Some(3), false).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert_eq!(rows, before);
    }

    #[test]
    fn test_sorted_records_follow_sorted_rows() {
        let dataset = dataset_from(
            vec![
                user("Alliant", "Zed Moss", "zed@alliant.com", "E3"),
                user("Alliant", "Amy Hale", "amy@alliant.com", "E5"),
            ],
            vec![device("Alliant", "PC-2", "Windows 11")],
        );
        let users = filter_users(&dataset.all_users, "", "");
        let rows = user_rows(&users);
        let (users, rows, state) =
            sort_records(users, rows, &USER_HEADERS, Some(1), false).unwrap();

        let names: Vec<&str> = users.iter().map(|u: &&UserRecord| u.name.as_str()).collect();
        assert_eq!(names, vec!["Amy Hale", "Zed Moss"]);
        assert_eq!(rows[0].cells[1], "Amy Hale");
        assert_eq!(state.column, Some(1));

        let json = serde_json::to_value(&users).unwrap();
        assert_eq!(json[0]["name"], "Amy Hale");
    }
}
