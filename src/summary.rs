use crate::helpers::format_number;
use crate::models::{ClientStats, Dataset};
use crate::sort::TableRow;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Column headers shared by the ranked and alphabetical client tables
pub const CLIENT_HEADERS: [&str; 3] = ["Client", "Users", "Devices"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRow {
    pub client: String,
    pub users_count: u64,
    pub devices_count: u64,
}

impl ClientRow {
    fn new(client: &str, stats: &ClientStats) -> Self {
        Self {
            client: client.to_string(),
            users_count: stats.users_count,
            devices_count: stats.devices_count,
        }
    }

    /// Rendered row; the client name doubles as the drill-down key
    pub fn to_table_row(&self) -> TableRow {
        TableRow::with_key(
            vec![
                self.client.clone(),
                format_number(self.users_count),
                format_number(self.devices_count),
            ],
            &self.client,
        )
    }
}

/// Global counters, formatted for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_clients: String,
    pub total_users_licensed: String,
    pub total_devices: String,
    pub last_updated: String,
}

impl Totals {
    pub fn from_dataset(dataset: &Dataset, now: DateTime<Local>) -> Self {
        Self {
            total_clients: format_number(dataset.total_clients),
            total_users_licensed: format_number(dataset.total_users_licensed),
            total_devices: format_number(dataset.total_devices),
            last_updated: format!("Last update: {}", now.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Clients by descending user count, ties broken by name
pub fn ranked_clients(dataset: &Dataset) -> Vec<ClientRow> {
    let mut rows = alphabetical_clients(dataset);
    // alphabetical input + stable sort keeps ties in name order
    rows.sort_by(|a, b| b.users_count.cmp(&a.users_count));
    rows
}

pub fn alphabetical_clients(dataset: &Dataset) -> Vec<ClientRow> {
    dataset
        .per_client
        .iter()
        .map(|(client, stats)| ClientRow::new(client, stats))
        .collect()
}

/// One bar chart: labels and values in matching order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Users and devices for the `n` clients with the most users
pub fn top_clients(dataset: &Dataset, n: usize) -> (ChartSeries, ChartSeries) {
    let top: Vec<ClientRow> = ranked_clients(dataset).into_iter().take(n).collect();
    let labels: Vec<String> = top.iter().map(|r| r.client.clone()).collect();

    let users = ChartSeries {
        title: format!("Top {} Clients by Users", n),
        label: "Licensed Users",
        labels: labels.clone(),
        values: top.iter().map(|r| r.users_count).collect(),
    };
    let devices = ChartSeries {
        title: "Devices for Top Clients".to_string(),
        label: "Devices",
        labels,
        values: top.iter().map(|r| r.devices_count).collect(),
    };
    (users, devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample;
    use std::collections::BTreeMap;

    fn dataset_with(stats: &[(&str, u64, u64)]) -> Dataset {
        let per_client: BTreeMap<String, ClientStats> = stats
            .iter()
            .map(|(c, u, d)| {
                (
                    c.to_string(),
                    ClientStats {
                        users_count: *u,
                        devices_count: *d,
                    },
                )
            })
            .collect();
        Dataset {
            total_clients: per_client.len() as u64,
            per_client,
            ..Dataset::default()
        }
    }

    fn clients(rows: &[ClientRow]) -> Vec<&str> {
        rows.iter().map(|r| r.client.as_str()).collect()
    }

    #[test]
    fn test_ranked_by_users_descending() {
        let dataset = dataset_with(&[("A", 5, 2), ("B", 9, 1)]);
        assert_eq!(clients(&ranked_clients(&dataset)), vec!["B", "A"]);
    }

    #[test]
    fn test_ranked_ties_fall_back_to_name() {
        let dataset = dataset_with(&[("Zeta", 3, 0), ("Alpha", 3, 0), ("Mid", 4, 0)]);
        assert_eq!(
            clients(&ranked_clients(&dataset)),
            vec!["Mid", "Alpha", "Zeta"]
        );
    }

    #[test]
    fn test_alphabetical() {
        let dataset = dataset_with(&[("B", 9, 1), ("A", 5, 2)]);
        assert_eq!(clients(&alphabetical_clients(&dataset)), vec!["A", "B"]);
    }

    #[test]
    fn test_table_row_carries_key() {
        let row = ClientRow {
            client: "Amstar".to_string(),
            users_count: 1200,
            devices_count: 7,
        }
        .to_table_row();
        assert_eq!(row.key.as_deref(), Some("Amstar"));
        assert_eq!(row.cells, vec!["Amstar", "1,200", "7"]);
    }

    #[test]
    fn test_top_clients_series() {
        let dataset = sample();
        let (users, devices) = top_clients(&dataset, 2);
        assert_eq!(users.labels, vec!["Pure Cycle", "Alliant"]);
        assert_eq!(users.values, vec![3, 2]);
        assert_eq!(devices.labels, users.labels);
        assert_eq!(devices.values, vec![0, 1]);
        assert_eq!(users.title, "Top 2 Clients by Users");
        assert_eq!(users.max(), 3);
    }

    #[test]
    fn test_totals_are_formatted() {
        let mut dataset = sample();
        dataset.total_users_licensed = 12345;
        let totals = Totals::from_dataset(&dataset, Local::now());
        assert_eq!(totals.total_users_licensed, "12,345");
        assert_eq!(totals.total_clients, "4");
        assert!(totals.last_updated.starts_with("Last update: "));
    }
}
