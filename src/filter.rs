use crate::models::{Dataset, DeviceRecord, UserRecord};
use crate::sort::TableRow;

/// Pulls one searchable text field out of a record
pub type FieldExtractor<T> = fn(&T) -> &str;

pub const USER_FIELDS: [FieldExtractor<UserRecord>; 4] =
    [user_client, user_name, user_upn, user_licenses];

pub const DEVICE_FIELDS: [FieldExtractor<DeviceRecord>; 3] =
    [device_client, device_name, device_os];

fn user_client(u: &UserRecord) -> &str {
    &u.client
}

fn user_name(u: &UserRecord) -> &str {
    &u.name
}

fn user_upn(u: &UserRecord) -> &str {
    &u.upn
}

fn user_licenses(u: &UserRecord) -> &str {
    &u.licenses
}

fn device_client(d: &DeviceRecord) -> &str {
    &d.client
}

fn device_name(d: &DeviceRecord) -> &str {
    &d.name
}

fn device_os(d: &DeviceRecord) -> &str {
    &d.os
}

/// Keep the records whose fields contain `query` (case-insensitive) and that
/// satisfy `extra`, in their original order.
pub fn filter<'a, T, P>(
    records: &'a [T],
    query: &str,
    fields: &[FieldExtractor<T>],
    extra: Option<P>,
) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
{
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_text(*record, &needle, fields))
        .filter(|record| extra.as_ref().is_none_or(|predicate| predicate(record)))
        .collect()
}

fn matches_text<T>(record: &T, needle: &str, fields: &[FieldExtractor<T>]) -> bool {
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field(record).to_lowercase().contains(needle))
}

/// Filter users by text and, when `client` is non-empty, by exact client
pub fn filter_users<'a>(
    users: &'a [UserRecord],
    query: &str,
    client: &str,
) -> Vec<&'a UserRecord> {
    let selected = (!client.is_empty()).then(|| move |u: &UserRecord| u.client == client);
    filter(users, query, &USER_FIELDS, selected)
}

pub fn filter_devices<'a>(devices: &'a [DeviceRecord], query: &str) -> Vec<&'a DeviceRecord> {
    filter(devices, query, &DEVICE_FIELDS, None::<fn(&DeviceRecord) -> bool>)
}

/// Choices for the client selector: every client key, alphabetically
pub fn client_options(dataset: &Dataset) -> Vec<String> {
    dataset.client_names().map(str::to_string).collect()
}

/// Search and selector state for one list tab
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub query: String,
    /// Empty means "all clients"
    pub client: String,
}

impl ListView {
    pub fn users<'a>(&self, dataset: &'a Dataset) -> Vec<&'a UserRecord> {
        filter_users(&dataset.all_users, &self.query, &self.client)
    }

    pub fn devices<'a>(&self, dataset: &'a Dataset) -> Vec<&'a DeviceRecord> {
        filter_devices(&dataset.all_devices, &self.query)
    }

    /// Move the selector to the next client, wrapping back to "all clients"
    pub fn cycle_client(&mut self, options: &[String]) {
        self.client = if self.client.is_empty() {
            options.first().cloned().unwrap_or_default()
        } else {
            options
                .iter()
                .position(|c| *c == self.client)
                .and_then(|i| options.get(i + 1))
                .cloned()
                .unwrap_or_default()
        };
    }

    pub fn client_label(&self) -> &str {
        if self.client.is_empty() {
            "All clients"
        } else {
            &self.client
        }
    }
}

pub fn count_label(count: usize, noun: &str) -> String {
    format!("Showing: {} {}", count, noun)
}

pub const USER_HEADERS: [&str; 4] = ["Client", "Name", "UPN", "Licenses"];
pub const DEVICE_HEADERS: [&str; 3] = ["Client", "Name", "OS"];

/// Render filtered users; each row drills into its client
pub fn user_rows(users: &[&UserRecord]) -> Vec<TableRow> {
    users
        .iter()
        .map(|u| {
            TableRow::with_key(
                vec![
                    u.client.clone(),
                    u.name.clone(),
                    u.upn.clone(),
                    u.licenses.clone(),
                ],
                &u.client,
            )
        })
        .collect()
}

pub fn device_rows(devices: &[&DeviceRecord]) -> Vec<TableRow> {
    devices
        .iter()
        .map(|d| {
            TableRow::with_key(
                vec![d.client.clone(), d.name.clone(), d.os.clone()],
                &d.client,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample;

    fn names(users: &[&UserRecord]) -> Vec<String> {
        users.iter().map(|u| u.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let dataset = sample();
        let all = filter_users(&dataset.all_users, "", "");
        assert_eq!(all.len(), dataset.all_users.len());
        assert!(all.iter().zip(&dataset.all_users).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let dataset = sample();
        let users = &dataset.all_users;
        assert_eq!(
            names(&filter_users(users, "E5", "")),
            vec!["Ada Park", "Eve Lind"]
        );
        assert_eq!(names(&filter_users(users, "GREYHILL", "")), vec!["Cara Wu"]);
        assert_eq!(names(&filter_users(users, "finn@", "")), vec!["Finn Holt"]);
    }

    #[test]
    fn test_client_selector_is_anded() {
        let dataset = sample();
        let hits = filter_users(&dataset.all_users, "microsoft 365", "Pure Cycle");
        assert_eq!(names(&hits), vec!["Dan Moss", "Eve Lind", "Finn Holt"]);
        assert!(filter_users(&dataset.all_users, "E5", "Greyhill").is_empty());
        assert!(filter_users(&dataset.all_users, "", "pure cycle").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dataset = sample();
        let once: Vec<UserRecord> = filter_users(&dataset.all_users, "pure", "")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_users(&once, "pure", "");
        assert_eq!(twice.len(), once.len());
        assert!(twice.iter().zip(&once).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_device_fields() {
        let dataset = sample();
        let hits = filter_devices(&dataset.all_devices, "server");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "AVON-SRV");
        assert_eq!(filter_devices(&dataset.all_devices, "windows 11").len(), 2);
    }

    #[test]
    fn test_cycle_client_wraps() {
        let dataset = sample();
        let options = client_options(&dataset);
        let mut view = ListView::default();
        assert_eq!(view.client_label(), "All clients");
        for expected in &options {
            view.cycle_client(&options);
            assert_eq!(&view.client, expected);
        }
        view.cycle_client(&options);
        assert!(view.client.is_empty());
    }

    #[test]
    fn test_rows_follow_headers() {
        let dataset = sample();
        let rows = user_rows(&filter_users(&dataset.all_users, "cara", ""));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), USER_HEADERS.len());
        assert_eq!(rows[0].cells[2], "cara@greyhill.net");
        assert_eq!(rows[0].key.as_deref(), Some("Greyhill"));

        let rows = device_rows(&filter_devices(&dataset.all_devices, ""));
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.cells.len() == DEVICE_HEADERS.len()));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(3, "users"), "Showing: 3 users");
    }
}
