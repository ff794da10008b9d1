use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type ClientName = String;

/// Precomputed snapshot of every client, licensed user, and device.
///
/// Produced by an external build step and never mutated here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub total_clients: u64,
    pub total_users_licensed: u64,
    pub total_devices: u64,
    #[serde(default)]
    pub per_client: BTreeMap<ClientName, ClientStats>,
    #[serde(default)]
    pub all_users: Vec<UserRecord>,
    #[serde(default)]
    pub all_devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub users_by_client: BTreeMap<ClientName, Vec<UserRecord>>,
    #[serde(default)]
    pub devices_by_client: BTreeMap<ClientName, Vec<DeviceRecord>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub users_count: u64,
    pub devices_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    pub client: String,
    pub name: String,
    pub upn: String,
    /// Human-readable, already joined license list
    pub licenses: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceRecord {
    pub client: String,
    pub name: String,
    pub os: String,
}

/// A consistency problem found in a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    UsersCountMismatch {
        client: String,
        stated: u64,
        actual: usize,
    },
    DevicesCountMismatch {
        client: String,
        stated: u64,
        actual: usize,
    },
    KeyMissing {
        client: String,
        map: &'static str,
    },
    TotalMismatch {
        field: &'static str,
        stated: u64,
        actual: usize,
    },
    ForeignRecord {
        client: String,
        record: String,
        record_client: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UsersCountMismatch {
                client,
                stated,
                actual,
            } => write!(
                f,
                "{}: usersCount is {} but usersByClient has {} entries",
                client, stated, actual
            ),
            ValidationIssue::DevicesCountMismatch {
                client,
                stated,
                actual,
            } => write!(
                f,
                "{}: devicesCount is {} but devicesByClient has {} entries",
                client, stated, actual
            ),
            ValidationIssue::KeyMissing { client, map } => {
                write!(f, "{}: missing from {}", client, map)
            }
            ValidationIssue::TotalMismatch {
                field,
                stated,
                actual,
            } => write!(f, "{} is {} but the list has {} entries", field, stated, actual),
            ValidationIssue::ForeignRecord {
                client,
                record,
                record_client,
            } => write!(
                f,
                "{}: record '{}' belongs to client '{}'",
                client, record, record_client
            ),
        }
    }
}

impl Dataset {
    /// Users for one client, empty when the client is unknown
    pub fn users_for(&self, client: &str) -> &[UserRecord] {
        self.users_by_client
            .get(client)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Devices for one client, empty when the client is unknown
    pub fn devices_for(&self, client: &str) -> &[DeviceRecord] {
        self.devices_by_client
            .get(client)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn client_names(&self) -> impl Iterator<Item = &str> {
        self.per_client.keys().map(String::as_str)
    }

    /// Check the count and key-set invariants between the maps and lists
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (client, stats) in &self.per_client {
            match self.users_by_client.get(client) {
                Some(users) if users.len() as u64 != stats.users_count => {
                    issues.push(ValidationIssue::UsersCountMismatch {
                        client: client.clone(),
                        stated: stats.users_count,
                        actual: users.len(),
                    });
                }
                Some(_) => {}
                None => issues.push(ValidationIssue::KeyMissing {
                    client: client.clone(),
                    map: "usersByClient",
                }),
            }

            match self.devices_by_client.get(client) {
                Some(devices) if devices.len() as u64 != stats.devices_count => {
                    issues.push(ValidationIssue::DevicesCountMismatch {
                        client: client.clone(),
                        stated: stats.devices_count,
                        actual: devices.len(),
                    });
                }
                Some(_) => {}
                None => issues.push(ValidationIssue::KeyMissing {
                    client: client.clone(),
                    map: "devicesByClient",
                }),
            }
        }

        let extra_users = self
            .users_by_client
            .keys()
            .filter(|c| !self.per_client.contains_key(*c));
        let extra_devices = self
            .devices_by_client
            .keys()
            .filter(|c| !self.per_client.contains_key(*c));
        for client in extra_users.chain(extra_devices) {
            let issue = ValidationIssue::KeyMissing {
                client: client.clone(),
                map: "perClient",
            };
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        }

        for (client, users) in &self.users_by_client {
            for user in users.iter().filter(|u| &u.client != client) {
                issues.push(ValidationIssue::ForeignRecord {
                    client: client.clone(),
                    record: user.upn.clone(),
                    record_client: user.client.clone(),
                });
            }
        }
        for (client, devices) in &self.devices_by_client {
            for device in devices.iter().filter(|d| &d.client != client) {
                issues.push(ValidationIssue::ForeignRecord {
                    client: client.clone(),
                    record: device.name.clone(),
                    record_client: device.client.clone(),
                });
            }
        }

        let totals = [
            ("totalClients", self.total_clients, self.per_client.len()),
            (
                "totalUsersLicensed",
                self.total_users_licensed,
                self.all_users.len(),
            ),
            ("totalDevices", self.total_devices, self.all_devices.len()),
        ];
        for (field, stated, actual) in totals {
            if stated != actual as u64 {
                issues.push(ValidationIssue::TotalMismatch {
                    field,
                    stated,
                    actual,
                });
            }
        }

        issues
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_counts_match_lists() {
        let dataset = sample();
        for (client, stats) in &dataset.per_client {
            assert_eq!(stats.users_count as usize, dataset.users_for(client).len());
            assert_eq!(stats.devices_count as usize, dataset.devices_for(client).len());
        }
        assert!(dataset.validate().is_empty());
    }

    #[test]
    fn test_unknown_client_is_empty() {
        let dataset = sample();
        assert!(dataset.users_for("NoSuchClient").is_empty());
        assert!(dataset.devices_for("NoSuchClient").is_empty());
    }

    #[test]
    fn test_validate_flags_count_mismatch() {
        let mut dataset = sample();
        dataset.per_client.get_mut("Alliant").unwrap().users_count = 7;
        let issues = dataset.validate();
        assert!(issues.contains(&ValidationIssue::UsersCountMismatch {
            client: "Alliant".to_string(),
            stated: 7,
            actual: 2,
        }));
    }

    #[test]
    fn test_validate_flags_key_set_mismatch() {
        let mut dataset = sample();
        dataset.devices_by_client.remove("Greyhill");
        dataset
            .users_by_client
            .insert("Orphan".to_string(), Vec::new());
        let issues = dataset.validate();
        assert!(issues.contains(&ValidationIssue::KeyMissing {
            client: "Greyhill".to_string(),
            map: "devicesByClient",
        }));
        assert!(issues.contains(&ValidationIssue::KeyMissing {
            client: "Orphan".to_string(),
            map: "perClient",
        }));
    }

    #[test]
    fn test_deserialize_camel_case_ignores_extra_fields() {
        let json = r#"{
            "totalClients": 1,
            "totalUsersLicensed": 1,
            "totalDevices": 0,
            "perClient": {"Amstar": {"usersCount": 1, "devicesCount": 0}},
            "allUsers": [{"client": "Amstar", "name": "Kim", "upn": "kim@amstar.com", "licenses": "Microsoft 365 E3"}],
            "allDevices": [],
            "usersByClient": {"Amstar": [{"client": "Amstar", "name": "Kim", "upn": "kim@amstar.com", "licenses": "Microsoft 365 E3"}]},
            "devicesByClient": {"Amstar": []},
            "billingByClient": {}
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.per_client["Amstar"].users_count, 1);
        assert_eq!(dataset.users_for("Amstar")[0].upn, "kim@amstar.com");
        assert!(dataset.validate().is_empty());
    }
}
