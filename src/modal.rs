use crate::models::{Dataset, DeviceRecord, UserRecord};

pub const NO_USERS: &str = "No licensed users";
pub const NO_DEVICES: &str = "No devices";

/// Per-client drill-down overlay
#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    visible: bool,
    client: String,
    users: Vec<UserRecord>,
    devices: Vec<DeviceRecord>,
}

impl DetailModal {
    /// Show `client`. An unknown client opens with empty lists.
    pub fn open(&mut self, dataset: &Dataset, client: &str) {
        self.client = client.to_string();
        self.users = dataset.users_for(client).to_vec();
        self.devices = dataset.devices_for(client).to_vec();
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> String {
        format!("Client: {}", self.client)
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Lines for the users list: name, UPN, licenses; or the placeholder
    pub fn user_lines(&self) -> Vec<Vec<String>> {
        if self.users.is_empty() {
            return vec![vec![NO_USERS.to_string()]];
        }
        self.users
            .iter()
            .map(|u| vec![u.name.clone(), u.upn.clone(), u.licenses.clone()])
            .collect()
    }

    pub fn device_lines(&self) -> Vec<Vec<String>> {
        if self.devices.is_empty() {
            return vec![vec![NO_DEVICES.to_string()]];
        }
        self.devices
            .iter()
            .map(|d| vec![d.name.clone(), d.os.clone()])
            .collect()
    }
}
