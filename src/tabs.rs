use crate::helpers::capitalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Users,
    Devices,
    Clients,
    Charts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Users,
        Tab::Devices,
        Tab::Clients,
        Tab::Charts,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Users => "users",
            Tab::Devices => "devices",
            Tab::Clients => "clients",
            Tab::Charts => "charts",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Exactly one active tab plus the title derived from it
#[derive(Debug, Clone)]
pub struct TabController {
    active: Tab,
    title: String,
}

impl TabController {
    pub fn new(initial: Tab) -> Self {
        Self {
            active: initial,
            title: capitalize(initial.id()),
        }
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
        self.title = capitalize(tab.id());
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn next(&mut self) {
        let i = (self.active.index() + 1) % Tab::ALL.len();
        self.select(Tab::ALL[i]);
    }

    pub fn previous(&mut self) {
        let i = (self.active.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.select(Tab::ALL[i]);
    }

    pub fn titles() -> Vec<String> {
        Tab::ALL.iter().map(|t| capitalize(t.id())).collect()
    }
}
