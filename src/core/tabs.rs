//! Mutually exclusive content panels.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Chat,
    Health,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Chat, Tab::Health];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Health => "Health Risk",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Chat => 0,
            Tab::Health => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Tracks which tab is active. Exactly one is active at any time.
#[derive(Debug, Clone, Default)]
pub struct TabState {
    active: Tab,
}

impl TabState {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Returns true when the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        changed
    }

    pub fn select_next(&mut self) {
        let next = (self.active.index() + 1) % Tab::ALL.len();
        self.active = Tab::ALL[next];
    }

    pub fn select_previous(&mut self) {
        let len = Tab::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = Tab::ALL[previous];
    }
}
