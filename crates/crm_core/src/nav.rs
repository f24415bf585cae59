//! Navigation shell state: current view and sidebar visibility.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Top-level dashboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Contacts,
    Tasks,
    Calendar,
    Files,
    Notes,
    Users,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 7] = [
        Self::Dashboard,
        Self::Contacts,
        Self::Tasks,
        Self::Calendar,
        Self::Files,
        Self::Notes,
        Self::Users,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Contacts => "contacts",
            Self::Tasks => "tasks",
            Self::Calendar => "calendar",
            Self::Files => "files",
            Self::Notes => "notes",
            Self::Users => "users",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Contacts => "Contacts",
            Self::Tasks => "Tasks",
            Self::Calendar => "Calendar",
            Self::Files => "Files",
            Self::Notes => "Notes",
            Self::Users => "Users",
        }
    }

    /// Resolves a route name; anything unknown lands on the dashboard.
    pub fn from_route(route: &str) -> Self {
        let route = route.trim();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(route))
            .unwrap_or_default()
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shell state shared by the sidebar and the main pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shell {
    current: View,
    sidebar_open: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Switches view; on narrow layouts the sidebar closes.
    pub fn navigate(&mut self, view: View) {
        self.current = view;
        self.sidebar_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
