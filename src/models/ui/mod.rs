// UI models module
// Calendar views the layout engine can produce windows for

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewType {
    Day,
    WorkWeek,
    #[default]
    Week,
}

impl ViewType {
    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::WorkWeek => "Work Week",
            ViewType::Week => "Week",
        }
    }
}
