use serde::{Deserialize, Serialize};

/// Catalogs backing the sprint and developer dropdowns. Deployments
/// can supply their own; the defaults match the first team that used
/// the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Allowed sprint slots. A sprint can only be saved under one of these.
    pub sprint_names: Vec<String>,
    /// Developer roster items can be assigned to.
    pub developers: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            sprint_names: vec![
                "Sprint 1".to_string(),
                "Sprint 2".to_string(),
                "Sprint 3".to_string(),
            ],
            developers: vec![
                "Daksh".to_string(),
                "Chetan".to_string(),
                "Gaurav".to_string(),
                "Shaurya".to_string(),
                "Sameeksha".to_string(),
                "Simran".to_string(),
            ],
        }
    }
}

impl TrackerConfig {
    pub fn allows_sprint_name(&self, name: &str) -> bool {
        self.sprint_names.iter().any(|n| n == name)
    }

    pub fn knows_developer(&self, developer: &str) -> bool {
        self.developers.iter().any(|d| d == developer)
    }
}
