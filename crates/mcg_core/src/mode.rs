use serde::{Deserialize, Serialize};

/// Run mode controls developer diagnostics only. It never changes simulation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Frame number and active scene are drawn every tick.
    #[default]
    Development,
    Production,
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn shows_debug_overlay(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
