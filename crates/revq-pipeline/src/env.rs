//! Runtime environment detection for step eligibility.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// The runtime context a pipeline executes in.
///
/// A closed enumeration: [`Environment::all`] is computed by iterating the
/// variants, so adding a new environment here automatically makes
/// un-customized steps eligible for it.
///
/// # Serialization
///
/// Serializes to snake_case strings (`"local"`, `"gh_action"`), which is also
/// the form used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Developer machine or any ad-hoc invocation.
    Local,
    /// GitHub Actions hosted workflow run.
    GhAction,
}

impl Environment {
    /// Every recognized environment, in declaration order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Detect the current environment from the process environment.
    #[must_use]
    pub fn current() -> Self {
        if running_in_github_action() {
            Self::GhAction
        } else {
            Self::Local
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::GhAction => "gh_action",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The hosted runner sets `GITHUB_ACTIONS=true`; that single signal decides
/// the environment.
#[must_use]
pub fn running_in_github_action() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value.eq_ignore_ascii_case("true"))
}
