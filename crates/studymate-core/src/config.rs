use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Product-level behaviour switches that differed between releases of the
/// original screens. One consistent choice is made per flag.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PolicyConfig {
    /// A successful registration signs the user in and opens the dashboard.
    pub registration_signs_in: bool,
    /// A successful federated login also opens the session drawer.
    pub google_login_opens_drawer: bool,
    /// Confirm a cached session with the collaborator before trusting it.
    pub revalidate_restored_session: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            registration_signs_in: true,
            google_login_opens_drawer: false,
            revalidate_restored_session: false,
        }
    }
}

/// Root client configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Per-request timeout. `0` disables it.
    pub request_timeout_secs: u64,
    pub log_level: String,
    /// How long the presentation layer keeps a notification on screen.
    pub notification_duration_ms: u64,
    pub policy: PolicyConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 60,
            log_level: "info".to_string(),
            notification_duration_ms: 6000,
            policy: PolicyConfig::default(),
        }
    }
}
