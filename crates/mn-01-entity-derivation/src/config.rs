//! # Parser Configuration
//!
//! Alias-resolution failure policy and per-feature persistence toggles.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MN_PARTIAL_DATA_ACTION` | `skip` | `skip` or `throw` on unresolved aliases |
//! | `MN_PERSIST_<FLAG>` | see [`PersistProperties`] | enable or disable a feature |

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// What to do when an alias or EVM address cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialDataAction {
    /// Treat the id as absent and continue.
    #[default]
    Skip,
    /// Abort processing of the transaction.
    Throw,
}

impl FromStr for PartialDataAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "throw" => Ok(Self::Throw),
            other => Err(format!("unknown partial data action: {other}")),
        }
    }
}

impl fmt::Display for PartialDataAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Throw => write!(f, "throw"),
        }
    }
}

/// Feature toggles gating which handlers emit anything at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistProperties {
    /// Live hashes.
    pub claims: bool,
    pub contracts: bool,
    pub contract_results: bool,
    pub ethereum_transactions: bool,
    /// File data for every file.
    pub files: bool,
    /// File data for system files even when `files` is off.
    pub system_files: bool,
    pub nodes: bool,
    pub schedules: bool,
    pub token_airdrops: bool,
    pub tokens: bool,
    pub topics: bool,
}

impl Default for PersistProperties {
    fn default() -> Self {
        Self {
            claims: false,
            contracts: true,
            contract_results: true,
            ethereum_transactions: true,
            files: true,
            system_files: true,
            nodes: true,
            schedules: true,
            token_airdrops: true,
            tokens: true,
            topics: true,
        }
    }
}

impl PersistProperties {
    /// Load from `MN_PERSIST_<FLAG>` variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            claims: env_flag("MN_PERSIST_CLAIMS", defaults.claims),
            contracts: env_flag("MN_PERSIST_CONTRACTS", defaults.contracts),
            contract_results: env_flag("MN_PERSIST_CONTRACT_RESULTS", defaults.contract_results),
            ethereum_transactions: env_flag(
                "MN_PERSIST_ETHEREUM_TRANSACTIONS",
                defaults.ethereum_transactions,
            ),
            files: env_flag("MN_PERSIST_FILES", defaults.files),
            system_files: env_flag("MN_PERSIST_SYSTEM_FILES", defaults.system_files),
            nodes: env_flag("MN_PERSIST_NODES", defaults.nodes),
            schedules: env_flag("MN_PERSIST_SCHEDULES", defaults.schedules),
            token_airdrops: env_flag("MN_PERSIST_TOKEN_AIRDROPS", defaults.token_airdrops),
            tokens: env_flag("MN_PERSIST_TOKENS", defaults.tokens),
            topics: env_flag("MN_PERSIST_TOPICS", defaults.topics),
        }
    }
}

/// Configuration of the entity derivation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub partial_data_action: PartialDataAction,
    pub persist: PersistProperties,
}

impl ParserConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let partial_data_action = env::var("MN_PARTIAL_DATA_ACTION")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            partial_data_action,
            persist: PersistProperties::from_env(),
        }
    }

    /// Parse a JSON document; absent keys take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_partial_data_action(mut self, action: PartialDataAction) -> Self {
        self.partial_data_action = action;
        self
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
