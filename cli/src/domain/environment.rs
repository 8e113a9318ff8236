//! Execution environment handed to every external command.
//!
//! The environment is an explicit value: it is seeded once from the host,
//! rebound when the cluster's container runtime variables are known, and
//! then passed by reference to each command invocation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Variables that point the container runtime client at the cluster.
pub const RUNTIME_ENV_KEYS: &[&str] = &["DOCKER_HOST", "DOCKER_TLS_VERIFY", "DOCKER_CERT_PATH"];

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*export\s+([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("valid regex")
});

/// Name → value mapping used as the full environment of child processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecEnv {
    vars: BTreeMap<String, String>,
}

impl ExecEnv {
    /// Build an environment from `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Return a copy of this environment with `overrides` applied on top.
    #[must_use]
    pub fn with_overrides<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars = self.vars.clone();
        vars.extend(overrides);
        Self { vars }
    }

    /// Iterate over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse `export KEY="VALUE"` lines as printed by `minikube docker-env`.
///
/// Surrounding single or double quotes are stripped from values. Lines that
/// are not exports (comments, `eval` hints) are ignored.
#[must_use]
pub fn parse_exports(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| EXPORT_RE.captures(line.trim()))
        .map(|caps| {
            let value = caps[2].trim().trim_matches(|c| c == '"' || c == '\'');
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Keep only the variables that redirect the container runtime.
#[must_use]
pub fn runtime_overrides(exports: Vec<(String, String)>) -> Vec<(String, String)> {
    exports
        .into_iter()
        .filter(|(k, _)| RUNTIME_ENV_KEYS.contains(&k.as_str()))
        .collect()
}
