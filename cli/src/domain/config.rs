//! Domain types and validators for stackup configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::readiness::ReadinessPolicy;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `<root>/stackup.yaml`.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    pub cluster: ClusterConfig,
    pub runtime: RuntimeConfig,
    pub workloads: WorkloadConfig,
    pub infra: InfraConfig,
    pub readiness: ReadinessConfig,
    pub access: AccessConfig,
    pub commands: CommandConfig,
}

/// Local cluster (minikube) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    pub binary: String,
    pub profile: String,
    /// Shown in place of the cluster address when it cannot be resolved.
    pub address_placeholder: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            binary: "minikube".to_string(),
            profile: "minikube".to_string(),
            address_placeholder: "<minikube-ip>".to_string(),
        }
    }
}

/// Container runtime and image settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub binary: String,
    /// A subdirectory holding this file is a service.
    pub build_descriptor: String,
    pub image_suffix: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            build_descriptor: "Dockerfile".to_string(),
            image_suffix: "-service".to_string(),
        }
    }
}

/// Orchestration query settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkloadConfig {
    pub binary: String,
    /// Resource kind polled for readiness.
    pub kind: String,
    /// Marker a status line must contain to count as healthy.
    pub ready_marker: String,
    /// Deployment whose presence means the stack was deployed before.
    pub deployment_sentinel: String,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            binary: "kubectl".to_string(),
            kind: "pods".to_string(),
            ready_marker: "Running".to_string(),
            deployment_sentinel: "backend-deployment".to_string(),
        }
    }
}

/// Infrastructure-as-code settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InfraConfig {
    pub binary: String,
    /// Manifest directory, relative to the project root unless absolute.
    pub manifests_dir: PathBuf,
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            manifests_dir: PathBuf::from("terraform/local"),
        }
    }
}

impl InfraConfig {
    #[must_use]
    pub fn manifests_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifests_dir)
    }
}

/// Readiness polling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub interval_secs: u64,
    pub progress_every: u32,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        let policy = ReadinessPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            interval_secs: policy.interval.as_secs(),
            progress_every: policy.progress_every,
        }
    }
}

impl ReadinessConfig {
    #[must_use]
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_secs(self.interval_secs),
            progress_every: self.progress_every,
        }
    }
}

/// Access point settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccessConfig {
    pub ingress_port: u16,
    pub port_forwards: Vec<PortForward>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            ingress_port: 32080,
            port_forwards: vec![
                PortForward {
                    name: "UI".to_string(),
                    service: "ui-service".to_string(),
                    local_port: 8082,
                    remote_port: 80,
                },
                PortForward {
                    name: "Jenkins".to_string(),
                    service: "jenkins-service".to_string(),
                    local_port: 8083,
                    remote_port: 8080,
                },
            ],
        }
    }
}

/// An optional `kubectl port-forward` hint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortForward {
    pub name: String,
    pub service: String,
    pub local_port: u16,
    pub remote_port: u16,
}

/// External command settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandConfig {
    pub timeout_secs: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self { timeout_secs: 1800 }
    }
}

impl CommandConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a loaded configuration.
///
/// # Errors
///
/// Returns an error if a count or duration that must be positive is zero.
pub fn validate_config(config: &StackConfig) -> Result<()> {
    for (key, value) in [
        ("readiness.max_attempts", u64::from(config.readiness.max_attempts)),
        ("readiness.progress_every", u64::from(config.readiness.progress_every)),
        ("commands.timeout_secs", config.commands.timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: "any integer >= 1".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
