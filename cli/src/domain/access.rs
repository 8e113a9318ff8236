//! Access point formatting.

use crate::domain::config::AccessConfig;

/// Endpoints shown to the operator once the stack is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoints {
    /// `http://<address>:<ingress port>/`.
    pub ingress_url: String,
    /// One `<kubectl> port-forward` hint per configured forward.
    pub port_forwards: Vec<PortForwardHint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortForwardHint {
    pub name: String,
    pub command: String,
    pub local_url: String,
}

impl AccessPoints {
    /// Combine the cluster address (or its placeholder) with configured ports.
    ///
    /// `kubectl` is the workload CLI named in the port-forward hints.
    #[must_use]
    pub fn new(address: &str, access: &AccessConfig, kubectl: &str) -> Self {
        let port_forwards = access
            .port_forwards
            .iter()
            .map(|pf| PortForwardHint {
                name: pf.name.clone(),
                command: format!(
                    "{kubectl} port-forward svc/{} {}:{}",
                    pf.service, pf.local_port, pf.remote_port
                ),
                local_url: format!("http://localhost:{}", pf.local_port),
            })
            .collect();
        Self {
            ingress_url: format!("http://{address}:{}/", access.ingress_port),
            port_forwards,
        }
    }
}
