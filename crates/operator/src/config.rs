use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::remediation::RemediationRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub remediation: RemediationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationConfig {
    pub target_alert: String,
    pub playbook_bin: PathBuf,
    pub inventory_path: PathBuf,
    pub private_key_path: PathBuf,
    pub playbook_path: PathBuf,
    pub working_dir: PathBuf,
    pub timeout_secs: u64,
}

impl RemediationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the fixed process invocation. This is the only place the
    /// command line is assembled; alert data has no path into it.
    pub fn to_request(&self) -> RemediationRequest {
        RemediationRequest {
            program: self.playbook_bin.clone(),
            args: vec![
                OsString::from("-i"),
                self.inventory_path.clone().into_os_string(),
                OsString::from("--private-key"),
                self.private_key_path.clone().into_os_string(),
                self.playbook_path.clone().into_os_string(),
            ],
            working_dir: self.working_dir.clone(),
        }
    }
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR")
                    .unwrap_or_else(|_| "0.0.0.0:5001".to_string()),
            },
            remediation: RemediationConfig {
                target_alert: std::env::var("TARGET_ALERT")
                    .unwrap_or_else(|_| "NginxDown".to_string()),
                playbook_bin: std::env::var("ANSIBLE_PLAYBOOK_BIN")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        PathBuf::from("/home/ansible/.local/bin/ansible-playbook")
                    }),
                inventory_path: std::env::var("ANSIBLE_INVENTORY")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/home/ansible/ansible/inventory")),
                private_key_path: std::env::var("ANSIBLE_PRIVATE_KEY")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/home/ansible/.ssh/ansible_key")),
                playbook_path: std::env::var("ANSIBLE_PLAYBOOK")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        PathBuf::from("/home/ansible/ansible/restart_nginx.yml")
                    }),
                working_dir: std::env::var("ANSIBLE_WORKDIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/home/ansible")),
                timeout_secs: std::env::var("REMEDIATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.remediation.target_alert.is_empty() {
            return Err(crate::Error::Config(
                "TARGET_ALERT must not be empty".to_string(),
            ));
        }
        if self.remediation.timeout_secs == 0 {
            return Err(crate::Error::Config(
                "REMEDIATION_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: "0.0.0.0:5001".to_string(),
            },
            remediation: RemediationConfig {
                target_alert: "NginxDown".to_string(),
                playbook_bin: PathBuf::from("/home/ansible/.local/bin/ansible-playbook"),
                inventory_path: PathBuf::from("/home/ansible/ansible/inventory"),
                private_key_path: PathBuf::from("/home/ansible/.ssh/ansible_key"),
                playbook_path: PathBuf::from("/home/ansible/ansible/restart_nginx.yml"),
                working_dir: PathBuf::from("/home/ansible"),
                timeout_secs: 300,
            },
        }
    }
}
