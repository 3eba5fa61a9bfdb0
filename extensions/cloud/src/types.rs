use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub distribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub id: String,
    pub vcpus: u32,
    pub memory_mb: u32,
    pub disk_gb: u32,
    pub price_monthly: f64,
}

impl Size {
    /// e.g. `1 vCPU, 1024 MB, 25 GB, $5.00/mo`
    pub fn describe(&self) -> String {
        let cpu = if self.vcpus == 1 { "vCPU" } else { "vCPUs" };
        format!(
            "{} {}, {} MB, {} GB, ${:.2}/mo",
            self.vcpus, cpu, self.memory_mb, self.disk_gb, self.price_monthly
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fingerprint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    New,
    Active,
    Off,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerStatus::New => "new",
            ServerStatus::Active => "active",
            ServerStatus::Off => "off",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub image: String,
    pub size: String,
    pub region: String,
    pub ssh_key: Option<String>,
    pub status: ServerStatus,
    pub created_at: DateTime<Utc>,
}
