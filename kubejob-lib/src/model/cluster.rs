//! `/cluster-info` snapshot.

use serde::Deserialize;
use serde::Serialize;

/// Response from `GET /cluster-info`.
///
/// When the scaler cannot reach the cluster API it still answers, with empty
/// lists and `error` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterInfo {
    pub nodes: Vec<Node>,
    pub events: Vec<ClusterEvent>,
    pub pods: Vec<Pod>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub name: String,
    pub status: String,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub os: Option<String>,
    pub kernel: Option<String>,
}

impl Node {
    pub fn is_ready(&self) -> bool {
        self.status == "Ready"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pod {
    pub name: String,
    pub status: Option<String>,
    pub ip: Option<String>,
    pub node: Option<String>,
    pub restarts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterEvent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub object: Option<String>,
    pub time: Option<String>,
}

impl ClusterEvent {
    pub fn is_warning(&self) -> bool {
        self.kind.as_deref() == Some("Warning")
    }
}
