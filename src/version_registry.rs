use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::ServerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineVersion {
    pub current: i64,
    pub minimal: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSession {
    pub server_id: ServerId,
    pub engine_version: EngineVersion,
}

/// Cluster-wide view of the oldest index engine version any node can serve.
#[derive(Debug, Default)]
pub struct EngineVersionRegistry {
    versions: Mutex<HashMap<ServerId, EngineVersion>>,
}

impl EngineVersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn startup<'a>(&self, sessions: impl IntoIterator<Item = &'a NodeSession>) {
        let mut versions = self.versions.lock();
        for session in sessions {
            versions.insert(session.server_id, session.engine_version);
        }
    }

    pub fn add_node(&self, session: &NodeSession) {
        self.versions
            .lock()
            .insert(session.server_id, session.engine_version);
    }

    pub fn update(&self, session: &NodeSession) {
        self.add_node(session)
    }

    pub fn remove_node(&self, session: &NodeSession) {
        self.versions.lock().remove(&session.server_id);
    }

    /// Smallest minimal version over the registered nodes, or 0 when no node
    /// is registered. The value is a snapshot.
    pub fn minimal_version(&self) -> i64 {
        self.versions
            .lock()
            .values()
            .map(|v| v.minimal)
            .min()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.versions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.lock().is_empty()
    }
}
