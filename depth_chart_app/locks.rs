use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use depth_chart_types::chart::ChartKey;

/// How mutations of different depth charts are serialised in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPolicy {
    /// Writers of the same chart wait for each other, other charts proceed.
    PerNamespace,
    /// One writer at a time across every chart.
    Global,
}

impl FromStr for LockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "namespace" | "per-namespace" => Ok(LockPolicy::PerNamespace),
            "global" => Ok(LockPolicy::Global),
            other => Err(format!("unknown lock policy '{other}'")),
        }
    }
}

const GLOBAL_SLOT: &str = "*";

/// Table of async mutexes, one per depth chart.
///
/// The returned guard is owned, so it can be held across the whole
/// read-modify-write cycle of a command, transaction included.
pub struct ChartLocks {
    policy: LockPolicy,
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ChartLocks {
    pub fn new(policy: LockPolicy) -> Self {
        Self {
            policy,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: &ChartKey) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            // Drop slots nobody is holding or waiting on.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots.entry(self.slot_name(key)).or_default().clone()
        };
        slot.lock_owned().await
    }

    fn slot_name(&self, key: &ChartKey) -> String {
        match self.policy {
            LockPolicy::PerNamespace => key.to_string(),
            LockPolicy::Global => GLOBAL_SLOT.to_string(),
        }
    }
}
