use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory registry of deployed functions plus the invocation counter.
///
/// Nothing is persisted; functions live for the lifetime of the process.
/// The counter is an atomic because it is shared by every connection task.
pub struct Registry {
    functions: RwLock<HashMap<String, Arc<str>>>,
    invocations: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            functions: RwLock::new(HashMap::new()),
            invocations: AtomicU64::new(0),
        }
    }

    /// Stores `source` under `name`. Redeploys under the same name
    /// overwrite (last write wins).
    pub fn deploy(&self, name: impl Into<String>, source: impl Into<Arc<str>>) {
        self.functions
            .write()
            .unwrap()
            .insert(name.into(), source.into());
    }

    /// Looks up the source of a deployed function.
    pub fn get(&self, name: &str) -> Option<Arc<str>> {
        self.functions.read().unwrap().get(name).cloned()
    }

    /// Number of deployed functions.
    pub fn len(&self) -> usize {
        self.functions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts one invocation and returns the new total.
    pub fn record_invocation(&self) -> u64 {
        self.invocations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Total invocations recorded so far.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
