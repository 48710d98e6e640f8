//! Hot reload of the visitor set.
//!
//! # Responsibilities
//! - Work out which visitors a new configuration adds, removes or changes
//! - Publish the new visitor set atomically to readers
//!
//! # Design Decisions
//! - "Changed" is decided by `VisitorConf::compare`, not textual equality
//! - Unchanged visitors keep their existing `Arc`, so running tunnels see
//!   the exact object they started with
//! - Readers never block: the set is swapped with `ArcSwap`

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::VisitorSet;

/// Names of visitors affected by a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorChanges {
    /// Present only in the new set.
    pub added: Vec<String>,
    /// Present only in the old set.
    pub removed: Vec<String>,
    /// Present in both, but `compare` says the effective config differs.
    pub changed: Vec<String>,
}

impl VisitorChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Diff two visitor sets.
pub fn diff_visitors(old: &VisitorSet, new: &VisitorSet) -> VisitorChanges {
    let mut changes = VisitorChanges::default();

    for (name, old_conf) in old {
        match new.get(name) {
            None => changes.removed.push(name.clone()),
            Some(new_conf) if !old_conf.compare(new_conf.as_ref()) => {
                changes.changed.push(name.clone())
            }
            Some(_) => {}
        }
    }

    changes.added = new
        .keys()
        .filter(|name| !old.contains_key(*name))
        .cloned()
        .collect();

    changes
}

/// The live visitor set, replaced wholesale on reload.
#[derive(Debug)]
pub struct VisitorStore {
    current: ArcSwap<VisitorSet>,
}

impl VisitorStore {
    pub fn new(visitors: VisitorSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(visitors),
        }
    }

    /// Snapshot of the current visitor set.
    pub fn load(&self) -> Arc<VisitorSet> {
        self.current.load_full()
    }

    /// Replace the visitor set and report what changed.
    pub fn reload(&self, new: VisitorSet) -> VisitorChanges {
        let old = self.current.load_full();
        let changes = diff_visitors(&old, &new);

        // Keep the old object for visitors that didn't change.
        let merged: VisitorSet = new
            .into_iter()
            .map(|(name, conf)| match old.get(&name) {
                Some(existing) if existing.compare(conf.as_ref()) => (name, Arc::clone(existing)),
                _ => (name, conf),
            })
            .collect();

        self.current.store(Arc::new(merged));

        for name in &changes.added {
            tracing::info!(visitor = %name, "Visitor added");
        }
        for name in &changes.removed {
            tracing::info!(visitor = %name, "Visitor removed");
        }
        for name in &changes.changed {
            tracing::info!(visitor = %name, "Visitor changed, tunnel will be rebuilt");
        }
        if changes.is_empty() {
            tracing::debug!("Reload left visitors unchanged");
        }

        changes
    }
}

impl Default for VisitorStore {
    fn default() -> Self {
        Self::new(VisitorSet::new())
    }
}
