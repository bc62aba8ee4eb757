/*! IGT identifier assignment.

Identifiers are `igt<doc_id>-<n>`, `n` counting the instances of a document in
the order they are given, starting from a configurable first index.
Ids are assigned once, before any splitting, so that every later partition of
the same records sees the same identifiers.
!*/
use std::collections::HashMap;

use crate::igt::Igt;

/// Identifier of the `n`-th instance of document `doc_id`.
pub fn igt_id(doc_id: &str, n: usize) -> String {
    format!("igt{}-{}", doc_id, n)
}

/// Sequential, per-document id assignment.
pub struct IdAssigner {
    first_id: usize,
    next: HashMap<String, usize>,
}

impl Default for IdAssigner {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdAssigner {
    pub fn new(first_id: usize) -> Self {
        Self {
            first_id,
            next: HashMap::new(),
        }
    }

    /// Give `igt` the next identifier of its document, replacing any existing one.
    pub fn assign(&mut self, igt: &mut Igt) {
        let n = self
            .next
            .entry(igt.doc_id().to_string())
            .or_insert(self.first_id);
        igt.set_igt_id(igt_id(igt.doc_id(), *n));
        *n += 1;
    }
}

/// Assign ids to `records`, in order.
pub fn assign_ids(records: &mut [Igt], first_id: usize) {
    let mut assigner = IdAssigner::new(first_id);
    for igt in records.iter_mut() {
        assigner.assign(igt);
    }
}

/// Sort key of an identifier: `igt12-3` gives `(12, 3)`. Anything else gives `(0, 0)`.
pub fn sort_key(igt_id: &str) -> (u64, u64) {
    igt_id
        .strip_prefix("igt")
        .and_then(|rest| rest.rsplit_once('-'))
        .and_then(|(doc, n)| Some((doc.parse().ok()?, n.parse().ok()?)))
        .unwrap_or((0, 0))
}
