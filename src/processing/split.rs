/*! Record splitting

Stable partitioning of records by a key (document id, language code).

Keys are extracted from the records only, so splitting the same id-assigned
records twice, by two different keys, gives the same identifiers in both outputs.
!*/
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;
use crate::igt::Igt;

use super::ids::sort_key;

/// Key used for records missing the split key when ingesting.
pub const UNGROUPED: &str = "_ungrouped_";
/// Key used for records missing the group key when grouping.
pub const MISSING: &str = "---";

/// Record fields usable as split keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKey {
    DocId,
    Language,
}

impl SplitKey {
    /// Value of the key for `igt`, if any.
    ///
    /// The undetermined language counts as a language code.
    pub fn value<'a>(&self, igt: &'a Igt) -> Option<&'a str> {
        match self {
            SplitKey::DocId => Some(igt.doc_id()).filter(|id| !id.is_empty()),
            SplitKey::Language => igt.language().map(|l| l.code()),
        }
    }

    /// Value of the key for `igt`, or `default` if it is missing.
    pub fn value_or<'a>(&self, igt: &'a Igt, default: &'a str) -> &'a str {
        self.value(igt).unwrap_or(default)
    }
}

impl FromStr for SplitKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc_id" | "doc-id" => Ok(SplitKey::DocId),
            "iso-639-3" | "lang" | "language" => Ok(SplitKey::Language),
            other => Err(Error::Custom(format!("unknown split key: {}", other))),
        }
    }
}

/// Partition `records` by `key_fn`, keeping the relative order of each group's records.
pub fn split_by<I, F>(records: I, key_fn: F) -> BTreeMap<String, Vec<Igt>>
where
    I: IntoIterator<Item = Igt>,
    F: Fn(&Igt) -> String,
{
    let mut groups: BTreeMap<String, Vec<Igt>> = BTreeMap::new();
    for igt in records {
        groups.entry(key_fn(&igt)).or_default().push(igt);
    }
    groups
}

/// Sort key of a record inside a group: numeric doc id, then numeric instance index.
///
/// Ids that cannot be read as numbers sort first.
pub fn group_order(igt: &Igt) -> (u64, u64) {
    let doc_id = igt.doc_id().parse().unwrap_or(0);
    let index = igt.igt_id().map_or(0, |id| sort_key(id).1);
    (doc_id, index)
}

/// Sort each group by [group_order]. The sort is stable.
pub fn sort_groups(groups: &mut BTreeMap<String, Vec<Igt>>) {
    for records in groups.values_mut() {
        records.sort_by_key(group_order);
    }
}
