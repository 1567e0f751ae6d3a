//! Cursor marks, the packrat memo table and session counters

use serde::Serialize;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Index into the token buffer. "Further" means strictly greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Mark(usize);

impl Mark {
    pub const START: Mark = Mark(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Identity of a memoized rule; by convention the rule's grammar name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RuleId(&'static str);

impl RuleId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub type MemoKey = (RuleId, Mark);

/// Cached outcome of one rule at one position
#[derive(Debug)]
pub enum MemoEntry {
    /// The value is type-erased; the rule that stored it knows its type
    Success { value: Box<dyn Any>, end: Mark },
    Failure,
}

/// One entry per (rule, position) for the lifetime of a parse session
#[derive(Debug, Default)]
pub struct MemoStore {
    entries: HashMap<MemoKey, MemoEntry>,
}

impl MemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MemoKey) -> Option<&MemoEntry> {
        self.entries.get(key)
    }

    /// Stores `entry`, replacing whatever was cached under `key`
    pub fn insert(&mut self, key: MemoKey, entry: MemoEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters collected over one parse session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParserProfile {
    pub memo_hits: u64,
    pub memo_misses: u64,
    /// Resets that moved the cursor backwards
    pub backtracks: u64,
    /// Accepted growth iterations of left-recursive rules
    pub left_recursion_iterations: u64,
    /// How many times each memoized rule body actually ran
    pub invocations: BTreeMap<&'static str, u64>,
}

impl ParserProfile {
    pub fn invocations_of(&self, rule: RuleId) -> u64 {
        self.invocations.get(rule.name()).copied().unwrap_or(0)
    }

    pub(crate) fn record_invocation(&mut self, rule: RuleId) {
        *self.invocations.entry(rule.name()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_order_by_position() {
        assert!(Mark::new(3) > Mark::new(2));
        assert_eq!(Mark::START, Mark::new(0));
        assert_eq!(Mark::new(4).to_string(), "@4");
    }

    #[test]
    fn test_store_keeps_one_entry_per_key() {
        let rule = RuleId::new("rule");
        let mut store = MemoStore::new();
        assert!(store.is_empty());
        store.insert((rule, Mark::START), MemoEntry::Failure);
        store.insert(
            (rule, Mark::START),
            MemoEntry::Success {
                value: Box::new(7u8),
                end: Mark::new(1),
            },
        );

        assert_eq!(store.len(), 1);
        match store.get(&(rule, Mark::START)) {
            Some(MemoEntry::Success { value, end }) => {
                assert_eq!(value.downcast_ref::<u8>(), Some(&7));
                assert_eq!(*end, Mark::new(1));
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn test_invocation_counts() {
        let mut profile = ParserProfile::default();
        let rule = RuleId::new("rule");
        profile.record_invocation(rule);
        profile.record_invocation(rule);

        assert_eq!(profile.invocations_of(rule), 2);
        assert_eq!(profile.invocations_of(RuleId::new("other")), 0);
    }
}
