//! Slot storage for candidate paths and their records.

use fnv::FnvHashMap;

use crate::record::MatchRecord;

/// Candidates in first-seen order plus a path -> slot index.
///
/// Slots never move while the store lives, so a slot number is a stable handle
/// for the duration of a scoring round and doubles as the first-seen rank.
#[derive(Debug, Default)]
pub struct CandidateStore {
    paths: Vec<Box<str>>,
    records: Vec<MatchRecord>,
    slots: FnvHashMap<Box<str>, usize>,
}

impl CandidateStore {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::default();
        store.extend(paths);
        store
    }

    /// Adds unseen paths with fresh records. Returns how many were new.
    pub fn extend<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.paths.len();
        for path in paths {
            let path = path.as_ref();
            if self.slots.contains_key(path) {
                continue;
            }
            let slot = self.paths.len();
            let boxed: Box<str> = path.into();
            self.slots.insert(boxed.clone(), slot);
            self.paths.push(boxed);
            self.records.push(MatchRecord::default());
        }
        self.paths.len() - before
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn slot(&self, path: &str) -> Option<usize> {
        self.slots.get(path).copied()
    }

    #[inline]
    pub fn path(&self, slot: usize) -> &str {
        &self.paths[slot]
    }

    #[inline]
    pub fn record(&self, slot: usize) -> &MatchRecord {
        &self.records[slot]
    }

    #[inline]
    pub fn record_mut(&mut self, slot: usize) -> &mut MatchRecord {
        &mut self.records[slot]
    }

    pub fn get(&self, path: &str) -> Option<&MatchRecord> {
        self.slot(path).map(|slot| &self.records[slot])
    }

    /// Iterates `(slot, path, record)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &MatchRecord)> + '_ {
        self.paths
            .iter()
            .zip(self.records.iter())
            .enumerate()
            .map(|(slot, (path, record))| (slot, &**path, record))
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut MatchRecord> + '_ {
        self.records.iter_mut()
    }

    /// Splits into read-only paths and mutable records.
    pub fn paths_and_records_mut(&mut self) -> (&[Box<str>], &mut [MatchRecord]) {
        (&self.paths, &mut self.records)
    }
}
