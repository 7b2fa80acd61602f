//! Copy-on-write branches of a [`Storage`].
//!
//! A branch reads through to its parent and keeps every write in memory. The
//! writes reach the parent only through [`PendingWrites::commit`], so work
//! done on a branch can be dropped as a whole when it fails.

use std::collections::BTreeMap;

use cosmwasm_std::{Order, Record, Storage};

pub struct BranchStorage<'a> {
    parent: &'a dyn Storage,
    // `None` marks a removal
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> BranchStorage<'a> {
    pub fn new(parent: &'a dyn Storage) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    pub fn into_writes(self) -> PendingWrites {
        PendingWrites {
            writes: self.writes,
        }
    }
}

impl Storage for BranchStorage<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.parent.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self
            .parent
            .range(start, end, Order::Ascending)
            .collect();

        for (key, value) in self.writes.iter() {
            let key_slice = key.as_slice();
            if start.is_some_and(|start| key_slice < start)
                || end.is_some_and(|end| key_slice >= end)
            {
                continue;
            }
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        let records: Vec<Record> = merged.into_iter().collect();
        match order {
            Order::Ascending => Box::new(records.into_iter()),
            Order::Descending => Box::new(records.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }
}

/// Writes collected on a branch, waiting to be applied to the parent.
#[derive(Debug, Default)]
pub struct PendingWrites {
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl PendingWrites {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn commit(self, storage: &mut dyn Storage) {
        for (key, value) in self.writes {
            match value {
                Some(value) => storage.set(&key, &value),
                None => storage.remove(&key),
            }
        }
    }
}

/// Runs `op` on a branch of `storage` and commits its writes only if it
/// returns `Ok`. On `Err` the parent storage is left untouched.
pub fn branch<T, E>(
    storage: &mut dyn Storage,
    op: impl FnOnce(&mut dyn Storage) -> Result<T, E>,
) -> Result<T, E> {
    let (result, writes) = {
        let mut cache = BranchStorage::new(&*storage);
        let result = op(&mut cache);
        (result, cache.into_writes())
    };

    if result.is_ok() {
        writes.commit(storage);
    }
    result
}
