use std::collections::{vec_deque, VecDeque};

use shared::domain::QueryRecord;

/// Newest-first transcript of completed interactions for one view.
///
/// Append-only at the front; records are never edited, removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct ResultHistoryStore {
    records: VecDeque<QueryRecord>,
}

impl ResultHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, record: QueryRecord) {
        self.records.push_front(record);
    }

    pub fn all(&self) -> vec_deque::Iter<'_, QueryRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&QueryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
