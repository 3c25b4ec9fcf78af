use crate::types::ToastId;

use super::options::ToastRecord;

/// Ordered set of visible toasts, bounded by `max_visible`.
///
/// Order is insertion order of distinct ids; replacing an id keeps its slot.
#[derive(Debug)]
pub struct NotificationStore {
    max_visible: usize,
    records: Vec<ToastRecord>,
}

impl NotificationStore {
    #[must_use]
    pub fn new(max_visible: usize) -> Self {
        let max_visible = max_visible.max(1);
        Self {
            max_visible,
            records: Vec::with_capacity(max_visible + 1),
        }
    }

    #[must_use]
    pub const fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Insert or replace `record`, returning the ids evicted from the front.
    pub fn upsert(&mut self, record: ToastRecord) -> Vec<ToastId> {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
            return Vec::new();
        }

        self.records.push(record);
        let excess = self.records.len().saturating_sub(self.max_visible);
        self.records.drain(..excess).map(|r| r.id).collect()
    }

    pub fn remove(&mut self, id: &ToastId) -> Option<ToastRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) -> Vec<ToastId> {
        self.records.drain(..).map(|r| r.id).collect()
    }

    #[must_use]
    pub fn list(&self) -> &[ToastRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&ToastRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
