//! # Slot Pool
//!
//! Growable slot table with a free list. Freed indices are reused before the
//! table grows, so long-running hosts stay compact.

/// A slot table for payloads that are allocated and freed individually.
///
/// # Thread Safety
///
/// Not thread-safe. [`HostHeap`](crate::HostHeap) keeps it behind a mutex.
pub(crate) struct SlotPool<T> {
    /// The storage array.
    storage: Vec<Option<T>>,
    /// Free list - indices of vacated slots.
    free_list: Vec<usize>,
    /// Number of occupied slots.
    allocated_count: usize,
}

impl<T> SlotPool<T> {
    pub(crate) fn new() -> Self {
        Self { storage: Vec::new(), free_list: Vec::new(), allocated_count: 0 }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) const fn allocated_count(&self) -> usize {
        self.allocated_count
    }

    /// Stores `value`, reusing a vacated slot when one exists.
    pub(crate) fn allocate(&mut self, value: T) -> usize {
        self.allocated_count += 1;
        if let Some(index) = self.free_list.pop() {
            self.storage[index] = Some(value);
            index
        } else {
            self.storage.push(Some(value));
            self.storage.len() - 1
        }
    }

    /// Vacates a slot. Returns `None` if it was not occupied.
    pub(crate) fn free(&mut self, index: usize) -> Option<T> {
        let value = self.storage.get_mut(index)?.take()?;
        self.free_list.push(index);
        self.allocated_count -= 1;
        Some(value)
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.storage.get(index)?.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.storage.get_mut(index)?.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_allocate_free() {
        let mut pool: SlotPool<u32> = SlotPool::new();

        let a = pool.allocate(42);
        let b = pool.allocate(7);
        assert_eq!(pool.get(a), Some(&42));
        assert_eq!(pool.allocated_count(), 2);

        assert_eq!(pool.free(a), Some(42));
        assert_eq!(pool.free(a), None);
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.allocated_count(), 1);

        *pool.get_mut(b).unwrap() += 1;
        assert_eq!(pool.get(b), Some(&8));
    }

    #[test]
    fn test_slot_reuse() {
        let mut pool: SlotPool<&str> = SlotPool::new();
        let first = pool.allocate("a");
        pool.allocate("b");
        pool.free(first);
        assert_eq!(pool.allocate("c"), first);
        assert_eq!(pool.free(99), None);
    }
}
