//! Fixed-capacity byte FIFO over caller-owned storage
//!
//! [`Fifo`] is the bare data structure: a circular buffer with an explicit
//! occupancy counter and no synchronization of its own. It never allocates;
//! storage is supplied by the caller, either inline (`[u8; N]`) or borrowed
//! (`&mut [u8]`). Capacity must be a power of two so that index wrap-around
//! reduces to a bitwise AND.
//!
//! For an instance shared between an interrupt handler and a foreground task,
//! wrap it in a [`Channel`](crate::channel::Channel), which brackets every
//! mutating operation in a critical section.

/// Error returned by [`Fifo::try_push`] when the queue is at capacity.
///
/// The full queue is left unchanged: the queue rejects new bytes rather than
/// overwriting the oldest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Full;

/// Fixed-capacity circular byte queue.
///
/// `head` tracks the last written slot and `tail` the last read slot; both
/// advance before the access. The explicit counter is the authoritative
/// occupancy signal, so index equality is never used to distinguish empty
/// from full and all `N` slots are usable.
///
/// Both `try_push` and `try_pop` are non-blocking and O(1). Any waiting is
/// the caller's responsibility.
pub struct Fifo<S> {
    storage: S,
    mask: usize,
    head: usize,
    tail: usize,
    count: usize,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Fifo<S> {
    /// Creates a queue over the given storage.
    ///
    /// # Panics
    ///
    /// Panics if the storage length is zero or not a power of two. A wrong
    /// mask silently corrupts indexing, so the constraint is enforced
    /// unconditionally. Use [`Fifo::new_inline`] to move the check to
    /// compile time.
    pub fn new(storage: S) -> Self {
        let capacity = storage.as_ref().len();
        assert!(capacity.is_power_of_two());

        Self {
            storage,
            mask: capacity - 1,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Number of occupied slots.
    ///
    /// Advisory when the queue is shared: the value may be stale by the time
    /// the caller acts on it. It is a snapshot, not a reservation.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Appends a byte.
    ///
    /// Returns [`Full`] without mutating the queue if all slots are occupied.
    pub fn try_push(&mut self, byte: u8) -> Result<(), Full> {
        if self.is_full() {
            return Err(Full);
        }

        self.head = (self.head + 1) & self.mask;
        self.storage.as_mut()[self.head] = byte;
        self.count += 1;
        Ok(())
    }

    /// Removes the oldest byte, or `None` if the queue is empty.
    pub fn try_pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        self.tail = (self.tail + 1) & self.mask;
        let byte = self.storage.as_ref()[self.tail];
        self.count -= 1;
        Some(byte)
    }

    /// Discards all queued bytes.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}

impl<const N: usize> Fifo<[u8; N]> {
    /// Creates a queue with inline zeroed storage.
    ///
    /// The power-of-two capacity constraint is checked at compile time, so
    /// this constructor cannot fail and is usable in `static` initializers.
    pub const fn new_inline() -> Self {
        const { core::assert!(N.is_power_of_two()) }

        Self {
            storage: [0; N],
            mask: N - 1,
            head: 0,
            tail: 0,
            count: 0,
        }
    }
}

impl<const N: usize> Default for Fifo<[u8; N]> {
    fn default() -> Self {
        Self::new_inline()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use heapless::Vec;

    fn drain<S: AsRef<[u8]> + AsMut<[u8]>>(fifo: &mut Fifo<S>) -> Vec<u8, 32> {
        let mut out = Vec::new();
        while let Some(byte) = fifo.try_pop() {
            out.push(byte).unwrap();
        }
        out
    }

    #[test]
    fn test_push_pop() {
        let mut fifo = Fifo::<[u8; 8]>::new_inline();
        assert!(fifo.is_empty());
        assert_eq!(fifo.capacity(), 8);

        fifo.try_push(42).unwrap();
        assert_eq!(fifo.len(), 1);

        assert_eq!(fifo.try_pop(), Some(42));
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut fifo = Fifo::<[u8; 8]>::new_inline();
        for byte in [11, 22, 33] {
            fifo.try_push(byte).unwrap();
        }
        assert_eq!(drain(&mut fifo).as_slice(), &[11, 22, 33]);
    }

    #[test]
    fn test_full_rejects_without_mutation() {
        let mut fifo = Fifo::<[u8; 4]>::new_inline();
        for byte in 0..4 {
            fifo.try_push(byte).unwrap();
        }

        assert_eq!(fifo.try_push(99), Err(Full));
        assert_eq!(fifo.len(), 4);
        assert!(fifo.is_full());

        // The rejected byte must not have displaced anything.
        assert_eq!(drain(&mut fifo).as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_rejects() {
        let mut fifo = Fifo::<[u8; 4]>::new_inline();
        assert_eq!(fifo.try_pop(), None);
        assert_eq!(fifo.len(), 0);

        fifo.try_push(7).unwrap();
        fifo.try_pop().unwrap();
        assert_eq!(fifo.try_pop(), None);
    }

    #[test]
    fn test_capacity_boundary() {
        let mut fifo = Fifo::<[u8; 4]>::new_inline();
        for byte in 0..4 {
            assert_eq!(fifo.try_push(byte), Ok(()));
        }
        assert_eq!(fifo.try_push(4), Err(Full));

        assert_eq!(fifo.try_pop(), Some(0));
        assert_eq!(fifo.try_push(4), Ok(()));
        assert_eq!(fifo.len(), 4);
    }

    #[test]
    fn test_wraparound() {
        let mut fifo = Fifo::<[u8; 4]>::new_inline();
        // Fill and drain repeatedly so head and tail roll over the end of
        // the buffer several times.
        for round in 0..3u8 {
            for i in 0..4 {
                fifo.try_push(round * 10 + i).unwrap();
            }
            for i in 0..4 {
                assert_eq!(fifo.try_pop(), Some(round * 10 + i));
            }
        }
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_occupancy_accounting() {
        let mut fifo = Fifo::<[u8; 8]>::new_inline();
        let mut pushed = 0usize;
        let mut popped = 0usize;

        // Scripted interleave of bursts, rejections included.
        for (push_count, pop_count) in [(3u8, 1), (6, 4), (8, 2), (0, 10), (5, 5)] {
            for byte in 0..push_count {
                if fifo.try_push(byte).is_ok() {
                    pushed += 1;
                }
            }
            for _ in 0..pop_count {
                if fifo.try_pop().is_some() {
                    popped += 1;
                }
            }
            assert_eq!(fifo.len(), pushed - popped);
            assert!(fifo.len() <= fifo.capacity());
        }
    }

    #[test]
    fn test_example_scenario() {
        let mut fifo = Fifo::<[u8; 8]>::new_inline();

        for byte in 0..8 {
            fifo.try_push(byte).unwrap();
        }
        assert_eq!(fifo.try_push(100), Err(Full));
        assert_eq!(fifo.len(), 8);

        assert_eq!(fifo.try_pop(), Some(0));
        assert_eq!(fifo.len(), 7);

        fifo.try_push(100).unwrap();
        assert_eq!(fifo.len(), 8);

        assert_eq!(
            drain(&mut fifo).as_slice(),
            &[1, 2, 3, 4, 5, 6, 7, 100]
        );
        assert_eq!(fifo.len(), 0);
    }

    #[test]
    fn test_borrowed_storage() {
        let mut storage = [0u8; 16];
        let mut fifo = Fifo::new(&mut storage[..]);
        assert_eq!(fifo.capacity(), 16);

        fifo.try_push(5).unwrap();
        fifo.try_push(6).unwrap();
        assert_eq!(fifo.try_pop(), Some(5));
        assert_eq!(fifo.try_pop(), Some(6));
    }

    #[test]
    fn test_clear() {
        let mut fifo = Fifo::<[u8; 8]>::new_inline();
        fifo.try_push(1).unwrap();
        fifo.try_push(2).unwrap();

        fifo.clear();
        assert!(fifo.is_empty());
        assert_eq!(fifo.try_pop(), None);

        // Still usable after a reset.
        fifo.try_push(3).unwrap();
        assert_eq!(fifo.try_pop(), Some(3));
    }

    #[test]
    #[should_panic]
    fn test_non_power_of_two_capacity() {
        let mut storage = [0u8; 6];
        let _ = Fifo::new(&mut storage[..]);
    }
}
