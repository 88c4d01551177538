// bounded multi-writer FIFO with non-blocking operations only.

use crate::error::QueueFullError;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// Fixed-capacity FIFO queue shared between many writers and one draining
/// reader.
///
/// Every operation is a non-blocking attempt that takes the internal lock for
/// the duration of the operation only, so pushes and pops are linearizable.
/// Handles are cheap clones of the same underlying queue.
///
/// Capacity is a hard bound: a push onto a full queue is rejected with
/// [`QueueFullError`] carrying the element back, never blocked and never
/// dropped.
pub struct BoundedQueue<T>(Arc<Shared<T>>);

struct Shared<T> {
    capacity: usize,
    elems: Mutex<VecDeque<T>>,
}

impl<T> Clone for BoundedQueue<T> {
    fn clone(&self) -> Self {
        BoundedQueue(Arc::clone(&self.0))
    }
}

impl<T> BoundedQueue<T> {
    /// Construct an empty queue with the given capacity.
    pub fn bounded(capacity: usize) -> Self {
        BoundedQueue(Arc::new(Shared {
            capacity,
            elems: Mutex::new(VecDeque::with_capacity(capacity)),
        }))
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.0.capacity
    }

    /// Current number of queued elements.
    pub fn len(&self) -> usize {
        self.0.elems.lock().unwrap().len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to append an element at the tail without blocking.
    pub fn try_push(&self, elem: T) -> Result<(), QueueFullError<T>> {
        let mut elems = self.0.elems.lock().unwrap();
        if elems.len() >= self.0.capacity {
            return Err(QueueFullError { rejected: elem });
        }
        elems.push_back(elem);
        Ok(())
    }

    /// Attempt to take the head element without blocking.
    pub fn try_pop(&self) -> Option<T> {
        self.0.elems.lock().unwrap().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_is_preserved() {
        let queue = BoundedQueue::bounded(4);
        for i in 0..4 {
            queue.try_push(i).unwrap();
        }
        for i in 0..4 {
            assert_eq!(queue.try_pop(), Some(i));
        }
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn push_at_capacity_rejects_and_returns_the_element() {
        let queue = BoundedQueue::bounded(2);
        queue.try_push('a').unwrap();
        queue.try_push('b').unwrap();
        let err = queue.try_push('c').unwrap_err();
        assert_eq!(err.rejected, 'c');
        assert_eq!(queue.len(), 2);
        // popping frees space for the held element
        assert_eq!(queue.try_pop(), Some('a'));
        queue.try_push('c').unwrap();
        assert_eq!(queue.try_pop(), Some('b'));
        assert_eq!(queue.try_pop(), Some('c'));
    }

    #[test]
    fn clones_share_the_same_queue() {
        let queue = BoundedQueue::bounded(2);
        let writer = queue.clone();
        writer.try_push(1).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_pop(), Some(1));
        assert!(writer.is_empty());
    }
}
