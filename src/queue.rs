//! A growable FIFO queue, the collaborator behind level-order traversal.
//!
//! Implemented as a ring buffer over `Vec<Option<T>>`: `head` marks the next
//! slot to dequeue and slots wrap around the end of the buffer. When the
//! buffer fills up it doubles, re-laying the live elements out from index
//! zero. The tree only relies on FIFO ordering, not on any particular
//! capacity policy.

const DEFAULT_CAPACITY: usize = 16;

/// A first-in, first-out queue.
///
/// # Examples
///
/// ```
/// use bstree::queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue('a');
/// queue.enqueue('b');
///
/// assert_eq!(queue.dequeue(), Some('a'));
/// assert_eq!(queue.dequeue(), Some('b'));
/// assert_eq!(queue.dequeue(), None);
/// ```
pub struct Queue<T> {
    items: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Generates an empty queue with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Generates an empty queue with room for `capacity` elements before the
    /// first grow. A capacity of zero is rounded up to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    /// The number of queued elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element at the back of the queue.
    pub fn enqueue(&mut self, item: T) {
        if self.len == self.items.len() {
            self.grow();
        }
        let tail = (self.head + self.len) % self.items.len();
        self.items[tail] = Some(item);
        self.len += 1;
    }

    /// Removes and returns the element at the front of the queue, or `None`
    /// if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.items[self.head].take();
        self.head = (self.head + 1) % self.items.len();
        self.len -= 1;
        item
    }

    fn grow(&mut self) {
        let old_capacity = self.items.len();
        let mut items: Vec<Option<T>> = (0..old_capacity * 2).map(|_| None).collect();
        for (i, slot) in items.iter_mut().enumerate().take(self.len) {
            *slot = self.items[(self.head + i) % old_capacity].take();
        }
        self.items = items;
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new();
        for i in 0..5 {
            queue.enqueue(i);
        }
        for i in 0..5 {
            assert_eq!(queue.dequeue(), Some(i));
        }
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());

        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.len(), 2);
        assert!(!queue.is_empty());

        queue.dequeue();
        queue.dequeue();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wraps_around_the_buffer() {
        let mut queue = Queue::with_capacity(2);
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.dequeue(), Some(1));

        // The tail slot wraps to index zero without growing.
        queue.enqueue(3);
        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut queue = Queue::with_capacity(2);
        // Offset head so the grow has to un-wrap the live elements.
        queue.enqueue(0);
        queue.dequeue();

        for i in 0..50 {
            queue.enqueue(i);
        }
        assert_eq!(queue.len(), 50);
        for i in 0..50 {
            assert_eq!(queue.dequeue(), Some(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        let mut queue = Queue::with_capacity(0);
        queue.enqueue('x');
        assert_eq!(queue.dequeue(), Some('x'));
    }
}
