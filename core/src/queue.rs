/// Fixed-capacity FIFO of vertex ids used as a BFS frontier.
///
/// Capacity is the vertex count of the graph being traversed. A traversal
/// enqueues each vertex at most once, so overflowing the ring means the
/// caller pushed a vertex twice; that is a bug and panics.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    buf: Box<[usize]>,
    front: usize,
    len: usize,
}

impl BoundedQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            front: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// # Panics
    ///
    /// If the queue already holds `capacity` items.
    pub fn push(&mut self, vertex: usize) {
        assert!(
            !self.is_full(),
            "BoundedQueue overflow: capacity {} exceeded",
            self.buf.len()
        );
        let slot = (self.front + self.len) % self.buf.len();
        self.buf[slot] = vertex;
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let vertex = self.buf[self.front];
        self.front = (self.front + 1) % self.buf.len();
        self.len -= 1;
        Some(vertex)
    }

    pub fn front(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.buf[self.front])
    }

    pub fn clear(&mut self) {
        self.front = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = BoundedQueue::new(3);
        q.push(7);
        q.push(1);
        assert_eq!(q.front(), Some(7));
        assert_eq!(q.pop(), Some(7));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_wraps_around() {
        let mut q = BoundedQueue::new(3);
        for round in 0..5 {
            q.push(round);
            q.push(round + 10);
            assert_eq!(q.pop(), Some(round));
            assert_eq!(q.pop(), Some(round + 10));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut q = BoundedQueue::new(4);
        for v in 0..4 {
            q.push(v);
        }
        assert!(q.is_full());
        assert_eq!(q.len(), 4);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.front(), None);
        assert_eq!(q.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "BoundedQueue overflow")]
    fn test_overflow_panics() {
        let mut q = BoundedQueue::new(2);
        q.push(0);
        q.push(1);
        q.push(0);
    }

    #[test]
    #[should_panic(expected = "BoundedQueue overflow")]
    fn test_zero_capacity_push_panics() {
        let mut q = BoundedQueue::new(0);
        q.push(0);
    }
}
