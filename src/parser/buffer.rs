/// Bounded receive accumulator shared by the sensor drivers.
///
/// Newly read bytes are appended at the tail, the demultiplexer looks at
/// `as_slice()`, and every consumed frame (valid or rejected) is removed
/// from the front with `consume()`, which compacts the remainder to
/// offset 0. The fill level never exceeds the configured capacity;
/// `append` reports how many bytes actually fit so the owner can detect
/// overflow and apply its reset policy.
pub struct RecvBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl RecvBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends at most `remaining()` bytes, returning the number copied.
    pub fn append(&mut self, data: &[u8]) -> usize {
        let to_copy = core::cmp::min(data.len(), self.capacity - self.buf.len());
        self.buf.extend_from_slice(&data[..to_copy]);
        to_copy
    }

    /// Removes the first `count` bytes and moves the rest to the front.
    pub fn consume(&mut self, count: usize) {
        if count >= self.buf.len() {
            self.buf.clear();
        } else {
            self.buf.drain(0..count);
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn append_within_capacity() {
        let mut buf = RecvBuffer::new(16);
        assert_eq!(buf.append(&[1, 2, 3, 4, 5, 6, 7]), 7);
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn append_refuses_overflow() {
        let mut buf = RecvBuffer::new(16);
        assert_eq!(buf.append(&[1, 2, 3, 4, 5, 6, 7]), 7);
        assert_eq!(buf.append(&[1, 2, 3, 4, 5, 6, 7]), 7);
        assert_eq!(buf.append(&[1, 2, 3, 4, 5, 6, 7]), 2);
        assert_eq!(buf.len(), 16);
        assert!(buf.is_full());
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn consume_compacts_to_front() {
        let mut buf = RecvBuffer::new(16);
        buf.append(&[1, 2, 3, 4, 5, 6, 7]);

        buf.consume(3);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_slice(), &[4, 5, 6, 7]);

        buf.append(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.as_slice(), &[4, 5, 6, 7, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn consume_all() {
        let mut buf = RecvBuffer::new(16);
        buf.append(&[1, 2, 3, 4, 5, 6, 7]);

        buf.consume(7);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn consume_past_end_clears() {
        let mut buf = RecvBuffer::new(16);
        buf.append(&[1, 2, 3]);

        buf.consume(10);
        assert!(buf.is_empty());
    }
}
