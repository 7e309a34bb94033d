//! Last-in-first-out container backing a queue's pending jobs.

/// Vector-backed LIFO stack.
///
/// The top of the stack is the end of the vector, so `push` and `pop` are
/// O(1) amortized. The stack carries no synchronization of its own; owners
/// wrap it in a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Place an item on top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top item, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrow the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Contents in storage order, oldest-inserted first.
    ///
    /// For enumeration only; release order is the reverse of this slice.
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
