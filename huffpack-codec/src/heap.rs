//! Array-backed binary max-heap.
//!
//! The heap always hands out the item that compares greatest under `Ord`.
//! Tree construction wants the lightest tree first, so its heap entries
//! invert their comparison: lower weight compares as greater.

/// Binary max-heap stored in a `Vec`.
///
/// The children of index `i` live at `2i + 1` and `2i + 2`. Insertion sifts
/// the new item up while it is greater than its parent; extraction moves the
/// last item to the root and sifts it down, always swapping with the greater
/// child. For a fixed sequence of operations the resulting order is fully
/// deterministic.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    elements: Vec<T>,
}

impl<T> PriorityQueue<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Create an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Number of items in the heap.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The item that the next `extract_top` will return.
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Insert an item.
    pub fn insert(&mut self, item: T) {
        self.elements.push(item);
        self.sift_up(self.elements.len() - 1);
    }

    /// Remove and return the greatest item, `None` when empty.
    pub fn extract_top(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }

        let top = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.elements[index] > self.elements[parent] {
                self.elements.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let mut greater = left;
            if right < len && self.elements[right] > self.elements[left] {
                greater = right;
            }

            if self.elements[greater] > self.elements[index] {
                self.elements.swap(index, greater);
                index = greater;
            } else {
                break;
            }
        }
    }

    /// Check the heap property over every parent/child pair.
    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.elements.len()).all(|i| self.elements[(i - 1) / 2] >= self.elements[i])
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for item in iter {
            heap.insert(item);
        }
        heap
    }
}
