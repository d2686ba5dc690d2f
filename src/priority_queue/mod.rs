use crate::error::{HzipError, Result};

/// Anything ordered by a numeric weight in a [`MinPriorityQueue`].
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// Array-backed binary min-heap keyed by weight.
///
/// Heap arithmetic uses 1-based positions (`parent(i) = i / 2`) over a
/// 0-based vector. Comparisons are strict, so equal weights are never
/// swapped and the extraction order only depends on the insertion order.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<T> {
    elements: Vec<T>,
}

impl<T> Default for MinPriorityQueue<T> {
    fn default() -> Self {
        Self { elements: Vec::new() }
    }
}

impl<T: Weighted> MinPriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    #[inline(always)]
    fn parent(i: usize) -> usize {
        i / 2
    }

    #[inline(always)]
    fn left(i: usize) -> usize {
        2 * i
    }

    #[inline(always)]
    fn right(i: usize) -> usize {
        2 * i + 1
    }

    #[inline(always)]
    fn weight_at(&self, pos: usize) -> u64 {
        self.elements[pos - 1].weight()
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a - 1, b - 1);
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);

        let mut i = self.elements.len();
        while i > 1 {
            let p = Self::parent(i);
            if self.weight_at(i) >= self.weight_at(p) {
                break;
            }
            self.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(HzipError::EmptyQueue);
        }

        let min = self.elements.swap_remove(0);
        self.sift_down(1);

        Ok(min)
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();

        loop {
            let l = Self::left(i);
            let r = Self::right(i);

            if l > n {
                return;
            }

            let smallest = if r <= n && self.weight_at(r) < self.weight_at(l) { r } else { l };

            if self.weight_at(i) <= self.weight_at(smallest) {
                return;
            }

            self.swap(i, smallest);
            i = smallest;
        }
    }

    /// Checks the heap property on every parent/child pair.
    pub fn is_valid(&self) -> bool {
        (2..=self.elements.len()).all(|i| self.weight_at(Self::parent(i)) <= self.weight_at(i))
    }
}

impl<T: Weighted> FromIterator<T> for MinPriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for item in iter {
            queue.insert(item);
        }
        queue
    }
}
