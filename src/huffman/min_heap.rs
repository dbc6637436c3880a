/// Array-backed binary min-heap keyed by frequency. Equal keys extract in
/// insertion order.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<T> {
    elements: Vec<Entry<T>>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    key: usize,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn precedes(&self, other: &Self) -> bool {
        (self.key, self.seq) < (other.key, other.seq)
    }
}

impl<T> MinPriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    pub fn insert(&mut self, key: usize, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.elements.push(Entry { key, seq, item });

        let mut i = self.elements.len() - 1;
        while i > 0 && self.elements[i].precedes(&self.elements[Self::parent(i)]) {
            self.elements.swap(i, Self::parent(i));
            i = Self::parent(i);
        }
    }

    pub fn extract_min(&mut self) -> Option<(usize, T)> {
        if self.elements.is_empty() {
            return None;
        }

        let entry = self.elements.swap_remove(0);
        self.min_heapify(0);
        Some((entry.key, entry.item))
    }

    pub fn peek_key(&self) -> Option<usize> {
        self.elements.first().map(|entry| entry.key)
    }

    fn min_heapify(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let (l, r) = (Self::left(i), Self::right(i));
            let mut smallest = i;
            if l < n && self.elements[l].precedes(&self.elements[smallest]) {
                smallest = l;
            }
            if r < n && self.elements[r].precedes(&self.elements[smallest]) {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T> Default for MinPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(queue: &mut MinPriorityQueue<T>) -> Vec<T> {
        std::iter::from_fn(|| queue.extract_min().map(|(_, item)| item)).collect()
    }

    #[test]
    fn test_extracts_ascending() {
        let mut queue = MinPriorityQueue::new();
        for (key, item) in [(5, 'e'), (1, 'a'), (4, 'd'), (2, 'b'), (3, 'c'), (0, 'z')] {
            queue.insert(key, item);
        }
        assert_eq!(queue.len(), 6);
        assert_eq!(queue.peek_key(), Some(0));
        assert_eq!(drain(&mut queue), vec!['z', 'a', 'b', 'c', 'd', 'e']);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_by_insertion_order() {
        let mut queue = MinPriorityQueue::new();
        for item in 0..20 {
            queue.insert(item % 3, item);
        }
        let expected = (0..3)
            .flat_map(|key| (0..20).filter(move |item| item % 3 == key))
            .collect::<Vec<_>>();
        assert_eq!(drain(&mut queue), expected);
    }

    #[test]
    fn test_reinsert_goes_behind_equal_keys() {
        let mut queue = MinPriorityQueue::new();
        queue.insert(1, "x");
        queue.insert(1, "y");
        queue.insert(2, "a");
        queue.insert(2, "b");

        let (k1, _) = queue.extract_min().unwrap();
        let (k2, _) = queue.extract_min().unwrap();
        queue.insert(k1 + k2, "xy");

        assert_eq!(drain(&mut queue), vec!["a", "b", "xy"]);
    }

    #[test]
    fn test_extract_empty() {
        let mut queue = MinPriorityQueue::<()>::default();
        assert!(queue.extract_min().is_none());
        assert_eq!(queue.peek_key(), None);
    }
}
