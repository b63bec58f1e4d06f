/// Ordered sequence of match start offsets, shared result type for
/// all matchers.
///
/// Append-only while a scan runs, read-only afterwards. The backing
/// storage grows geometrically, so appends are amortized O(1); there
/// is no shrink because buffers are write-once, read-many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions {
    offsets: Vec<usize>,
}

const INITIAL_CAPACITY: usize = 32;

impl Positions {
    pub fn new() -> Self {
        Self {
            offsets: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Record one match start offset. Offsets arrive in scan order,
    /// so the sequence stays sorted without ever sorting.
    pub fn push(&mut self, offset: usize) {
        self.offsets.push(offset);
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.offsets
    }
}

impl Default for Positions {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Positions {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter().copied()
    }
}

impl From<Vec<usize>> for Positions {
    fn from(offsets: Vec<usize>) -> Self {
        Self { offsets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut positions = Positions::new();
        positions.push(3);
        positions.push(7);
        positions.push(12);

        assert_eq!(positions.len(), 3);
        assert_eq!(positions.as_slice(), &[3, 7, 12]);
        assert_eq!(positions.get(1), Some(7));
        assert_eq!(positions.get(3), None);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut positions = Positions::new();
        for i in 0..INITIAL_CAPACITY * 4 {
            positions.push(i);
        }

        assert_eq!(positions.len(), INITIAL_CAPACITY * 4);
        assert!(positions.iter().eq(0..INITIAL_CAPACITY * 4));
    }

    #[test]
    fn empty_buffer_reports_empty() {
        let positions = Positions::new();
        assert!(positions.is_empty());
        assert_eq!(positions.into_vec(), Vec::<usize>::new());
    }
}
