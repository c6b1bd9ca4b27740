use core::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// Two pairs built from the same elements compare equal regardless of the order
/// the elements were given in, which makes this a canonical key for unordered pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element.
    #[inline]
    pub fn first(&self) -> T {
        self.0[0]
    }

    /// Does this pair contain `element`?
    #[inline]
    pub fn contains(&self, element: T) -> bool {
        self.0[0] == element || self.0[1] == element
    }
}
