//! Immutable bitset over small non-negative integer universes.
//!
//! [`EquipmentSet`] holds equipment-type ids, but it is a plain id set and is
//! also used for task sets (deep dependencies). Every operation returns a new
//! value; no set is mutated after construction, so sets can be shared and
//! cached freely.

use std::fmt;

use smallvec::SmallVec;

const WORD_BITS: usize = 64;

type Words = SmallVec<[u64; 2]>;

/// An immutable set of small non-negative integers.
///
/// Storage is canonical (no trailing zero words), so structural equality and
/// hashing match set equality.
///
/// # Examples
///
/// ```
/// use eqalbp_core::EquipmentSet;
///
/// let required: EquipmentSet = [2, 3].into_iter().collect();
/// let installed: EquipmentSet = [2, 3, 4].into_iter().collect();
///
/// assert!(required.is_subset_of(&installed));
/// assert_eq!(installed.len(), 3);
/// assert_eq!(required.union(&installed.with(70)).iter().collect::<Vec<_>>(), vec![2, 3, 4, 70]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct EquipmentSet {
    words: Words,
}

impl EquipmentSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set containing only `id`.
    pub fn singleton(id: usize) -> Self {
        Self::new().with(id)
    }

    fn from_words(mut words: Words) -> Self {
        while words.last() == Some(&0) {
            words.pop();
        }
        Self { words }
    }

    fn word(&self, index: usize) -> u64 {
        self.words.get(index).copied().unwrap_or(0)
    }

    /// Returns a copy of this set with `id` added.
    pub fn with(&self, id: usize) -> Self {
        let word = id / WORD_BITS;
        let mut words = self.words.clone();
        if words.len() <= word {
            words.resize(word + 1, 0);
        }
        words[word] |= 1u64 << (id % WORD_BITS);
        Self { words }
    }

    /// Returns a copy of this set with `id` removed.
    pub fn without(&self, id: usize) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        self.xor(&Self::singleton(id))
    }

    /// Set union.
    pub fn union(&self, other: &Self) -> Self {
        let len = self.words.len().max(other.words.len());
        let words = (0..len).map(|i| self.word(i) | other.word(i)).collect();
        Self { words }
    }

    /// Set intersection.
    pub fn intersect(&self, other: &Self) -> Self {
        let len = self.words.len().min(other.words.len());
        let words = (0..len).map(|i| self.words[i] & other.words[i]).collect();
        Self::from_words(words)
    }

    /// Symmetric difference.
    pub fn xor(&self, other: &Self) -> Self {
        let len = self.words.len().max(other.words.len());
        let words = (0..len).map(|i| self.word(i) ^ other.word(i)).collect();
        Self::from_words(words)
    }

    /// Returns true if `id` is a member.
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.word(id / WORD_BITS) & (1u64 << (id % WORD_BITS)) != 0
    }

    /// Number of members (population count).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `|self ∩ other|` without allocating the intersection.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Returns true if every member of `self` is a member of `other`.
    ///
    /// Word-wise `a & !b == 0`; this is the innermost test of equipment
    /// compatibility filtering.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if self.words.len() > other.words.len() {
            // Canonical storage: the last word of `self` is non-zero.
            return false;
        }
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Lazily iterates members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// The largest member, if any.
    pub fn max(&self) -> Option<usize> {
        let last = *self.words.last()?;
        Some((self.words.len() - 1) * WORD_BITS + (WORD_BITS - 1 - last.leading_zeros() as usize))
    }
}

/// Ascending iterator over the members of an [`EquipmentSet`].
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}

impl<'a> IntoIterator for &'a EquipmentSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromIterator<usize> for EquipmentSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut words = Words::new();
        for id in iter {
            let word = id / WORD_BITS;
            if words.len() <= word {
                words.resize(word + 1, 0);
            }
            words[word] |= 1u64 << (id % WORD_BITS);
        }
        Self { words }
    }
}

impl fmt::Debug for EquipmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
