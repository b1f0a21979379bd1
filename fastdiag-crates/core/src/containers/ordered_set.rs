use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;

use itertools::Itertools;

use super::HashSet;

/// A duplicate-free collection which remembers the order in which its elements were inserted.
///
/// All of the divide-and-conquer algorithms rely on [`OrderedSet::split`] being deterministic, so
/// the set operations never reorder elements: the result of [`OrderedSet::union`] lists the
/// elements of `self` first, followed by the elements of `other` which were not yet present, and
/// [`OrderedSet::difference`] keeps the relative order of `self`.
///
/// The operations take `&self` and return a fresh set; a set which has been handed to an
/// algorithm is never changed by it.
///
/// Two sets are equal when they contain the same elements, irrespective of their order.
#[derive(Clone)]
pub struct OrderedSet<T> {
    elements: Vec<T>,
    members: HashSet<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            elements: Vec::default(),
            members: HashSet::default(),
        }
    }
}

impl<T: Copy + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: T) -> bool {
        self.members.contains(&element)
    }

    /// Appends `element` if it is not yet present.
    ///
    /// Returns whether the element was inserted.
    pub fn insert(&mut self, element: T) -> bool {
        if self.members.insert(element) {
            self.elements.push(element);
            true
        } else {
            false
        }
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.elements.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Splits the set into the first `⌊n/2⌋` elements and the remaining ones.
    pub fn split(&self) -> (Self, Self) {
        let middle = self.elements.len() / 2;

        let first = self.elements[..middle].iter().copied().collect();
        let second = self.elements[middle..].iter().copied().collect();

        (first, second)
    }

    /// The elements of `self` followed by the elements of `other` which are not in `self`.
    pub fn union(&self, other: &Self) -> Self {
        let mut union = self.clone();
        for element in other.iter() {
            let _ = union.insert(element);
        }
        union
    }

    /// The elements of `self` which are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }

        self.iter()
            .filter(|&element| !other.contains(element))
            .collect()
    }

    /// A copy of `self` with `element` appended (if it was not already present).
    pub fn with(&self, element: T) -> Self {
        let mut result = self.clone();
        let _ = result.insert(element);
        result
    }

    /// A copy of `self` without `element`.
    pub fn without(&self, element: T) -> Self {
        self.iter().filter(|&other| other != element).collect()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        smaller.iter().all(|element| !larger.contains(element))
    }
}

impl<T: Copy + Eq + Hash + Ord> OrderedSet<T> {
    /// The elements in ascending order, which identifies the set independently of the order in
    /// which it was built.
    pub fn sorted_elements(&self) -> Vec<T> {
        self.elements.iter().copied().sorted().collect()
    }
}

impl<T: Copy + Eq + Hash> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Copy + Eq + Hash> Eq for OrderedSet<T> {}

impl<T: Copy + Eq + Hash> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::default();
        for element in iter {
            let _ = set.insert(element);
        }
        set
    }
}

impl<T: Copy + Eq + Hash, const N: usize> From<[T; N]> for OrderedSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T: Copy + Eq + Hash> IntoIterator for &'a OrderedSet<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter().copied()
    }
}

impl<T: Debug> Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<T: Display> Display for OrderedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.elements.iter().join(", "))
    }
}
