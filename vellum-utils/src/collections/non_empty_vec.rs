use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut};

/// Like the `vec!` macro, but enforces at least one argument.
///
/// ```
/// use vellum_utils::collections::{NonEmptyVec, non_empty_vec};
///
/// let v = non_empty_vec![1, 2, 3];
/// assert_eq!(v.first(), &1);
/// assert_eq!(v.len(), 3);
///
/// let v = non_empty_vec![1];
/// assert_eq!(v, NonEmptyVec::new(1));
///
/// // Doesn't compile!
/// // let v = non_empty_vec![];
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __non_empty_vec {
    ($h:expr $(, $x:expr )* $(,)?) => {
        $crate::collections::NonEmptyVec::from_head_and_tail(
            $h,
            $crate::collections::__macro_support::vec![$($x),*],
        )
    };
}

/// A growable vector which is guaranteed to hold at least one element.
///
/// Header values are the main consumer: a header present in a map
/// always has at least one value, and list grammars such as
/// `Accept-Encoding` or `If-Match` never decode to an empty list.
/// Encoding that in the type removes a whole class of "empty but present"
/// states.
///
/// The elements are stored contiguously, so the vector derefs into a slice.
/// It does not implement [`FromIterator`] as an iterator might be empty,
/// use [`NonEmptyVec::collect`] instead.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>"))]
pub struct NonEmptyVec<T>(Vec<T>);

/// Error returned when trying to build a [`NonEmptyVec`] from no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyVecError;

impl fmt::Display for EmptyVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("vector is empty")
    }
}

impl std::error::Error for EmptyVecError {}

impl<T> NonEmptyVec<T> {
    /// Create a new [`NonEmptyVec`] containing a single element.
    #[inline]
    pub fn new(head: T) -> Self {
        Self(vec![head])
    }

    /// Create a new [`NonEmptyVec`] from a first element and the rest.
    pub fn from_head_and_tail(head: T, mut tail: Vec<T>) -> Self {
        tail.insert(0, head);
        Self(tail)
    }

    /// Create a new [`NonEmptyVec`] from a [`Vec`], `None` if it is empty.
    #[must_use]
    pub fn from_vec(vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() { None } else { Some(Self(vec)) }
    }

    /// Collect an iterator into a [`NonEmptyVec`], `None` if it yields nothing.
    pub fn collect<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(iter.into_iter().collect())
    }

    /// The first element, which always exists.
    #[must_use]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    /// The last element, which always exists.
    #[must_use]
    pub fn last(&self) -> &T {
        &self.0[self.0.len() - 1]
    }

    /// Amount of elements, never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Amount of elements as a [`NonZeroUsize`].
    #[must_use]
    pub fn len_nonzero(&self) -> NonZeroUsize {
        NonZeroUsize::MIN.saturating_add(self.0.len() - 1)
    }

    /// Always `false`, exists to keep clippy and generic code happy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append an element.
    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    /// Remove the last element, unless it is the only one left.
    pub fn pop(&mut self) -> Option<T> {
        if self.0.len() > 1 { self.0.pop() } else { None }
    }

    /// View the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Map every element, keeping the non-empty guarantee.
    pub fn map<U, F>(self, f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        NonEmptyVec(self.0.into_iter().map(f).collect())
    }

    /// Map every element with a fallible function.
    pub fn try_map<U, E, F>(self, f: F) -> Result<NonEmptyVec<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        self.0.into_iter().map(f).collect::<Result<Vec<_>, _>>().map(NonEmptyVec)
    }

    /// Consume into the underlying [`Vec`].
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for NonEmptyVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> AsRef<[T]> for NonEmptyVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for NonEmptyVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T> Extend<T> for NonEmptyVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = EmptyVecError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_vec(value).ok_or(EmptyVecError)
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(value: NonEmptyVec<T>) -> Self {
        value.0
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::non_empty_vec;

    #[test]
    fn first_and_last() {
        let v = non_empty_vec![1, 2, 3];
        assert_eq!(*v.first(), 1);
        assert_eq!(*v.last(), 3);
        assert_eq!(v.len_nonzero().get(), 3);

        let v = NonEmptyVec::new("a");
        assert_eq!(v.first(), v.last());
    }

    #[test]
    fn pop_keeps_one() {
        let mut v = non_empty_vec![1, 2];
        assert_eq!(v.pop(), Some(2));
        assert_eq!(v.pop(), None);
        assert_eq!(v.as_slice(), &[1]);
    }

    #[test]
    fn from_vec_rejects_empty() {
        assert!(NonEmptyVec::<u8>::from_vec(vec![]).is_none());
        assert_eq!(NonEmptyVec::try_from(Vec::<u8>::new()), Err(EmptyVecError));
        assert!(NonEmptyVec::collect(std::iter::empty::<u8>()).is_none());
    }

    #[test]
    fn try_map_short_circuits() {
        let v = non_empty_vec!["1", "x", "3"];
        assert!(v.clone().try_map(str::parse::<u8>).is_err());
        let v = non_empty_vec!["1", "2"].try_map(str::parse::<u8>).unwrap();
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn serde_rejects_empty_sequence() {
        let v: NonEmptyVec<u8> = serde_json::from_str("[4, 2]").unwrap();
        assert_eq!(v.as_slice(), &[4, 2]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[4,2]");
        assert!(serde_json::from_str::<NonEmptyVec<u8>>("[]").is_err());
    }
}
