use std::{ops::Deref, slice};

/// An ordered sequence which stores a copy of every element inserted into it.
/// Changing a value after inserting it never affects the stored element, and
/// stored elements are only ever exposed through shared references.
///
/// ```
/// use singleton_injector::CopyVec;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Endpoint {
///     path: String,
/// }
///
/// let mut endpoint = Endpoint { path: "/".into() };
/// let mut endpoints = CopyVec::from_slice(&[endpoint.clone()]);
///
/// endpoint.path = "/blog".into();
/// endpoints.push(&endpoint);
/// endpoint.path = "/blog/:id".into();
///
/// assert_eq!("/", endpoints[0].path);
/// assert_eq!("/blog", endpoints[1].path);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CopyVec<T> {
    items: Vec<T>,
}

impl<T: Clone> CopyVec<T> {
    /// Creates a new, empty sequence.
    #[must_use]
    pub fn new() -> Self {
        CopyVec { items: Vec::new() }
    }

    /// Creates a new, empty sequence with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CopyVec {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Creates a sequence holding copies of the given elements.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        CopyVec {
            items: items.to_vec(),
        }
    }

    /// Appends a copy of an element.
    pub fn push(&mut self, item: &T) {
        self.items.push(item.clone());

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.items.len(), "pushed copy");
    }

    /// Appends copies of each of the given elements, in order.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.items.extend_from_slice(items);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            added = items.len(),
            len = self.items.len(),
            "pushed copies"
        );
    }

    /// Gets the stored elements.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the stored elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Takes ownership of the stored elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Default for CopyVec<T> {
    fn default() -> Self {
        CopyVec::new()
    }
}

impl<T> Deref for CopyVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, T: Clone + 'a> FromIterator<&'a T> for CopyVec<T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        CopyVec {
            items: iter.into_iter().cloned().collect(),
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for CopyVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().cloned());
    }
}

impl<'a, T> IntoIterator for &'a CopyVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for CopyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::CopyVec;

    #[derive(Clone, Debug, PartialEq)]
    struct Endpoint {
        path: String,
    }

    fn endpoint(path: &str) -> Endpoint {
        Endpoint {
            path: path.to_owned(),
        }
    }

    #[test]
    fn construction_copies_elements() {
        let mut e = endpoint("/");
        let endpoints = CopyVec::from_slice(std::slice::from_ref(&e));
        e.path = "/blog".to_owned();

        assert_eq!(1, endpoints.len());
        assert_eq!("/", endpoints[0].path);
    }

    #[test]
    fn push_copies_element() {
        let mut e = endpoint("/");
        let mut endpoints = CopyVec::from_slice(&[e.clone()]);
        e.path = "/blog".to_owned();
        endpoints.push(&e);
        e.path = "/blog/:id".to_owned();

        assert_eq!(
            vec![endpoint("/"), endpoint("/blog")],
            endpoints.into_vec()
        );
    }

    #[test]
    fn collects_from_references() {
        let originals = vec![endpoint("/a"), endpoint("/b")];
        let mut copies: CopyVec<Endpoint> = originals.iter().collect();
        copies.extend(originals.iter().rev());
        copies.extend_from_slice(&originals[..1]);

        let paths: Vec<_> = copies.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(vec!["/a", "/b", "/b", "/a", "/a"], paths);
        assert!(!copies.is_empty());
        assert_eq!(originals.as_slice(), &copies.as_slice()[..2]);
    }

    #[test]
    fn empty_sequence() {
        let empty: CopyVec<Endpoint> = CopyVec::default();
        assert!(empty.is_empty());
        assert_eq!(None, empty.get(0));
        assert!(CopyVec::<Endpoint>::with_capacity(4).is_empty());
    }
}
