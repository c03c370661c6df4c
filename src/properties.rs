use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Keyed text properties behind a shared handle.
///
/// Several records may hold the same container; a mutation through any handle
/// is seen by all of them. [`Properties::share`] hands out another handle to the
/// same container, [`Properties::detach`] allocates an independent one with the
/// same content.
///
/// The type is intentionally not [`Clone`]: callers pick aliasing or copying.
pub struct Properties(Rc<RefCell<BTreeMap<String, String>>>);

impl Properties {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// Another handle to this same container.
    pub fn share(&self) -> Self {
        Self(Rc::clone(&self.0))
    }

    /// A newly allocated container holding a copy of every key and value.
    pub fn detach(&self) -> Self {
        let source = self.0.borrow();
        let mut copied = BTreeMap::new();

        for key in source.keys() {
            copied.insert(key.clone(), source[key].clone());
        }

        Self(Rc::new(RefCell::new(copied)))
    }

    /// Whether both handles point at the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles to this container.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.0.borrow_mut().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Owned copy of the current content, detached from every handle.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.0.borrow().clone()
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::new()
    }
}

/// Content equality, whether or not the containers are shared.
impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl Eq for Properties {}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

impl From<BTreeMap<String, String>> for Properties {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(Rc::new(RefCell::new(map)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<BTreeMap<String, String>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_aliases_container() {
        let props = Properties::new();
        let alias = props.share();

        props.insert("salary", "10000");

        assert!(props.ptr_eq(&alias));
        assert_eq!(alias.get("salary").as_deref(), Some("10000"));
        assert_eq!(props.handle_count(), 2);
    }

    #[test]
    fn detach_copies_content() {
        let props = Properties::from_iter([("city", "Bangalore"), ("role", "CEO")]);
        let copy = props.detach();

        assert!(!props.ptr_eq(&copy));
        assert_eq!(props, copy);

        // Mutations no longer cross over.
        props.insert("city", "Pune");
        copy.remove("role");

        assert_eq!(copy.get("city").as_deref(), Some("Bangalore"));
        assert!(props.contains_key("role"));
    }

    #[test]
    fn keys_are_ordered() {
        let props: Properties = [("b", "2"), ("c", "3"), ("a", "1")].into_iter().collect();

        assert_eq!(props.keys(), vec!["a", "b", "c"]);
        assert_eq!(format!("{:?}", props), r#"{"a": "1", "b": "2", "c": "3"}"#);
    }
}
