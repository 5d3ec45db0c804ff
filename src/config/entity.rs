//! Insertion-ordered, name-keyed entity maps.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::HashMap;

/// An entity that is looked up by name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Map of named entities that remembers insertion order.
///
/// Iteration yields entities in the order their names were first inserted.
/// Replacing an existing name keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMap<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        EntityMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> EntityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(name) {
            Some(&slot) => Some(&mut self.entries[slot]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Insert or replace by name. Returns the replaced entity, if any.
    pub fn insert(&mut self, entity: T) -> Option<T> {
        match self.index.get(entity.name()) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entity)),
            None => {
                self.index.insert(entity.name().to_string(), self.entries.len());
                self.entries.push(entity);
                None
            }
        }
    }

    /// Existing entity for `name`, or a new one built by `create` and appended.
    pub fn get_or_insert_with(&mut self, name: &str, create: impl FnOnce() -> T) -> &mut T {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(create());
                self.index.insert(name.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Named::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Named> FromIterator<T> for EntityMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = EntityMap::new();
        for entity in iter {
            map.insert(entity);
        }
        map
    }
}

impl<'a, T> IntoIterator for &'a EntityMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Serialize> Serialize for EntityMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entity in &self.entries {
            seq.serialize_element(entity)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        value: u32,
    }

    impl Named for Item {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn item(name: &str, value: u32) -> Item {
        Item {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_insertion_order_is_kept_across_replace() {
        let mut map = EntityMap::new();
        map.insert(item("b", 1));
        map.insert(item("a", 2));
        let replaced = map.insert(item("b", 3));

        assert_eq!(replaced, Some(item("b", 1)));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b").unwrap().value, 3);
    }

    #[test]
    fn test_get_or_insert_with_only_creates_once() {
        let mut map = EntityMap::new();
        map.get_or_insert_with("x", || item("x", 1)).value += 10;
        map.get_or_insert_with("x", || item("x", 100)).value += 1;
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x").unwrap().value, 12);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let map: EntityMap<Item> = vec![item("Channel_1", 1)].into_iter().collect();
        assert!(map.contains("Channel_1"));
        assert!(!map.contains("channel_1"));
    }
}
