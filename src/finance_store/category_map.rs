use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Category name to value, kept in the order the names were first seen.
///
/// Serializes as a JSON object. A repeated key replaces the earlier value but
/// keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> CategoryMap<V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn insert(&mut self, name: String, value: V) -> Option<V> {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<V> Default for CategoryMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<&str> for CategoryMap<V> {
    type Output = V;

    fn index(&self, name: &str) -> &V {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no category named {name}"),
        }
    }
}

impl<V> FromIterator<(String, V)> for CategoryMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<V> IntoIterator for CategoryMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for CategoryMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct CategoryMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for CategoryMapVisitor<V> {
    type Value = CategoryMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object keyed by category name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = CategoryMap::new();
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CategoryMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CategoryMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let map: CategoryMap<i32> =
            serde_json::from_str(r#"{"Rent": 1, "Food": 2, "Bills": 3}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Rent", "Food", "Bills"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"Rent":1,"Food":2,"Bills":3}"#);
    }

    #[test]
    fn test_repeated_key_replaces_value_in_place() {
        let map: CategoryMap<i32> =
            serde_json::from_str(r#"{"Food": 1, "Rent": 2, "Food": 3}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Food"], 3);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Food", "Rent"]);
    }
}
