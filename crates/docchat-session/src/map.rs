//! Insertion-ordered mapping of session id to session
//!
//! Serializes as a plain JSON object whose key order is the insertion order,
//! so "first remaining session" is stable across save and load.

use crate::Session;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered session mapping with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMap {
    entries: Vec<(String, Session)>,
}

impl SessionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.position(id).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        let index = self.position(id)?;
        Some(&mut self.entries[index].1)
    }

    /// Insert or replace a session
    ///
    /// Replacing keeps the key's original position and returns the old value.
    pub fn insert(&mut self, id: impl Into<String>, session: Session) -> Option<Session> {
        let id = id.into();
        match self.position(&id) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, session)),
            None => {
                self.entries.push((id, session));
                None
            }
        }
    }

    /// Get a session, inserting an empty one if absent
    pub fn entry_or_default(&mut self, id: &str) -> &mut Session {
        let index = match self.position(id) {
            Some(i) => i,
            None => {
                self.entries.push((id.to_string(), Session::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Remove a session, keeping the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.position(id).map(|i| self.entries.remove(i).1)
    }

    /// First id in iteration order
    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(id, _)| id.as_str())
    }

    /// Ids in iteration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Entries in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.entries.iter().map(|(id, s)| (id.as_str(), s))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == id)
    }
}

impl FromIterator<(String, Session)> for SessionMap {
    fn from_iter<I: IntoIterator<Item = (String, Session)>>(iter: I) -> Self {
        let mut map = SessionMap::new();
        for (id, session) in iter {
            map.insert(id, session);
        }
        map
    }
}

impl Serialize for SessionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, session) in &self.entries {
            map.serialize_entry(id, session)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SessionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SessionMapVisitor;

        impl<'de> Visitor<'de> for SessionMapVisitor {
            type Value = SessionMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of session id to session")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SessionMap, A::Error> {
                let mut map = SessionMap::new();
                // duplicate keys: last value wins, first position is kept
                while let Some((id, session)) = access.next_entry::<String, Session>()? {
                    map.insert(id, session);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(SessionMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(text: &str) -> Session {
        let mut session = Session::new();
        session.set_chat_history(text);
        session
    }

    #[test]
    fn test_insertion_order_survives_json() {
        let map: SessionMap = [
            ("zeta".to_string(), history("z")),
            ("alpha".to_string(), history("a")),
            ("mid".to_string(), Session::new()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());

        let back: SessionMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
        assert_eq!(back.ids().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = SessionMap::new();
        map.insert("a", history("1"));
        map.insert("b", history("2"));

        let old = map.insert("a", history("3"));
        assert_eq!(old.unwrap().chat_history(), "1");
        assert_eq!(map.first_id(), Some("a"));
        assert_eq!(map.get("a").unwrap().chat_history(), "3");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: SessionMap = ["a", "b", "c"]
            .into_iter()
            .map(|id| (id.to_string(), Session::new()))
            .collect();

        assert!(map.remove("b").is_some());
        assert!(map.remove("b").is_none());
        assert_eq!(map.ids().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn test_entry_or_default() {
        let mut map = SessionMap::new();
        map.entry_or_default("x").set_chat_history("hi");
        map.entry_or_default("x");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x").unwrap().chat_history(), "hi");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<SessionMap>("[1, 2]").is_err());
    }
}
