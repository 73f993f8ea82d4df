/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PropertyEntry {
    pub value: String,
    /// Consumed by the framework itself, never handed to a native driver.
    pub customized: bool,
}

/// Ordered, case-insensitive property bag scoped to one connection string.
///
/// Different driver generations spell the same logical field differently
/// (`user id` / `uid` / `username`), so every lookup and mutation accepts a
/// list of alternate names. Whatever spelling the caller originally supplied
/// is the one that survives round-tripping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionProperties {
    entries: IndexMap<String, PropertyEntry>,
}

impl ConnectionProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .keys()
            .position(|k| k.eq_ignore_ascii_case(name))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the value of the first key present among `name` followed by
    /// `alt_names`.
    pub fn try_get_value(&self, name: &str, alt_names: &[&str]) -> Option<&str> {
        std::iter::once(name)
            .chain(alt_names.iter().copied())
            .find_map(|candidate| {
                self.entries
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(candidate))
                    .map(|(_, e)| e.value.as_str())
            })
    }

    /// Updates the first key already present among `name`/`alt_names` in
    /// place; inserts under `name` when no spelling exists yet.
    pub fn try_set_value(&mut self, value: &str, name: &str, alt_names: &[&str]) -> bool {
        for candidate in std::iter::once(name).chain(alt_names.iter().copied()) {
            if let Some(idx) = self.position(candidate) {
                if let Some((_, entry)) = self.entries.get_index_mut(idx) {
                    entry.value = value.to_string();
                    return true;
                }
            }
        }
        self.entries.insert(
            name.to_string(),
            PropertyEntry { value: value.to_string(), customized: false },
        );
        true
    }

    /// Records a parsed pair. An existing spelling (case-insensitive) is
    /// overwritten in place so each key appears once.
    pub(crate) fn record(&mut self, name: &str, value: String, customized: bool) {
        if let Some(idx) = self.position(name) {
            if let Some((_, entry)) = self.entries.get_index_mut(idx) {
                entry.value = value;
                entry.customized = customized;
                return;
            }
        }
        self.entries.insert(name.to_string(), PropertyEntry { value, customized });
    }

    pub fn is_customized(&self, name: &str) -> bool {
        self.position(name)
            .and_then(|idx| self.entries.get_index(idx))
            .map(|(_, e)| e.customized)
            .unwrap_or(false)
    }

    /// Keys and values in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e.value.as_str()))
    }

    /// Keys and values that belong in a native driver's connection string.
    pub(crate) fn iter_non_customized(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.customized)
            .map(|(k, e)| (k.as_str(), e.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup() {
        let mut props = ConnectionProperties::new();
        props.record("Data Source", "myserver".to_string(), false);

        assert_eq!(props.try_get_value("server", &["data source", "host"]), Some("myserver"));
        assert_eq!(props.try_get_value("data source", &[]), Some("myserver"));
        assert_eq!(props.try_get_value("host", &[]), None);
    }

    #[test]
    fn test_set_updates_existing_alias_in_place() {
        let mut props = ConnectionProperties::new();
        props.record("uid", "sa".to_string(), false);

        props.try_set_value("root", "user id", &["uid", "username"]);
        // The original spelling wins, no second key appears.
        assert_eq!(props.len(), 1);
        assert_eq!(props.try_get_value("uid", &[]), Some("root"));
        assert!(!props.contains_key("user id"));
    }

    #[test]
    fn test_set_inserts_canonical_when_absent() {
        let mut props = ConnectionProperties::new();
        props.try_set_value("secret", "password", &["pwd"]);
        assert_eq!(props.try_get_value("pwd", &["password"]), Some("secret"));
        assert!(props.contains_key("password"));
    }

    #[test]
    fn test_record_is_case_insensitive() {
        let mut props = ConnectionProperties::new();
        props.record("Server", "a".to_string(), false);
        props.record("SERVER", "b".to_string(), false);
        assert_eq!(props.len(), 1);
        assert_eq!(props.try_get_value("server", &[]), Some("b"));
    }
}
