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
use std::fmt;
use std::path::PathBuf;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use url::Url;

use crate::connection::properties::ConnectionProperties;

/// Directory macro token at the head of a property value: `|token|rest`.
static MACRO_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|([^|]+)\|").unwrap());

/// Process-wide override for the `|datadirectory|` macro, the moral
/// equivalent of a host setting its data home before opening connections.
static DATA_DIRECTORY: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));

pub fn set_data_directory<P: Into<PathBuf>>(path: P) {
    *DATA_DIRECTORY.write().expect("data directory lock poisoned") = Some(path.into());
}

pub fn data_directory() -> Option<PathBuf> {
    DATA_DIRECTORY.read().expect("data directory lock poisoned").clone()
}

fn base_directory() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .or_else(|| std::env::current_dir().ok())
}

fn special_folder(name: &str) -> Option<PathBuf> {
    match name.to_ascii_lowercase().as_str() {
        "mydocuments" | "personal" => dirs::document_dir(),
        "applicationdata" | "appdata" => dirs::config_dir(),
        "localapplicationdata" => dirs::data_local_dir(),
        "commonapplicationdata" => dirs::data_dir(),
        "userprofile" | "home" => dirs::home_dir(),
        "desktop" | "desktopdirectory" => dirs::desktop_dir(),
        _ => None,
    }
}

/// Resolves a leading `|token|` directory macro in a property value.
///
/// An unknown token is a soft failure: the value is returned untouched so
/// the caller sees the literal macro text, never an error.
pub fn resolve_directory_macro(value: &str) -> String {
    let Some(caps) = MACRO_TOKEN.captures(value) else {
        return value.to_string();
    };
    let token = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let rest = &value[caps.get(0).map(|m| m.end()).unwrap_or(0)..];

    let directory = match token.to_ascii_lowercase().as_str() {
        "datadirectory" => data_directory().or_else(base_directory),
        "appdir" => base_directory(),
        other => special_folder(other),
    };
    let Some(directory) = directory else {
        warn!("unresolved directory macro `|{}|`, keeping literal value", token);
        return value.to_string();
    };

    let combined = directory.join(rest.trim_start_matches(|c| c == '/' || c == '\\'));
    let combined = combined.to_string_lossy().into_owned();
    match Url::parse(&combined) {
        // A local file URI loses its `file:` prefix.
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or(combined),
        // Any other URI passes through verbatim.
        Ok(_) => combined,
        Err(_) => combined,
    }
}

/// A parsed connection string.
///
/// Owns the original text, the cleaned text suitable for a native driver,
/// the property bag, and the four framework-reserved fields. The cleaned
/// text always re-serializes the non-customized properties as `key=value;`
/// pairs in discovery order; reserved keys stay in the bag but never in the
/// text.
#[derive(Debug, Clone, Default)]
pub struct ConnectionString {
    original: String,
    clean: String,
    properties: ConnectionProperties,
    version: Option<String>,
    provider_type: Option<String>,
    database_type: Option<String>,
    is_tracking: bool,
}

impl ConnectionString {
    /// Single left-to-right scan, no backtracking. One quote flag covers
    /// both `'` and `"`; which character opened a quoted run is not
    /// tracked, so mixing unescaped quote kinds inside one value
    /// mis-tokenizes. Known limitation, kept as-is.
    pub fn parse(raw: &str) -> Self {
        let mut conn = ConnectionString {
            original: raw.to_string(),
            ..Default::default()
        };

        let mut quoted = false;
        let mut pending_name: Option<String> = None;
        let mut buf = String::new();

        for ch in raw.chars() {
            match ch {
                '\'' | '"' => {
                    quoted = !quoted;
                    buf.push(ch);
                }
                '=' if !quoted && pending_name.is_none() => {
                    pending_name = Some(buf.trim().to_string());
                    buf.clear();
                }
                ';' if !quoted => {
                    conn.accept_pair(pending_name.take(), &buf);
                    buf.clear();
                }
                _ => buf.push(ch),
            }
        }
        // Trailing fragment without a closing separator.
        conn.accept_pair(pending_name.take(), &buf);

        conn
    }

    fn accept_pair(&mut self, name: Option<String>, raw_value: &str) {
        let Some(name) = name else { return };
        if name.is_empty() {
            return;
        }
        let value = raw_value.trim();

        let customized = self.accept_reserved(&name, value);
        if customized {
            self.properties.record(&name, value.to_string(), true);
        } else {
            let resolved = resolve_directory_macro(value);
            self.clean.push_str(&name);
            self.clean.push('=');
            self.clean.push_str(&resolved);
            self.clean.push(';');
            self.properties.record(&name, resolved, false);
        }
    }

    /// The four reserved keys consumed by the framework itself.
    fn accept_reserved(&mut self, name: &str, value: &str) -> bool {
        if name.eq_ignore_ascii_case("version") {
            self.version = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("provider type") {
            self.provider_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("database type") {
            self.database_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("tracking") {
            self.is_tracking = value.eq_ignore_ascii_case("true") || value == "1";
        } else {
            return false;
        }
        true
    }

    /// Rebuilds the cleaned text from the current non-customized
    /// properties. Full regeneration, not incremental.
    pub fn update(&mut self) {
        let mut clean = String::new();
        for (key, value) in self.properties.iter_non_customized() {
            clean.push_str(key);
            clean.push('=');
            clean.push_str(value);
            clean.push(';');
        }
        self.clean = clean;
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn properties(&self) -> &ConnectionProperties {
        &self.properties
    }

    /// Mutations go through the bag; call [`update`](Self::update) after to
    /// rebuild the text.
    pub fn properties_mut(&mut self) -> &mut ConnectionProperties {
        &mut self.properties
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn provider_type(&self) -> Option<&str> {
        self.provider_type.as_deref()
    }

    pub fn database_type(&self) -> Option<&str> {
        self.database_type.as_deref()
    }

    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.clean)
    }
}

impl From<&str> for ConnectionString {
    fn from(raw: &str) -> Self {
        ConnectionString::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_pairs() {
        let conn = ConnectionString::parse("data source=myserver;user id=sa;password=pwd");
        assert_eq!(conn.to_string(), "data source=myserver;user id=sa;password=pwd;");
        assert_eq!(conn.properties().len(), 3);
        assert_eq!(conn.properties().try_get_value("user id", &[]), Some("sa"));
    }

    #[test]
    fn test_reserved_keys_leave_the_text() {
        let conn =
            ConnectionString::parse("data source=myserver;user id=sa;password=pwd;Provider Type=MySql");
        assert_eq!(conn.provider_type(), Some("MySql"));
        assert_eq!(conn.to_string(), "data source=myserver;user id=sa;password=pwd;");
        // Still recorded in the bag, flagged customized.
        assert_eq!(conn.properties().try_get_value("provider type", &[]), Some("MySql"));
        assert!(conn.properties().is_customized("provider type"));
    }

    #[test]
    fn test_all_four_reserved_keys() {
        let conn = ConnectionString::parse(
            "server=.;Version=8.0;Database Type=relational;tracking=true;provider type=SqlServer",
        );
        assert_eq!(conn.version(), Some("8.0"));
        assert_eq!(conn.database_type(), Some("relational"));
        assert_eq!(conn.provider_type(), Some("SqlServer"));
        assert!(conn.is_tracking());
        assert_eq!(conn.to_string(), "server=.;");
    }

    #[test]
    fn test_quoted_value_suspends_separators() {
        let conn = ConnectionString::parse("password='a;b=c';server=x");
        assert_eq!(conn.properties().try_get_value("password", &[]), Some("'a;b=c'"));
        assert_eq!(conn.properties().try_get_value("server", &[]), Some("x"));
    }

    #[test]
    fn test_trailing_fragment_without_semicolon() {
        let conn = ConnectionString::parse("a=1;b=2");
        assert_eq!(conn.properties().try_get_value("b", &[]), Some("2"));
    }

    #[test]
    fn test_fragment_without_name_is_skipped() {
        let conn = ConnectionString::parse(";;a=1;junk;");
        assert_eq!(conn.properties().len(), 1);
        assert_eq!(conn.to_string(), "a=1;");
    }

    #[test]
    fn test_update_rebuilds_from_properties() {
        let mut conn = ConnectionString::parse("server=old;uid=sa;tracking=1");
        conn.properties_mut().try_set_value("new", "server", &["data source"]);
        conn.update();
        assert_eq!(conn.to_string(), "server=new;uid=sa;");
        assert!(conn.is_tracking());
    }

    #[test]
    fn test_unknown_macro_token_kept_literal() {
        let conn = ConnectionString::parse("data source=|NoSuchFolder|db.sqlite");
        assert_eq!(
            conn.properties().try_get_value("data source", &[]),
            Some("|NoSuchFolder|db.sqlite")
        );
    }

    #[test]
    fn test_data_directory_macro_resolution() {
        let dir = tempfile::tempdir().unwrap();
        set_data_directory(dir.path());

        let conn = ConnectionString::parse("data source=|DataDirectory|app.db");
        let resolved = conn.properties().try_get_value("data source", &[]).unwrap();
        assert_eq!(resolved, dir.path().join("app.db").to_string_lossy());
        assert!(conn.to_string().contains(resolved));
    }

    #[test]
    fn test_round_trip_preserves_key_set_and_order() {
        let raw = "alpha=1;Beta=two;GAMMA=3";
        let mut conn = ConnectionString::parse(raw);
        let first = conn.to_string();
        conn.update();
        assert_eq!(conn.to_string(), first);
        let keys: Vec<_> = conn.properties().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["alpha", "Beta", "GAMMA"]);
    }
}
