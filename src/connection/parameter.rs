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
use crate::connection::{ConnectionProperties, ConnectionString};

/// Alias spellings a vendor accepts for each canonical connection field.
/// Order matters: extraction returns the first spelling present, and
/// write-back updates whichever spelling the caller originally used.
#[derive(Debug, Clone, Copy)]
pub struct ParameterAliases {
    pub server: &'static [&'static str],
    pub database: &'static [&'static str],
    pub user_id: &'static [&'static str],
    pub password: &'static [&'static str],
}

pub const DEFAULT_ALIASES: ParameterAliases = ParameterAliases {
    server: &["data source", "server", "host", "address"],
    database: &["database", "initial catalog", "db name"],
    user_id: &["user id", "uid", "username", "user"],
    password: &["password", "pwd"],
};

/// Vendor-neutral projection of a connection's canonical fields.
/// Purely derived from the property bag, recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionParameter {
    pub server: Option<String>,
    pub database: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
}

impl ConnectionParameter {
    pub fn extract(properties: &ConnectionProperties, aliases: &ParameterAliases) -> Self {
        let get = |names: &[&str]| {
            names
                .split_first()
                .and_then(|(first, rest)| properties.try_get_value(first, rest))
                .map(ToString::to_string)
        };
        ConnectionParameter {
            server: get(aliases.server),
            database: get(aliases.database),
            user_id: get(aliases.user_id),
            password: get(aliases.password),
        }
    }

    /// Writes the present fields back through the alias-tolerant setter and
    /// regenerates the connection text.
    pub fn apply(&self, connection: &mut ConnectionString, aliases: &ParameterAliases) {
        {
            let props = connection.properties_mut();
            let mut set = |value: &Option<String>, names: &[&str]| {
                if let (Some(value), Some((first, rest))) = (value, names.split_first()) {
                    props.try_set_value(value, first, rest);
                }
            };
            set(&self.server, aliases.server);
            set(&self.database, aliases.database);
            set(&self.user_id, aliases.user_id);
            set(&self.password, aliases.password);
        }
        connection.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_through_aliases() {
        let conn = ConnectionString::parse("host=db.local;uid=sa;pwd=secret;database=app");
        let param = ConnectionParameter::extract(conn.properties(), &DEFAULT_ALIASES);
        assert_eq!(param.server.as_deref(), Some("db.local"));
        assert_eq!(param.user_id.as_deref(), Some("sa"));
        assert_eq!(param.password.as_deref(), Some("secret"));
        assert_eq!(param.database.as_deref(), Some("app"));
    }

    #[test]
    fn test_apply_updates_original_spelling() {
        let mut conn = ConnectionString::parse("host=old;uid=sa");
        let param = ConnectionParameter {
            server: Some("new".to_string()),
            user_id: Some("root".to_string()),
            ..Default::default()
        };
        param.apply(&mut conn, &DEFAULT_ALIASES);
        assert_eq!(conn.to_string(), "host=new;uid=root;");
    }
}
