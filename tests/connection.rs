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

//!
//! Connection string round-trip behavior.
//!
use std::sync::Arc;

use husky::{ConnectionString, DriverCatalog, ProviderRegistry};

#[test]
fn parse_resolves_provider_and_omits_reserved_keys() {
    let conn = ConnectionString::parse(
        "data source=myserver;user id=sa;password=pwd;Provider Type=MySql",
    );

    assert_eq!(conn.provider_type(), Some("MySql"));
    assert_eq!(conn.to_string(), "data source=myserver;user id=sa;password=pwd;");

    // Alias-tolerant lookup finds the value whichever spelling was used.
    let server = conn
        .properties()
        .try_get_value("server", &["data source", "host"])
        .unwrap();
    assert_eq!(server, "myserver");

    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let provider = registry
        .get_defined_provider_instance(conn.provider_type().unwrap())
        .unwrap();
    assert_eq!(provider.name(), "MySql");

    let parameter = provider.connection_parameter(conn.properties());
    assert_eq!(parameter.server.as_deref(), Some("myserver"));
    assert_eq!(parameter.user_id.as_deref(), Some("sa"));
    assert_eq!(parameter.password.as_deref(), Some("pwd"));
}

#[test]
fn round_trip_reproduces_non_customized_key_set() {
    let raw = "server=db1;database=app;uid=sa;tracking=true;version=5.7";
    let mut conn = ConnectionString::parse(raw);

    assert!(conn.is_tracking());
    assert_eq!(conn.version(), Some("5.7"));

    let rendered = conn.to_string();
    assert_eq!(rendered, "server=db1;database=app;uid=sa;");

    // A second parse of the rendered text reaches the same fixed point.
    let reparsed = ConnectionString::parse(&rendered);
    assert_eq!(reparsed.to_string(), rendered);

    // update() rebuilds from the bag, reserved keys still excluded.
    conn.update();
    assert_eq!(conn.to_string(), rendered);
}

#[test]
fn exactly_one_alias_spelling_survives_parsing() {
    let conn = ConnectionString::parse("uid=sa;server=x");
    let props = conn.properties();

    assert!(props.try_get_value("user id", &["uid", "username"]).is_some());
    assert!(props.contains_key("uid"));
    assert!(!props.contains_key("user id"));
    assert!(!props.contains_key("username"));
}

#[test]
fn parameter_write_back_preserves_spelling_and_rebuilds_text() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let provider = registry.get_defined_provider_instance("SqlServer").unwrap();

    let mut conn = ConnectionString::parse("server=old;uid=sa;pwd=secret");
    let mut parameter = provider.connection_parameter(conn.properties());
    parameter.server = Some("new-host".to_string());
    provider.update_parameter(&mut conn, &parameter);

    assert_eq!(conn.to_string(), "server=new-host;uid=sa;pwd=secret;");
}

#[test]
fn unresolvable_macro_token_stays_literal() {
    let conn = ConnectionString::parse("data source=|BogusFolder|db.sqlite;mode=ro");
    assert_eq!(
        conn.properties().try_get_value("data source", &[]),
        Some("|BogusFolder|db.sqlite")
    );
    // The rest of the string is unaffected by the soft failure.
    assert_eq!(conn.properties().try_get_value("mode", &[]), Some("ro"));
}

#[test]
fn data_directory_macro_resolves_against_override() {
    let dir = tempfile::tempdir().unwrap();
    husky::set_data_directory(dir.path());

    let conn = ConnectionString::parse("data source=|datadirectory|store/app.db");
    let resolved = conn.properties().try_get_value("data source", &[]).unwrap();
    assert_eq!(
        resolved,
        dir.path().join("store/app.db").to_string_lossy()
    );
}
