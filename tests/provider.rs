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
//! Provider resolution and schema dispatch.
//!
use std::sync::Arc;

use async_trait::async_trait;
use husky::schema::{self, restrictions, MetadataCollection, SchemaRow, Table};
use husky::{
    ConnectionString, DbDriver, DriverCatalog, HuskyError, ProviderRegistry, RestrictionDictionary,
    SchemaExecutor, Value,
};

struct StubDriver(&'static str);

struct StubExecutor;

#[async_trait]
impl SchemaExecutor for StubExecutor {
    async fn query(&self, sql: &str, _params: &[Value]) -> husky::Result<Vec<SchemaRow>> {
        let mut row = SchemaRow::new();
        if sql.contains("INFORMATION_SCHEMA.TABLES") {
            row.insert("table_schema".into(), Value::from("app"));
            row.insert("table_name".into(), Value::from("t_user"));
            row.insert("table_type".into(), Value::from("BASE TABLE"));
            row.insert("table_comment".into(), Value::from("users"));
        }
        Ok(vec![row])
    }
}

impl DbDriver for StubDriver {
    fn name(&self) -> &'static str {
        self.0
    }

    fn open(&self, _connection: &ConnectionString) -> husky::Result<Arc<dyn SchemaExecutor>> {
        Ok(Arc::new(StubExecutor))
    }
}

#[test]
fn driver_resolution_walks_candidates_and_defers_failure() {
    // Empty catalog: every candidate misses, construction still succeeds.
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let provider = registry.get_defined_provider_instance("MySql").unwrap();
    assert_eq!(
        provider.driver().unwrap_err(),
        HuskyError::missing_driver("MySql")
    );

    // Only the second candidate is present; resolution falls through to it.
    let catalog = Arc::new(DriverCatalog::new());
    catalog.register(Arc::new(StubDriver("mysql-async")));
    let registry = ProviderRegistry::new(catalog);
    let provider = registry.get_defined_provider_instance("MySql").unwrap();
    assert_eq!(provider.driver().unwrap().name(), "mysql-async");
}

#[test]
fn alias_lookup_is_case_insensitive_across_all_built_ins() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    for (alias, expected) in [
        ("sqlserver", "SqlServer"),
        ("MSSQL", "SqlServer"),
        ("mariadb", "MySql"),
        ("npgsql", "PostgreSql"),
        ("sqlite3", "SQLite"),
        ("fb", "Firebird"),
        ("dm", "Dameng"),
        ("kdb", "Kingbase"),
        ("oscar", "ShenTong"),
        ("odbc", "OleDb"),
    ] {
        let provider = registry.get_defined_provider_instance(alias).unwrap();
        assert_eq!(provider.name(), expected, "alias {}", alias);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn schema_dispatch_reaches_the_vendor_query() {
    let catalog = Arc::new(DriverCatalog::new());
    catalog.register(Arc::new(StubDriver("mysql")));
    let registry = ProviderRegistry::new(catalog);
    let provider = registry.get_defined_provider_instance("MySql").unwrap();

    let conn = ConnectionString::parse("server=localhost;uid=root");
    let executor = provider.driver().unwrap().open(&conn).unwrap();

    let tables: Vec<Table> = schema::get_schemas(
        provider.schema().as_ref(),
        executor.as_ref(),
        RestrictionDictionary::new().with(restrictions::SCHEMA, "app"),
    )
    .await
    .unwrap();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "t_user");
    assert_eq!(tables[0].schema.as_deref(), Some("app"));
}

#[tokio::test(flavor = "current_thread")]
async fn vendors_without_schema_support_degrade_to_empty() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let provider = registry.get_defined_provider_instance("OleDb").unwrap();

    let tables: Vec<Table> = schema::get_schemas(
        provider.schema().as_ref(),
        &StubExecutor,
        RestrictionDictionary::new(),
    )
    .await
    .unwrap();
    assert!(tables.is_empty());

    // The collection inventory is still answered by the default.
    let collections: Vec<MetadataCollection> = schema::get_schemas(
        provider.schema().as_ref(),
        &StubExecutor,
        RestrictionDictionary::new(),
    )
    .await
    .unwrap();
    assert!(collections.iter().any(|c| c.collection_name == "ReservedWords"));
}
