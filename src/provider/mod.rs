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
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::connection::{
    ConnectionParameter, ConnectionProperties, ConnectionString, ParameterAliases, DEFAULT_ALIASES,
};
use crate::errors::{HuskyError, Result};
use crate::schema::{
    EmptySchemaProvider, MySqlSchemaProvider, PostgreSqlSchemaProvider, SchemaProvider,
    SqlServerSchemaProvider, SqliteSchemaProvider,
};
use crate::syntax::{
    DamengSyntax, FirebirdSyntax, KingbaseSyntax, MySqlSyntax, OleDbSyntax, OracleSyntax,
    PostgreSqlSyntax, ShenTongSyntax, SqlServerSyntax, SqliteSyntax, SyntaxProvider,
};

mod catalog;
mod config;
mod registry;

pub use catalog::{DbDriver, DriverCatalog};
pub use config::{CustomProviderConfig, ProvidersConfig};
pub use registry::{ProviderConstructor, ProviderCustomizer, ProviderRegistry};

/// One database vendor: alias set, driver candidates, and the per-vendor
/// services. Constructed once and immutable afterwards, except the lazily
/// resolved driver slot.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Logical names this provider answers to, matched case-insensitively.
    fn aliases(&self) -> &[&str];

    /// Ordered driver names tried against the catalog; first hit wins.
    fn driver_candidates(&self) -> &[&str];

    /// Resolves the driver lazily. Candidate misses were swallowed at
    /// resolution time; only this call surfaces the missing-driver error.
    fn driver(&self) -> Result<Arc<dyn DbDriver>>;

    fn syntax(&self) -> Arc<dyn SyntaxProvider>;

    fn schema(&self) -> Arc<dyn SchemaProvider>;

    fn parameter_aliases(&self) -> &ParameterAliases {
        &DEFAULT_ALIASES
    }

    /// Projects the canonical connection fields through this vendor's alias
    /// sets. Derived on every call, never cached.
    fn connection_parameter(&self, properties: &ConnectionProperties) -> ConnectionParameter {
        ConnectionParameter::extract(properties, self.parameter_aliases())
    }

    /// Writes canonical fields back into the connection, preserving the
    /// caller's original spellings.
    fn update_parameter(&self, connection: &mut ConnectionString, parameter: &ConnectionParameter) {
        parameter.apply(connection, self.parameter_aliases());
    }
}

/// Lazy driver resolution shared by the built-in providers: an injected
/// handle wins, then the catalog walk, resolved at most once.
pub struct DriverSlot {
    catalog: Arc<DriverCatalog>,
    injected: Option<Arc<dyn DbDriver>>,
    resolved: OnceCell<Option<Arc<dyn DbDriver>>>,
}

impl DriverSlot {
    pub fn new(catalog: Arc<DriverCatalog>) -> Self {
        Self { catalog, injected: None, resolved: OnceCell::new() }
    }

    pub fn with_injected(catalog: Arc<DriverCatalog>, driver: Arc<dyn DbDriver>) -> Self {
        Self { catalog, injected: Some(driver), resolved: OnceCell::new() }
    }

    fn resolve(&self, provider: &str, candidates: &[&str]) -> Result<Arc<dyn DbDriver>> {
        self.resolved
            .get_or_init(|| {
                self.injected
                    .clone()
                    .or_else(|| self.catalog.resolve(provider, candidates))
            })
            .clone()
            .ok_or_else(|| HuskyError::missing_driver(provider))
    }
}

const ORACLE_ALIASES: ParameterAliases = ParameterAliases {
    server: &["data source", "server", "host"],
    database: &["service name", "database", "sid"],
    user_id: &["user id", "uid", "username", "user"],
    password: &["password", "pwd"],
};

const SQLITE_ALIASES: ParameterAliases = ParameterAliases {
    server: &[],
    database: &["data source", "database", "file name"],
    user_id: &["user id", "uid"],
    password: &["password", "pwd"],
};

/// A built-in vendor definition. The ten stock providers are constructor
/// functions over this one shape.
pub struct BuiltInProvider {
    name: &'static str,
    aliases: &'static [&'static str],
    candidates: &'static [&'static str],
    parameter_aliases: ParameterAliases,
    syntax: Arc<dyn SyntaxProvider>,
    schema: Arc<dyn SchemaProvider>,
    driver: DriverSlot,
}

impl Provider for BuiltInProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        self.aliases
    }

    fn driver_candidates(&self) -> &[&str] {
        self.candidates
    }

    fn driver(&self) -> Result<Arc<dyn DbDriver>> {
        self.driver.resolve(self.name, self.candidates)
    }

    fn syntax(&self) -> Arc<dyn SyntaxProvider> {
        self.syntax.clone()
    }

    fn schema(&self) -> Arc<dyn SchemaProvider> {
        self.schema.clone()
    }

    fn parameter_aliases(&self) -> &ParameterAliases {
        &self.parameter_aliases
    }
}

impl BuiltInProvider {
    pub fn sql_server(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "SqlServer",
            aliases: &["SqlServer", "MsSql", "SqlClient"],
            candidates: &["tiberius", "odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(SqlServerSyntax::default()),
            schema: Arc::new(SqlServerSchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn oracle(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "Oracle",
            aliases: &["Oracle", "Odp"],
            candidates: &["oracle", "odbc"],
            parameter_aliases: ORACLE_ALIASES,
            syntax: Arc::new(OracleSyntax::default()),
            schema: Arc::new(EmptySchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn my_sql(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "MySql",
            aliases: &["MySql", "MariaDb"],
            candidates: &["mysql", "mysql-async"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(MySqlSyntax::default()),
            schema: Arc::new(MySqlSchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn postgre_sql(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "PostgreSql",
            aliases: &["PostgreSql", "Postgres", "Npgsql"],
            candidates: &["postgres", "tokio-postgres"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(PostgreSqlSyntax::default()),
            schema: Arc::new(PostgreSqlSchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn sqlite(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "SQLite",
            aliases: &["SQLite", "Sqlite3"],
            candidates: &["rusqlite", "sqlite"],
            parameter_aliases: SQLITE_ALIASES,
            syntax: Arc::new(SqliteSyntax::default()),
            schema: Arc::new(SqliteSchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn firebird(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "Firebird",
            aliases: &["Firebird", "Fb"],
            candidates: &["rsfbclient", "odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(FirebirdSyntax::default()),
            schema: Arc::new(EmptySchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn dameng(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "Dameng",
            aliases: &["Dameng", "DM"],
            candidates: &["dmdb", "odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(DamengSyntax::default()),
            schema: Arc::new(EmptySchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn kingbase(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "Kingbase",
            aliases: &["Kingbase", "KingbaseES", "Kdb"],
            candidates: &["kingbase", "odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(KingbaseSyntax::default()),
            schema: Arc::new(PostgreSqlSchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn shen_tong(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "ShenTong",
            aliases: &["ShenTong", "Oscar"],
            candidates: &["oscar", "odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(ShenTongSyntax::default()),
            schema: Arc::new(EmptySchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub fn ole_db(catalog: Arc<DriverCatalog>) -> Self {
        Self {
            name: "OleDb",
            aliases: &["OleDb", "Odbc"],
            candidates: &["odbc"],
            parameter_aliases: DEFAULT_ALIASES,
            syntax: Arc::new(OleDbSyntax::default()),
            schema: Arc::new(EmptySchemaProvider),
            driver: DriverSlot::new(catalog),
        }
    }

    pub(crate) fn built_ins(catalog: &Arc<DriverCatalog>) -> Vec<Arc<dyn Provider>> {
        vec![
            Arc::new(Self::sql_server(catalog.clone())),
            Arc::new(Self::oracle(catalog.clone())),
            Arc::new(Self::my_sql(catalog.clone())),
            Arc::new(Self::postgre_sql(catalog.clone())),
            Arc::new(Self::sqlite(catalog.clone())),
            Arc::new(Self::firebird(catalog.clone())),
            Arc::new(Self::dameng(catalog.clone())),
            Arc::new(Self::kingbase(catalog.clone())),
            Arc::new(Self::shen_tong(catalog.clone())),
            Arc::new(Self::ole_db(catalog.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::catalog::testing::FakeDriver;

    #[test]
    fn test_driver_failure_is_deferred_to_first_use() {
        let catalog = Arc::new(DriverCatalog::new());
        let provider = BuiltInProvider::oracle(catalog.clone());

        // Construction succeeded with an empty catalog; only use fails.
        let err = provider.driver().unwrap_err();
        assert_eq!(err, HuskyError::missing_driver("Oracle"));

        // Registering afterwards does not help: resolution ran once.
        catalog.register(Arc::new(FakeDriver { driver_name: "oracle" }));
        assert!(provider.driver().is_err());
    }

    #[test]
    fn test_injected_driver_wins_over_catalog() {
        let catalog = Arc::new(DriverCatalog::new());
        catalog.register(Arc::new(FakeDriver { driver_name: "mysql" }));
        let mut provider = BuiltInProvider::my_sql(catalog.clone());
        provider.driver =
            DriverSlot::with_injected(catalog, Arc::new(FakeDriver { driver_name: "custom" }));

        assert_eq!(provider.driver().unwrap().name(), "custom");
    }

    #[test]
    fn test_connection_parameter_uses_vendor_aliases() {
        let catalog = Arc::new(DriverCatalog::new());
        let provider = BuiltInProvider::oracle(catalog);
        let conn = ConnectionString::parse("data source=dbhost;service name=ORCL;uid=scott;pwd=tiger");

        let param = provider.connection_parameter(conn.properties());
        assert_eq!(param.server.as_deref(), Some("dbhost"));
        assert_eq!(param.database.as_deref(), Some("ORCL"));
        assert_eq!(param.user_id.as_deref(), Some("scott"));
    }
}
