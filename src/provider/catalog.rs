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

use dashmap::DashMap;
use tracing::debug;

use crate::connection::ConnectionString;
use crate::errors::Result;
use crate::schema::SchemaExecutor;

/// A native driver handle. The execution surface it opens is outside this
/// crate; the schema framework consumes it through [`SchemaExecutor`].
pub trait DbDriver: Send + Sync {
    /// Canonical catalog name, matched against provider candidate lists.
    fn name(&self) -> &'static str;

    fn open(&self, connection: &ConnectionString) -> Result<Arc<dyn SchemaExecutor>>;
}

impl std::fmt::Debug for dyn DbDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbDriver").field("name", &self.name()).finish()
    }
}

/// The set of native drivers the host process has made available. Stands in
/// for runtime driver discovery: hosts register what they linked, providers
/// walk their candidate lists against it.
#[derive(Default)]
pub struct DriverCatalog {
    drivers: DashMap<String, Arc<dyn DbDriver>>,
}

impl DriverCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, driver: Arc<dyn DbDriver>) {
        self.drivers.insert(driver.name().to_ascii_lowercase(), driver);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DbDriver>> {
        self.drivers.get(&name.to_ascii_lowercase()).map(|d| d.value().clone())
    }

    /// Walks the ordered candidate list and returns the first driver
    /// present. A miss is not an error, only the next candidate.
    pub fn resolve(&self, provider: &str, candidates: &[&str]) -> Option<Arc<dyn DbDriver>> {
        for candidate in candidates {
            if let Some(driver) = self.get(candidate) {
                debug!("provider `{}` resolved driver `{}`", provider, candidate);
                return Some(driver);
            }
            debug!(
                "driver candidate `{}` not available for provider `{}`, trying next",
                candidate, provider
            );
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::schema::SchemaRow;
    use crate::types::Value;

    pub struct FakeDriver {
        pub driver_name: &'static str,
    }

    pub struct FakeExecutor;

    #[async_trait::async_trait]
    impl SchemaExecutor for FakeExecutor {
        async fn query(&self, _sql: &str, _params: &[Value]) -> Result<Vec<SchemaRow>> {
            Ok(Vec::new())
        }
    }

    impl DbDriver for FakeDriver {
        fn name(&self) -> &'static str {
            self.driver_name
        }

        fn open(&self, _connection: &ConnectionString) -> Result<Arc<dyn SchemaExecutor>> {
            Ok(Arc::new(FakeExecutor))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeDriver;
    use super::*;

    #[test]
    fn test_resolve_walks_candidates_in_order() {
        let catalog = DriverCatalog::new();
        catalog.register(Arc::new(FakeDriver { driver_name: "odbc" }));

        let driver = catalog.resolve("SqlServer", &["tiberius", "odbc"]).unwrap();
        assert_eq!(driver.name(), "odbc");
    }

    #[test]
    fn test_resolve_misses_are_swallowed() {
        let catalog = DriverCatalog::new();
        assert!(catalog.resolve("Oracle", &["oracle", "odbc"]).is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = DriverCatalog::new();
        catalog.register(Arc::new(FakeDriver { driver_name: "rusqlite" }));
        assert!(catalog.get("RuSqlite").is_some());
    }
}
