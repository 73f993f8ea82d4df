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
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::warn;

use crate::errors::{HuskyError, Result};
use crate::provider::config::ProvidersConfig;
use crate::provider::{BuiltInProvider, DriverCatalog, Provider};

/// Builds a provider instance against the shared driver catalog.
pub type ProviderConstructor =
    Arc<dyn Fn(Arc<DriverCatalog>) -> Arc<dyn Provider> + Send + Sync>;

/// Host-supplied overrides consumed once at registry construction:
/// ready-made provider mappings and the constructor table that
/// configuration entries resolve against.
#[derive(Default)]
pub struct ProviderCustomizer {
    mappings: Vec<(String, Arc<dyn Provider>)>,
    constructors: HashMap<String, ProviderConstructor>,
}

impl ProviderCustomizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a logical name directly to an instance. Registered ahead of
    /// everything else, so it shadows config and built-in aliases.
    pub fn map_provider<N: Into<String>>(mut self, name: N, provider: Arc<dyn Provider>) -> Self {
        self.mappings.push((name.into(), provider));
        self
    }

    /// Registers a constructor key that configuration entries can name.
    pub fn register_constructor<N: Into<String>>(
        mut self,
        key: N,
        constructor: ProviderConstructor,
    ) -> Self {
        self.constructors.insert(key.into(), constructor);
        self
    }
}

struct Registration {
    provider: Arc<dyn Provider>,
    aliases: Vec<String>,
}

/// Resolves logical provider names to provider instances.
///
/// An explicit object: constructed once at process start and passed by
/// reference. Registration order is customizer mappings, configuration
/// declarations, then the built-in vendors; the first registration of an
/// alias wins. The alias index is built at most once, on first lookup.
pub struct ProviderRegistry {
    registrations: Vec<Registration>,
    alias_index: OnceCell<HashMap<String, usize>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

impl ProviderRegistry {
    /// Built-in vendors only.
    pub fn new(catalog: Arc<DriverCatalog>) -> Self {
        Self::build(catalog, ProviderCustomizer::default(), None)
            .expect("built-in registration cannot fail")
    }

    /// Customizer mappings first, then configuration declarations, then
    /// built-ins. A configuration entry naming an unknown constructor key
    /// is an error; nothing is silently dropped here.
    pub fn with_customizer(
        catalog: Arc<DriverCatalog>,
        customizer: ProviderCustomizer,
        config: Option<&ProvidersConfig>,
    ) -> Result<Self> {
        Self::build(catalog, customizer, config)
    }

    fn build(
        catalog: Arc<DriverCatalog>,
        customizer: ProviderCustomizer,
        config: Option<&ProvidersConfig>,
    ) -> Result<Self> {
        let mut registrations = Vec::new();

        for (name, provider) in customizer.mappings {
            registrations.push(Registration { aliases: vec![name], provider });
        }

        if let Some(config) = config {
            for declared in &config.providers {
                let constructor =
                    customizer.constructors.get(&declared.constructor).ok_or_else(|| {
                        HuskyError::invalid_config(format!(
                            "custom provider `{}` names unregistered constructor `{}`",
                            declared.name, declared.constructor
                        ))
                    })?;
                let provider = constructor(catalog.clone());
                let mut aliases = vec![declared.name.clone()];
                aliases.extend(declared.aliases.iter().cloned());
                registrations.push(Registration { aliases, provider });
            }
        }

        for provider in BuiltInProvider::built_ins(&catalog) {
            let aliases = provider.aliases().iter().map(|a| a.to_string()).collect();
            registrations.push(Registration { provider, aliases });
        }

        Ok(Self { registrations, alias_index: OnceCell::new() })
    }

    /// Lowercase alias → registration position. Populated at most once;
    /// concurrent first callers block briefly on the cell, everyone after
    /// reads lock-free.
    fn alias_index(&self) -> &HashMap<String, usize> {
        self.alias_index.get_or_init(|| {
            let mut index = HashMap::new();
            for (position, registration) in self.registrations.iter().enumerate() {
                for alias in &registration.aliases {
                    let key = alias.to_ascii_lowercase();
                    if index.contains_key(&key) {
                        warn!("provider alias `{}` already registered, keeping the first", alias);
                        continue;
                    }
                    index.insert(key, position);
                }
            }
            index
        })
    }

    /// Returns the provider registered under any of its aliases, matched
    /// case-insensitively, else `None`.
    pub fn get_defined_provider_instance(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.alias_index()
            .get(&name.to_ascii_lowercase())
            .map(|&position| self.registrations[position].provider.clone())
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.provider.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_alias_resolution() {
        let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));

        let provider = registry.get_defined_provider_instance("mssql").unwrap();
        assert_eq!(provider.name(), "SqlServer");
        let provider = registry.get_defined_provider_instance("POSTGRES").unwrap();
        assert_eq!(provider.name(), "PostgreSql");
        assert!(registry.get_defined_provider_instance("nosuch").is_none());
    }

    #[test]
    fn test_customizer_mapping_shadows_built_in() {
        let catalog = Arc::new(DriverCatalog::new());
        let custom: Arc<dyn Provider> = Arc::new(BuiltInProvider::my_sql(catalog.clone()));
        let customizer = ProviderCustomizer::new().map_provider("SqlServer", custom);

        let registry = ProviderRegistry::with_customizer(catalog, customizer, None).unwrap();
        let provider = registry.get_defined_provider_instance("sqlserver").unwrap();
        assert_eq!(provider.name(), "MySql");
        // The built-in stays reachable through its other aliases.
        let provider = registry.get_defined_provider_instance("mssql").unwrap();
        assert_eq!(provider.name(), "SqlServer");
    }

    #[test]
    fn test_config_declared_provider() {
        let catalog = Arc::new(DriverCatalog::new());
        let customizer = ProviderCustomizer::new().register_constructor(
            "mysql_like",
            Arc::new(|catalog| Arc::new(BuiltInProvider::my_sql(catalog)) as Arc<dyn Provider>),
        );
        let config = ProvidersConfig::from_json(
            r#"{ "providers": [ { "name": "TiDb", "type": "mysql_like", "aliases": ["Ti"] } ] }"#,
        )
        .unwrap();

        let registry =
            ProviderRegistry::with_customizer(catalog, customizer, Some(&config)).unwrap();
        assert!(registry.get_defined_provider_instance("tidb").is_some());
        assert!(registry.get_defined_provider_instance("ti").is_some());
    }

    #[test]
    fn test_unknown_constructor_key_is_config_error() {
        let catalog = Arc::new(DriverCatalog::new());
        let config = ProvidersConfig::from_json(
            r#"{ "providers": [ { "name": "TiDb", "type": "missing" } ] }"#,
        )
        .unwrap();

        let err = ProviderRegistry::with_customizer(
            catalog,
            ProviderCustomizer::new(),
            Some(&config),
        )
        .unwrap_err();
        assert!(matches!(err, HuskyError::InvalidConfig(_)));
    }
}
