// Copyright (c) 2021 husky contributors
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! This crate offers:
//!
//! *   A provider abstraction over heterogeneous RDBMS back ends;
//! *   Per-vendor SQL dialect tables (string / datetime / math operations,
//!     paging, type conversion, column DDL);
//! *   A quote-aware connection-string parser with alias-tolerant
//!     properties and directory macros;
//! *   A restriction-driven schema metadata framework.
//!
//! The crate never executes SQL itself. Callers hand the composed
//! fragments to their own command layer, and the schema framework queries
//! through an injected [`SchemaExecutor`](schema::SchemaExecutor).
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use husky::{ConnectionString, DriverCatalog, ProviderRegistry, Segment};
//!
//! let conn = ConnectionString::parse(
//!     "data source=myserver;user id=sa;password=pwd;Provider Type=MySql",
//! );
//! assert_eq!(conn.provider_type(), Some("MySql"));
//! // The reserved key never reaches the native driver.
//! assert_eq!(conn.to_string(), "data source=myserver;user id=sa;password=pwd;");
//!
//! let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
//! let provider = registry
//!     .get_defined_provider_instance(conn.provider_type().unwrap())
//!     .unwrap();
//!
//! let parameter = provider.connection_parameter(conn.properties());
//! assert_eq!(parameter.server.as_deref(), Some("myserver"));
//!
//! let syntax = provider.syntax();
//! let paged = syntax
//!     .segment("SELECT * FROM `t_user`", &Segment::page(2, 10))
//!     .unwrap();
//! assert_eq!(paged, "SELECT * FROM `t_user` LIMIT 10 OFFSET 10");
//! ```
mod errors;
mod types;

pub mod connection;
pub mod provider;
pub mod schema;
pub mod syntax;

#[doc(inline)]
pub use connection::{
    set_data_directory, ConnectionParameter, ConnectionProperties, ConnectionString,
    ParameterAliases,
};
#[doc(inline)]
pub use errors::{HuskyError, Result};
#[doc(inline)]
pub use provider::{
    DbDriver, DriverCatalog, Provider, ProviderCustomizer, ProviderRegistry, ProvidersConfig,
};
#[doc(inline)]
pub use schema::{get_schemas, RestrictionDictionary, SchemaExecutor, SchemaProvider};
#[doc(inline)]
pub use syntax::{DateTimeSyntax, MathSyntax, Segment, StringSyntax, SyntaxProvider};
#[doc(inline)]
pub use types::{DbType, Value};
