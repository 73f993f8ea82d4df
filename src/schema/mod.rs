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
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::{DbType, Value};

mod mssql;
mod mysql;
mod postgres;
mod sqlite;

pub use mssql::SqlServerSchemaProvider;
pub use mysql::MySqlSchemaProvider;
pub use postgres::PostgreSqlSchemaProvider;
pub use sqlite::SqliteSchemaProvider;

/// One metadata result row, column name to scalar value.
pub type SchemaRow = IndexMap<String, Value>;

/// The I/O boundary the schema framework queries through. Implemented by
/// whatever native driver the host wired up; cancellation lives behind this
/// trait, the framework itself never suspends elsewhere.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<SchemaRow>>;
}

/// Well-known restriction names.
pub mod restrictions {
    pub const CATALOG: &str = "catalog";
    pub const SCHEMA: &str = "schema";
    pub const NAME: &str = "name";
    pub const TABLE: &str = "table";
    pub const COLUMN: &str = "column";
    pub const TYPE: &str = "type";
}

/// Transient name→value map narrowing one metadata query. Absent members
/// are simply never inserted; there is no error path for an unknown name,
/// vendors read the names they understand and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct RestrictionDictionary {
    values: IndexMap<String, Value>,
}

impl RestrictionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Inserts only when the value is present.
    pub fn with_opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The closed metadata entity set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaCategory {
    Database,
    DataType,
    Table,
    Column,
    View,
    ViewColumn,
    Index,
    IndexColumn,
    Procedure,
    ProcedureParameter,
    ForeignKey,
    User,
    MetadataCollection,
    ReservedWord,
}

impl SchemaCategory {
    pub const ALL: &'static [SchemaCategory] = &[
        SchemaCategory::Database,
        SchemaCategory::DataType,
        SchemaCategory::Table,
        SchemaCategory::Column,
        SchemaCategory::View,
        SchemaCategory::ViewColumn,
        SchemaCategory::Index,
        SchemaCategory::IndexColumn,
        SchemaCategory::Procedure,
        SchemaCategory::ProcedureParameter,
        SchemaCategory::ForeignKey,
        SchemaCategory::User,
        SchemaCategory::MetadataCollection,
        SchemaCategory::ReservedWord,
    ];

    pub fn collection_name(&self) -> &'static str {
        match self {
            SchemaCategory::Database => "Databases",
            SchemaCategory::DataType => "DataTypes",
            SchemaCategory::Table => "Tables",
            SchemaCategory::Column => "Columns",
            SchemaCategory::View => "Views",
            SchemaCategory::ViewColumn => "ViewColumns",
            SchemaCategory::Index => "Indexes",
            SchemaCategory::IndexColumn => "IndexColumns",
            SchemaCategory::Procedure => "Procedures",
            SchemaCategory::ProcedureParameter => "ProcedureParameters",
            SchemaCategory::ForeignKey => "ForeignKeys",
            SchemaCategory::User => "Users",
            SchemaCategory::MetadataCollection => "MetadataCollections",
            SchemaCategory::ReservedWord => "ReservedWords",
        }
    }

    pub fn restriction_count(&self) -> usize {
        match self {
            SchemaCategory::Database | SchemaCategory::User | SchemaCategory::DataType => 1,
            SchemaCategory::MetadataCollection | SchemaCategory::ReservedWord => 0,
            SchemaCategory::Table | SchemaCategory::View | SchemaCategory::Procedure => 3,
            SchemaCategory::Column
            | SchemaCategory::ViewColumn
            | SchemaCategory::Index
            | SchemaCategory::IndexColumn
            | SchemaCategory::ProcedureParameter
            | SchemaCategory::ForeignKey => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub type_name: String,
    pub db_type: Option<DbType>,
    pub create_format: Option<String>,
    pub max_length: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub table_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
    pub name: String,
    pub data_type: Option<String>,
    pub length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub numeric_scale: Option<i64>,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub autoincrement: bool,
    pub default: Option<String>,
    pub description: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewColumn {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub view_name: String,
    pub name: String,
    pub data_type: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
    pub name: String,
    pub is_unique: bool,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
    pub index_name: String,
    pub column_name: String,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub procedure_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcedureParameter {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub procedure_name: String,
    pub name: String,
    pub direction: Option<String>,
    pub data_type: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub table_name: String,
    pub column_name: String,
    pub pk_table: String,
    pub pk_column: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataCollection {
    pub collection_name: String,
    pub number_of_restrictions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservedWord {
    pub word: String,
}

/// Vendor-overridable metadata enumeration. A method a vendor does not
/// override yields an empty collection, never an error; missing schema
/// support degrades instead of failing.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn databases(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Database>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn data_types(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<DataType>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn tables(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Table>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn columns(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Column>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn views(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<View>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn view_columns(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<ViewColumn>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn indexes(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Index>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn index_columns(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<IndexColumn>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn procedures(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Procedure>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn procedure_parameters(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<ProcedureParameter>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn foreign_keys(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<ForeignKey>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn users(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<User>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }

    async fn metadata_collections(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<MetadataCollection>> {
        let _ = (executor, restrictions);
        Ok(SchemaCategory::ALL
            .iter()
            .map(|category| MetadataCollection {
                collection_name: category.collection_name().to_string(),
                number_of_restrictions: category.restriction_count(),
            })
            .collect())
    }

    async fn reserved_words(
        &self,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<ReservedWord>> {
        let _ = (executor, restrictions);
        Ok(Vec::new())
    }
}

/// A vendor without any metadata support; every collection is empty.
#[derive(Debug, Default)]
pub struct EmptySchemaProvider;

impl SchemaProvider for EmptySchemaProvider {}

mod sealed {
    pub trait Sealed {}
}

/// Static-type dispatch for [`get_schemas`]. Sealed: the entity set is
/// closed, a type outside it cannot ask for schemas at all.
#[async_trait]
pub trait SchemaEntity: sealed::Sealed + Sized + Send {
    fn category() -> SchemaCategory;

    async fn fetch(
        provider: &dyn SchemaProvider,
        executor: &dyn SchemaExecutor,
        restrictions: &RestrictionDictionary,
    ) -> Result<Vec<Self>>;
}

/// Dispatches on the static entity type to the matching vendor method.
pub async fn get_schemas<T: SchemaEntity>(
    provider: &dyn SchemaProvider,
    executor: &dyn SchemaExecutor,
    restrictions: RestrictionDictionary,
) -> Result<Vec<T>> {
    T::fetch(provider, executor, &restrictions).await
}

macro_rules! schema_entity {
    ($entity:ident, $category:ident, $method:ident) => {
        impl sealed::Sealed for $entity {}

        #[async_trait]
        impl SchemaEntity for $entity {
            fn category() -> SchemaCategory {
                SchemaCategory::$category
            }

            async fn fetch(
                provider: &dyn SchemaProvider,
                executor: &dyn SchemaExecutor,
                restrictions: &RestrictionDictionary,
            ) -> Result<Vec<Self>> {
                provider.$method(executor, restrictions).await
            }
        }
    };
}

schema_entity!(Database, Database, databases);
schema_entity!(DataType, DataType, data_types);
schema_entity!(Table, Table, tables);
schema_entity!(Column, Column, columns);
schema_entity!(View, View, views);
schema_entity!(ViewColumn, ViewColumn, view_columns);
schema_entity!(Index, Index, indexes);
schema_entity!(IndexColumn, IndexColumn, index_columns);
schema_entity!(Procedure, Procedure, procedures);
schema_entity!(ProcedureParameter, ProcedureParameter, procedure_parameters);
schema_entity!(ForeignKey, ForeignKey, foreign_keys);
schema_entity!(User, User, users);
schema_entity!(MetadataCollection, MetadataCollection, metadata_collections);
schema_entity!(ReservedWord, ReservedWord, reserved_words);

pub(crate) fn row_text(row: &SchemaRow, key: &str) -> Option<String> {
    row.get(key).and_then(|v| match v {
        Value::Text(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        _ => None,
    })
}

pub(crate) fn row_i64(row: &SchemaRow, key: &str) -> Option<i64> {
    row.get(key).and_then(Value::as_int)
}

pub(crate) fn row_bool(row: &SchemaRow, key: &str) -> bool {
    row.get(key).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopExecutor;

    #[async_trait]
    impl SchemaExecutor for NoopExecutor {
        async fn query(&self, _sql: &str, _params: &[Value]) -> Result<Vec<SchemaRow>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unsupported_collections_come_back_empty() {
        let provider = EmptySchemaProvider;
        let tables: Vec<Table> =
            get_schemas(&provider, &NoopExecutor, RestrictionDictionary::new()).await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_metadata_collections_enumerate_the_closed_set() {
        let provider = EmptySchemaProvider;
        let collections: Vec<MetadataCollection> =
            get_schemas(&provider, &NoopExecutor, RestrictionDictionary::new()).await.unwrap();
        assert_eq!(collections.len(), SchemaCategory::ALL.len());
        assert!(collections.iter().any(|c| c.collection_name == "Tables" && c.number_of_restrictions == 3));
    }

    #[test]
    fn test_restrictions_skip_absent_members() {
        let r = RestrictionDictionary::new()
            .with(restrictions::NAME, "t_user")
            .with_opt::<&str>(restrictions::SCHEMA, None);
        assert_eq!(r.len(), 1);
        assert_eq!(r.text(restrictions::NAME), Some("t_user"));
    }
}
