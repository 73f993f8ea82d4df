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

use crate::errors::Result;
use crate::schema::{
    restrictions, row_bool, row_i64, row_text, Column, Index, RestrictionDictionary,
    SchemaExecutor, SchemaProvider, Table, View,
};
use crate::types::Value;

/// sqlite_master plus PRAGMA calls. Column and index enumeration need a
/// table restriction; without one there is nothing to PRAGMA against and
/// the result is empty.
#[derive(Debug, Default)]
pub struct SqliteSchemaProvider;

#[async_trait]
impl SchemaProvider for SqliteSchemaProvider {
    async fn tables(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Table>> {
        let mut sql = String::from(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        );
        let mut params = Vec::new();
        if let Some(name) = r.text(restrictions::NAME) {
            sql.push_str(" AND name = ?");
            params.push(Value::from(name));
        }

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Table {
                    catalog: None,
                    schema: None,
                    name: row_text(row, "name")?,
                    table_type: Some("BASE TABLE".to_string()),
                    description: None,
                })
            })
            .collect())
    }

    async fn columns(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Column>> {
        let Some(table) = r.text(restrictions::TABLE) else {
            return Ok(Vec::new());
        };
        let sql = format!("PRAGMA table_info('{}')", table);
        let rows = executor.query(&sql, &[]).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Column {
                    catalog: None,
                    schema: None,
                    table_name: table.to_string(),
                    name: row_text(row, "name")?,
                    data_type: row_text(row, "type"),
                    length: None,
                    numeric_precision: None,
                    numeric_scale: None,
                    is_nullable: !row_bool(row, "notnull"),
                    is_primary_key: row_bool(row, "pk"),
                    autoincrement: false,
                    default: row_text(row, "dflt_value"),
                    description: None,
                    position: row_i64(row, "cid").map(|p| p + 1),
                })
            })
            .collect())
    }

    async fn views(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<View>> {
        let mut sql = String::from("SELECT name FROM sqlite_master WHERE type = 'view'");
        let mut params = Vec::new();
        if let Some(name) = r.text(restrictions::NAME) {
            sql.push_str(" AND name = ?");
            params.push(Value::from(name));
        }

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(View {
                    catalog: None,
                    schema: None,
                    name: row_text(row, "name")?,
                    description: None,
                })
            })
            .collect())
    }

    async fn indexes(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Index>> {
        let mut sql = String::from(
            "SELECT name, tbl_name FROM sqlite_master WHERE type = 'index'",
        );
        let mut params = Vec::new();
        if let Some(table) = r.text(restrictions::TABLE) {
            sql.push_str(" AND tbl_name = ?");
            params.push(Value::from(table));
        }

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Index {
                    catalog: None,
                    schema: None,
                    table_name: row_text(row, "tbl_name")?,
                    name: row_text(row, "name")?,
                    is_unique: false,
                    is_primary: false,
                })
            })
            .collect())
    }
}
