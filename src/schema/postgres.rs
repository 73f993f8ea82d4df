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
    restrictions, row_i64, row_text, Column, Database, RestrictionDictionary, SchemaExecutor,
    SchemaProvider, Table, User, View,
};
use crate::types::Value;

#[derive(Debug, Default)]
pub struct PostgreSqlSchemaProvider;

fn push_filter(sql: &mut String, params: &mut Vec<Value>, column: &str, value: Option<&str>) {
    if let Some(value) = value {
        sql.push_str(&format!(" AND {} = ${}", column, params.len() + 1));
        params.push(Value::from(value));
    }
}

#[async_trait]
impl SchemaProvider for PostgreSqlSchemaProvider {
    async fn databases(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Database>> {
        let mut sql =
            String::from("SELECT datname AS name FROM pg_database WHERE datistemplate = false");
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "datname", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row_text(row, "name").map(|name| Database { name }))
            .collect())
    }

    async fn tables(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Table>> {
        let mut sql = String::from(
            "SELECT table_schema, table_name, table_type FROM information_schema.tables \
             WHERE table_type = 'BASE TABLE' AND table_schema NOT IN ('pg_catalog', 'information_schema')",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "table_schema", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "table_name", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Table {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    name: row_text(row, "table_name")?,
                    table_type: row_text(row, "table_type"),
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
        let mut sql = String::from(
            "SELECT table_schema, table_name, column_name, data_type, character_maximum_length, \
             numeric_precision, numeric_scale, is_nullable, column_default, ordinal_position \
             FROM information_schema.columns WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "table_schema", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "table_name", r.text(restrictions::TABLE));
        push_filter(&mut sql, &mut params, "column_name", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Column {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    table_name: row_text(row, "table_name")?,
                    name: row_text(row, "column_name")?,
                    data_type: row_text(row, "data_type"),
                    length: row_i64(row, "character_maximum_length"),
                    numeric_precision: row_i64(row, "numeric_precision"),
                    numeric_scale: row_i64(row, "numeric_scale"),
                    is_nullable: row_text(row, "is_nullable").as_deref() == Some("YES"),
                    is_primary_key: false,
                    autoincrement: row_text(row, "column_default")
                        .map(|d| d.starts_with("nextval("))
                        .unwrap_or(false),
                    default: row_text(row, "column_default"),
                    description: None,
                    position: row_i64(row, "ordinal_position"),
                })
            })
            .collect())
    }

    async fn views(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<View>> {
        let mut sql = String::from(
            "SELECT table_schema, table_name FROM information_schema.views \
             WHERE table_schema NOT IN ('pg_catalog', 'information_schema')",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "table_schema", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "table_name", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(View {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    name: row_text(row, "table_name")?,
                    description: None,
                })
            })
            .collect())
    }

    async fn users(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<User>> {
        let mut sql = String::from("SELECT usename AS name FROM pg_user WHERE 1 = 1");
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "usename", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row_text(row, "name").map(|name| User { name }))
            .collect())
    }
}
