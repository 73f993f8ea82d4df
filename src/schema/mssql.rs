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
    restrictions, row_i64, row_text, Column, Database, Procedure, RestrictionDictionary,
    SchemaExecutor, SchemaProvider, Table, View,
};
use crate::types::Value;

#[derive(Debug, Default)]
pub struct SqlServerSchemaProvider;

fn push_filter(sql: &mut String, params: &mut Vec<Value>, column: &str, value: Option<&str>) {
    if let Some(value) = value {
        sql.push_str(&format!(" AND {} = @p{}", column, params.len() + 1));
        params.push(Value::from(value));
    }
}

#[async_trait]
impl SchemaProvider for SqlServerSchemaProvider {
    async fn databases(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Database>> {
        let mut sql = String::from("SELECT name FROM sys.databases WHERE 1 = 1");
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "name", r.text(restrictions::NAME));

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
            "SELECT TABLE_CATALOG AS table_catalog, TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name, \
             TABLE_TYPE AS table_type FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_TYPE = 'BASE TABLE'",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Table {
                    catalog: row_text(row, "table_catalog"),
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
            "SELECT TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
             DATA_TYPE AS data_type, CHARACTER_MAXIMUM_LENGTH AS char_length, NUMERIC_PRECISION AS num_precision, \
             NUMERIC_SCALE AS num_scale, IS_NULLABLE AS is_nullable, COLUMN_DEFAULT AS column_default, \
             ORDINAL_POSITION AS ordinal_position FROM INFORMATION_SCHEMA.COLUMNS WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::TABLE));
        push_filter(&mut sql, &mut params, "COLUMN_NAME", r.text(restrictions::NAME));

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
                    length: row_i64(row, "char_length"),
                    numeric_precision: row_i64(row, "num_precision"),
                    numeric_scale: row_i64(row, "num_scale"),
                    is_nullable: row_text(row, "is_nullable").as_deref() == Some("YES"),
                    is_primary_key: false,
                    autoincrement: false,
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
            "SELECT TABLE_CATALOG AS table_catalog, TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name \
             FROM INFORMATION_SCHEMA.VIEWS WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(View {
                    catalog: row_text(row, "table_catalog"),
                    schema: row_text(row, "table_schema"),
                    name: row_text(row, "table_name")?,
                    description: None,
                })
            })
            .collect())
    }

    async fn procedures(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Procedure>> {
        let mut sql = String::from(
            "SELECT ROUTINE_SCHEMA AS routine_schema, ROUTINE_NAME AS routine_name, ROUTINE_TYPE AS routine_type \
             FROM INFORMATION_SCHEMA.ROUTINES WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "ROUTINE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "ROUTINE_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Procedure {
                    catalog: None,
                    schema: row_text(row, "routine_schema"),
                    name: row_text(row, "routine_name")?,
                    procedure_type: row_text(row, "routine_type"),
                })
            })
            .collect())
    }
}
