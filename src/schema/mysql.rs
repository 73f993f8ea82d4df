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
    restrictions, row_i64, row_text, Column, DataType, Database, ForeignKey, Index,
    IndexColumn, Procedure, ProcedureParameter, ReservedWord, RestrictionDictionary,
    SchemaExecutor, SchemaProvider, Table, User, View, ViewColumn,
};
use crate::types::{DbType, Value};

/// INFORMATION_SCHEMA-backed metadata. Restrictions become parameterized
/// predicates; a restriction the query does not know is ignored.
#[derive(Debug, Default)]
pub struct MySqlSchemaProvider;

fn push_filter(sql: &mut String, params: &mut Vec<Value>, column: &str, value: Option<&str>) {
    if let Some(value) = value {
        sql.push_str(&format!(" AND {} = ?", column));
        params.push(Value::from(value));
    }
}

#[async_trait]
impl SchemaProvider for MySqlSchemaProvider {
    async fn databases(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Database>> {
        let mut sql = String::from(
            "SELECT SCHEMA_NAME AS name FROM INFORMATION_SCHEMA.SCHEMATA WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "SCHEMA_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row_text(row, "name").map(|name| Database { name }))
            .collect())
    }

    async fn data_types(
        &self,
        _executor: &dyn SchemaExecutor,
        _restrictions: &RestrictionDictionary,
    ) -> Result<Vec<DataType>> {
        Ok(vec![
            DataType { type_name: "tinyint".into(), db_type: Some(DbType::SByte), create_format: Some("TINYINT".into()), max_length: None },
            DataType { type_name: "smallint".into(), db_type: Some(DbType::Int16), create_format: Some("SMALLINT".into()), max_length: None },
            DataType { type_name: "int".into(), db_type: Some(DbType::Int32), create_format: Some("INT".into()), max_length: None },
            DataType { type_name: "bigint".into(), db_type: Some(DbType::Int64), create_format: Some("BIGINT".into()), max_length: None },
            DataType { type_name: "float".into(), db_type: Some(DbType::Single), create_format: Some("FLOAT".into()), max_length: None },
            DataType { type_name: "double".into(), db_type: Some(DbType::Double), create_format: Some("DOUBLE".into()), max_length: None },
            DataType { type_name: "decimal".into(), db_type: Some(DbType::Decimal), create_format: Some("DECIMAL({0}, {1})".into()), max_length: None },
            DataType { type_name: "char".into(), db_type: Some(DbType::StringFixedLength), create_format: Some("CHAR({0})".into()), max_length: Some(255) },
            DataType { type_name: "varchar".into(), db_type: Some(DbType::String), create_format: Some("VARCHAR({0})".into()), max_length: Some(65_535) },
            DataType { type_name: "text".into(), db_type: Some(DbType::String), create_format: Some("TEXT".into()), max_length: Some(65_535) },
            DataType { type_name: "mediumtext".into(), db_type: Some(DbType::String), create_format: Some("MEDIUMTEXT".into()), max_length: Some(16_777_215) },
            DataType { type_name: "longtext".into(), db_type: Some(DbType::String), create_format: Some("LONGTEXT".into()), max_length: None },
            DataType { type_name: "blob".into(), db_type: Some(DbType::Binary), create_format: Some("BLOB".into()), max_length: Some(65_535) },
            DataType { type_name: "date".into(), db_type: Some(DbType::Date), create_format: Some("DATE".into()), max_length: None },
            DataType { type_name: "datetime".into(), db_type: Some(DbType::DateTime), create_format: Some("DATETIME".into()), max_length: None },
            DataType { type_name: "timestamp".into(), db_type: Some(DbType::DateTimeOffset), create_format: Some("TIMESTAMP".into()), max_length: None },
            DataType { type_name: "time".into(), db_type: Some(DbType::Time), create_format: Some("TIME".into()), max_length: None },
        ])
    }

    async fn tables(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<Table>> {
        let mut sql = String::from(
            "SELECT TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name, TABLE_TYPE AS table_type, TABLE_COMMENT AS table_comment \
             FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_TYPE = 'BASE TABLE'",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Table {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    name: row_text(row, "table_name")?,
                    table_type: row_text(row, "table_type"),
                    description: row_text(row, "table_comment"),
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
             NUMERIC_SCALE AS num_scale, IS_NULLABLE AS is_nullable, COLUMN_KEY AS column_key, \
             EXTRA AS extra, COLUMN_DEFAULT AS column_default, COLUMN_COMMENT AS column_comment, \
             ORDINAL_POSITION AS ordinal_position \
             FROM INFORMATION_SCHEMA.COLUMNS WHERE 1 = 1",
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
                    is_primary_key: row_text(row, "column_key").as_deref() == Some("PRI"),
                    autoincrement: row_text(row, "extra")
                        .map(|e| e.contains("auto_increment"))
                        .unwrap_or(false),
                    default: row_text(row, "column_default"),
                    description: row_text(row, "column_comment"),
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
            "SELECT TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name \
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
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    name: row_text(row, "table_name")?,
                    description: None,
                })
            })
            .collect())
    }

    async fn view_columns(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<ViewColumn>> {
        let mut sql = String::from(
            "SELECT C.TABLE_SCHEMA AS table_schema, C.TABLE_NAME AS table_name, C.COLUMN_NAME AS column_name, \
             C.DATA_TYPE AS data_type, C.ORDINAL_POSITION AS ordinal_position \
             FROM INFORMATION_SCHEMA.COLUMNS C \
             JOIN INFORMATION_SCHEMA.VIEWS V ON V.TABLE_SCHEMA = C.TABLE_SCHEMA AND V.TABLE_NAME = C.TABLE_NAME \
             WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "C.TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "C.TABLE_NAME", r.text(restrictions::TABLE));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ViewColumn {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    view_name: row_text(row, "table_name")?,
                    name: row_text(row, "column_name")?,
                    data_type: row_text(row, "data_type"),
                    position: row_i64(row, "ordinal_position"),
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
            "SELECT DISTINCT TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name, INDEX_NAME AS index_name, \
             NON_UNIQUE AS non_unique \
             FROM INFORMATION_SCHEMA.STATISTICS WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::TABLE));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                let name = row_text(row, "index_name")?;
                Some(Index {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    table_name: row_text(row, "table_name")?,
                    is_unique: row_i64(row, "non_unique") == Some(0),
                    is_primary: name == "PRIMARY",
                    name,
                })
            })
            .collect())
    }

    async fn index_columns(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<IndexColumn>> {
        let mut sql = String::from(
            "SELECT TABLE_SCHEMA AS table_schema, TABLE_NAME AS table_name, INDEX_NAME AS index_name, \
             COLUMN_NAME AS column_name, SEQ_IN_INDEX AS seq_in_index \
             FROM INFORMATION_SCHEMA.STATISTICS WHERE 1 = 1",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "TABLE_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::TABLE));
        push_filter(&mut sql, &mut params, "INDEX_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(IndexColumn {
                    catalog: None,
                    schema: row_text(row, "table_schema"),
                    table_name: row_text(row, "table_name")?,
                    index_name: row_text(row, "index_name")?,
                    column_name: row_text(row, "column_name")?,
                    position: row_i64(row, "seq_in_index"),
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

    async fn procedure_parameters(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<ProcedureParameter>> {
        let mut sql = String::from(
            "SELECT SPECIFIC_SCHEMA AS specific_schema, SPECIFIC_NAME AS specific_name, PARAMETER_NAME AS parameter_name, \
             PARAMETER_MODE AS parameter_mode, DATA_TYPE AS data_type, ORDINAL_POSITION AS ordinal_position \
             FROM INFORMATION_SCHEMA.PARAMETERS WHERE PARAMETER_NAME IS NOT NULL",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "SPECIFIC_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "SPECIFIC_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ProcedureParameter {
                    catalog: None,
                    schema: row_text(row, "specific_schema"),
                    procedure_name: row_text(row, "specific_name")?,
                    name: row_text(row, "parameter_name")?,
                    direction: row_text(row, "parameter_mode"),
                    data_type: row_text(row, "data_type"),
                    position: row_i64(row, "ordinal_position"),
                })
            })
            .collect())
    }

    async fn foreign_keys(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<ForeignKey>> {
        let mut sql = String::from(
            "SELECT CONSTRAINT_SCHEMA AS constraint_schema, CONSTRAINT_NAME AS constraint_name, TABLE_NAME AS table_name, \
             COLUMN_NAME AS column_name, REFERENCED_TABLE_NAME AS referenced_table_name, REFERENCED_COLUMN_NAME AS referenced_column_name \
             FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE WHERE REFERENCED_TABLE_NAME IS NOT NULL",
        );
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "CONSTRAINT_SCHEMA", r.text(restrictions::SCHEMA));
        push_filter(&mut sql, &mut params, "TABLE_NAME", r.text(restrictions::TABLE));
        push_filter(&mut sql, &mut params, "CONSTRAINT_NAME", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ForeignKey {
                    catalog: None,
                    schema: row_text(row, "constraint_schema"),
                    name: row_text(row, "constraint_name")?,
                    table_name: row_text(row, "table_name")?,
                    column_name: row_text(row, "column_name")?,
                    pk_table: row_text(row, "referenced_table_name")?,
                    pk_column: row_text(row, "referenced_column_name")?,
                })
            })
            .collect())
    }

    async fn users(
        &self,
        executor: &dyn SchemaExecutor,
        r: &RestrictionDictionary,
    ) -> Result<Vec<User>> {
        let mut sql = String::from("SELECT USER AS user_name FROM MYSQL.USER WHERE 1 = 1");
        let mut params = Vec::new();
        push_filter(&mut sql, &mut params, "USER", r.text(restrictions::NAME));

        let rows = executor.query(&sql, &params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row_text(row, "user_name").map(|name| User { name }))
            .collect())
    }

    async fn reserved_words(
        &self,
        _executor: &dyn SchemaExecutor,
        _restrictions: &RestrictionDictionary,
    ) -> Result<Vec<ReservedWord>> {
        const WORDS: &[&str] = &[
            "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHANGE",
            "COLUMN", "CREATE", "CROSS", "DATABASE", "DELETE", "DESC", "DISTINCT", "DROP",
            "ELSE", "EXISTS", "FALSE", "FROM", "GROUP", "HAVING", "IN", "INDEX", "INNER",
            "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL",
            "ON", "OR", "ORDER", "OUTER", "PRIMARY", "RIGHT", "SELECT", "SET", "TABLE",
            "THEN", "TRUE", "UNION", "UNIQUE", "UPDATE", "VALUES", "WHEN", "WHERE",
        ];
        Ok(WORDS.iter().map(|w| ReservedWord { word: w.to_string() }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExecutor {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    #[async_trait]
    impl SchemaExecutor for RecordingExecutor {
        async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<crate::schema::SchemaRow>> {
            self.calls.lock().unwrap().push((sql.to_string(), params.to_vec()));
            Ok(Vec::new())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_table_restrictions_become_predicates() {
        let provider = MySqlSchemaProvider;
        let executor = RecordingExecutor::default();
        let r = RestrictionDictionary::new()
            .with(restrictions::SCHEMA, "app")
            .with(restrictions::NAME, "t_user");

        provider.tables(&executor, &r).await.unwrap();

        let calls = executor.calls.lock().unwrap();
        let (sql, params) = &calls[0];
        assert!(sql.contains("AND TABLE_SCHEMA = ?"));
        assert!(sql.contains("AND TABLE_NAME = ?"));
        assert_eq!(params, &vec![Value::from("app"), Value::from("t_user")]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unrestricted_query_has_no_extra_predicates() {
        let provider = MySqlSchemaProvider;
        let executor = RecordingExecutor::default();

        provider.views(&executor, &RestrictionDictionary::new()).await.unwrap();

        let calls = executor.calls.lock().unwrap();
        let (sql, params) = &calls[0];
        assert!(!sql.contains("AND "));
        assert!(params.is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_column_rows_map_to_entities() {
        struct OneRow;

        #[async_trait]
        impl SchemaExecutor for OneRow {
            async fn query(
                &self,
                _sql: &str,
                _params: &[Value],
            ) -> Result<Vec<crate::schema::SchemaRow>> {
                let mut row = crate::schema::SchemaRow::new();
                row.insert("table_schema".into(), Value::from("app"));
                row.insert("table_name".into(), Value::from("t_user"));
                row.insert("column_name".into(), Value::from("id"));
                row.insert("data_type".into(), Value::from("bigint"));
                row.insert("is_nullable".into(), Value::from("NO"));
                row.insert("column_key".into(), Value::from("PRI"));
                row.insert("extra".into(), Value::from("auto_increment"));
                row.insert("ordinal_position".into(), Value::from(1));
                Ok(vec![row])
            }
        }

        let provider = MySqlSchemaProvider;
        let columns = provider
            .columns(&OneRow, &RestrictionDictionary::new().with(restrictions::TABLE, "t_user"))
            .await
            .unwrap();

        assert_eq!(columns.len(), 1);
        let column = &columns[0];
        assert_eq!(column.name, "id");
        assert!(column.is_primary_key);
        assert!(column.autoincrement);
        assert!(!column.is_nullable);
        assert_eq!(column.position, Some(1));
    }
}
