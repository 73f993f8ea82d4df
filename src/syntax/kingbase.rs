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
use crate::errors::Result;
use crate::syntax::postgres::PostgreSqlSyntax;
use crate::syntax::{DateTimeSyntax, MathSyntax, Segment, StringSyntax, SyntaxProvider};
use crate::types::DbType;

/// KingbaseES is wire- and dialect-compatible with PostgreSQL.
pub struct KingbaseSyntax {
    inner: PostgreSqlSyntax,
}

impl Default for KingbaseSyntax {
    fn default() -> Self {
        Self { inner: PostgreSqlSyntax::default() }
    }
}

impl SyntaxProvider for KingbaseSyntax {
    fn name(&self) -> &'static str {
        "Kingbase"
    }

    fn string_syntax(&self) -> &dyn StringSyntax {
        self.inner.string_syntax()
    }

    fn datetime_syntax(&self) -> &dyn DateTimeSyntax {
        self.inner.datetime_syntax()
    }

    fn math_syntax(&self) -> &dyn MathSyntax {
        self.inner.math_syntax()
    }

    fn delimiter(&self) -> (char, char) {
        self.inner.delimiter()
    }

    fn parameter_prefix(&self) -> char {
        self.inner.parameter_prefix()
    }

    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        self.inner.segment(sql, segment)
    }

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        self.inner.convert(expression, db_type)
    }

    fn column(
        &self,
        db_type: DbType,
        length: Option<u64>,
        precision: Option<u8>,
        scale: Option<u8>,
    ) -> Result<String> {
        self.inner.column(db_type, length, precision, scale)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        self.inner.exists_table(table)
    }

    fn toggle_case(&self, identifier: &str) -> String {
        self.inner.toggle_case(identifier)
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        self.inner.correct_db_type(db_type)
    }
}

#[test]
fn test_kingbase_reuses_postgres_dialect() {
    let syntax = KingbaseSyntax::default();
    assert_eq!(syntax.name(), "Kingbase");
    assert_eq!(syntax.toggle_case("T_User"), "t_user");
    assert_eq!(
        syntax.string_syntax().group_concat("name", "','").unwrap(),
        "STRING_AGG(name, ',')"
    );
}
