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
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::syntax::oracle::{OracleStringSyntax, OracleSyntax};
use crate::syntax::{DateTimeSyntax, MathSyntax, StringSyntax, SyntaxProvider};
use crate::types::DbType;

/// ShenTong (Oscar) runs the Oracle dialect but takes LIMIT/OFFSET paging
/// and the GROUP_CONCAT aggregate.
pub struct ShenTongSyntax {
    inner: OracleSyntax,
    string: ShenTongStringSyntax,
}

impl Default for ShenTongSyntax {
    fn default() -> Self {
        Self {
            inner: OracleSyntax::default(),
            string: ShenTongStringSyntax::default(),
        }
    }
}

#[derive(Default)]
pub struct ShenTongStringSyntax {
    inner: OracleStringSyntax,
}

impl SyntaxProvider for ShenTongSyntax {
    fn name(&self) -> &'static str {
        "ShenTong"
    }

    fn string_syntax(&self) -> &dyn StringSyntax {
        &self.string
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

    // The engine accepts LIMIT/OFFSET, so the trait default stands.

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

    fn coalesce(&self, expressions: &[&str]) -> Result<String> {
        self.inner.coalesce(expressions)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM ALL_TABLES WHERE TABLE_NAME = '{}'",
            self.toggle_case(table)
        ))
    }

    fn toggle_case(&self, identifier: &str) -> String {
        self.inner.toggle_case(identifier)
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        self.inner.correct_db_type(db_type)
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        self.inner.format_datetime(value)
    }
}

impl StringSyntax for ShenTongStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        self.inner.length(source)
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        self.inner.substring(source, start, length)
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        self.inner.index_of(source, search, start)
    }

    fn to_upper(&self, source: &str) -> Result<String> {
        self.inner.to_upper(source)
    }

    fn to_lower(&self, source: &str) -> Result<String> {
        self.inner.to_lower(source)
    }

    fn trim_start(&self, source: &str) -> Result<String> {
        self.inner.trim_start(source)
    }

    fn trim_end(&self, source: &str) -> Result<String> {
        self.inner.trim_end(source)
    }

    fn trim(&self, source: &str) -> Result<String> {
        self.inner.trim(source)
    }

    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        self.inner.pad_left(source, width, pad)
    }

    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        self.inner.pad_right(source, width, pad)
    }

    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String> {
        self.inner.replace(source, search, replacement)
    }

    fn concat(&self, parts: &[&str]) -> Result<String> {
        self.inner.concat(parts)
    }

    fn group_concat(&self, source: &str, separator: &str) -> Result<String> {
        Ok(format!("GROUP_CONCAT({}, {})", source, separator))
    }

    fn reverse(&self, source: &str) -> Result<String> {
        self.inner.reverse(source)
    }

    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        self.inner.is_match(source, pattern)
    }
}

#[test]
fn test_shentong_overrides_over_oracle_core() {
    use crate::syntax::Segment;

    let syntax = ShenTongSyntax::default();
    assert_eq!(
        syntax.segment("SELECT * FROM T", &Segment::range(10, 5)).unwrap(),
        "SELECT * FROM T LIMIT 5 OFFSET 10"
    );
    assert_eq!(
        syntax.string_syntax().group_concat("name", "','").unwrap(),
        "GROUP_CONCAT(name, ',')"
    );
    assert!(syntax.exists_table("t_user").unwrap().contains("ALL_TABLES"));
    // Oracle core still shows through.
    assert!(syntax.string_syntax().reverse("name").unwrap_err().is_unsupported());
}
