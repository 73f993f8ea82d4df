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
use crate::syntax::oracle::OracleSyntax;
use crate::syntax::{DateTimeSyntax, MathSyntax, StringSyntax, SyntaxProvider};
use crate::types::DbType;

/// Dameng speaks the Oracle dialect; only the paging differs, the engine
/// accepts the plain LIMIT/OFFSET form the trait default renders.
pub struct DamengSyntax {
    inner: OracleSyntax,
}

impl Default for DamengSyntax {
    fn default() -> Self {
        Self { inner: OracleSyntax::default() }
    }
}

impl SyntaxProvider for DamengSyntax {
    fn name(&self) -> &'static str {
        "Dameng"
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
        self.inner.exists_table(table)
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

#[test]
fn test_dameng_limit_paging_over_oracle_core() {
    use crate::syntax::Segment;

    let syntax = DamengSyntax::default();
    assert_eq!(
        syntax.segment("SELECT * FROM T", &Segment::range(10, 5)).unwrap(),
        "SELECT * FROM T LIMIT 5 OFFSET 10"
    );
    // Everything else is the Oracle table.
    assert_eq!(syntax.toggle_case("t_user"), "T_USER");
    assert_eq!(syntax.math_syntax().bit_and("a", "b").unwrap(), "BITAND(a, b)");
}
