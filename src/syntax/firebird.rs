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
use crate::errors::{HuskyError, Result};
use crate::syntax::{DateTimeSyntax, MathSyntax, Segment, StringSyntax, SyntaxProvider};
use crate::types::DbType;

const DIALECT: &str = "Firebird";

#[derive(Debug, Default)]
pub struct FirebirdSyntax {
    string: FirebirdStringSyntax,
    datetime: FirebirdDateTimeSyntax,
    math: FirebirdMathSyntax,
}

#[derive(Debug, Default)]
pub struct FirebirdStringSyntax;

#[derive(Debug, Default)]
pub struct FirebirdDateTimeSyntax;

#[derive(Debug, Default)]
pub struct FirebirdMathSyntax;

impl SyntaxProvider for FirebirdSyntax {
    fn name(&self) -> &'static str {
        DIALECT
    }

    fn string_syntax(&self) -> &dyn StringSyntax {
        &self.string
    }

    fn datetime_syntax(&self) -> &dyn DateTimeSyntax {
        &self.datetime
    }

    fn math_syntax(&self) -> &dyn MathSyntax {
        &self.math
    }

    fn delimiter(&self) -> (char, char) {
        ('"', '"')
    }

    // ROWS bounds are inclusive and one-based.
    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        if segment.is_empty() {
            return Ok(sql.to_string());
        }
        let offset = segment.offset.unwrap_or(0);
        Ok(match segment.limit {
            Some(limit) => format!("{} ROWS {} TO {}", sql, offset + 1, offset + limit),
            None => format!("{} ROWS {} TO {}", sql, offset + 1, i64::MAX),
        })
    }

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean | DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT",
            DbType::UInt16 | DbType::Int32 => "INTEGER",
            DbType::UInt32 | DbType::Int64 => "BIGINT",
            DbType::UInt64 => "DECIMAL(18, 0)",
            DbType::Single => "FLOAT",
            DbType::Double => "DOUBLE PRECISION",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "DECIMAL",
            DbType::AnsiString | DbType::String => "VARCHAR(8191)",
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => "CHAR",
            DbType::Guid => "CHAR(36)",
            DbType::Date => "DATE",
            DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset => "TIMESTAMP",
            DbType::Time => "TIME",
            DbType::Binary => "BLOB",
            DbType::Xml | DbType::Object => {
                return Err(HuskyError::unknown_db_type("Convert", db_type))
            }
        };
        Ok(format!("CAST({} AS {})", expression, target))
    }

    fn column(
        &self,
        db_type: DbType,
        length: Option<u64>,
        precision: Option<u8>,
        scale: Option<u8>,
    ) -> Result<String> {
        let column = match db_type {
            DbType::Boolean | DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT".to_string(),
            DbType::UInt16 | DbType::Int32 => "INTEGER".to_string(),
            DbType::UInt32 | DbType::Int64 => "BIGINT".to_string(),
            DbType::UInt64 => "DECIMAL(18, 0)".to_string(),
            DbType::Single => "FLOAT".to_string(),
            DbType::Double => "DOUBLE PRECISION".to_string(),
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => {
                format!("DECIMAL({}, {})", precision.unwrap_or(18).min(18), scale.unwrap_or(5))
            }
            DbType::AnsiString | DbType::String => match length {
                None => "VARCHAR(255)".to_string(),
                Some(len) if len <= 8_191 => format!("VARCHAR({})", len),
                Some(_) => "BLOB SUB_TYPE TEXT".to_string(),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Guid => "CHAR(36)".to_string(),
            DbType::Date => "DATE".to_string(),
            DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset => "TIMESTAMP".to_string(),
            DbType::Time => "TIME".to_string(),
            DbType::Binary => "BLOB".to_string(),
            DbType::Xml => "BLOB SUB_TYPE TEXT".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM RDB$RELATIONS WHERE RDB$RELATION_NAME = '{}'",
            self.toggle_case(table)
        ))
    }

    /// The Firebird catalog folds unquoted identifiers to uppercase.
    fn toggle_case(&self, identifier: &str) -> String {
        identifier.to_uppercase()
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        match db_type {
            DbType::Boolean => DbType::Int16,
            DbType::UInt64 => DbType::Decimal,
            other => other,
        }
    }
}

impl StringSyntax for FirebirdStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        Ok(format!("CHAR_LENGTH({})", source))
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        Ok(match length {
            Some(length) => format!("SUBSTRING({} FROM {} FOR {})", source, start, length),
            None => format!("SUBSTRING({} FROM {})", source, start),
        })
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        Ok(match start {
            Some(start) => format!("POSITION({}, {}, {})", search, source, start),
            None => format!("POSITION({}, {})", search, source),
        })
    }

    fn to_upper(&self, source: &str) -> Result<String> {
        Ok(format!("UPPER({})", source))
    }

    fn to_lower(&self, source: &str) -> Result<String> {
        Ok(format!("LOWER({})", source))
    }

    fn trim_start(&self, source: &str) -> Result<String> {
        Ok(format!("TRIM(LEADING FROM {})", source))
    }

    fn trim_end(&self, source: &str) -> Result<String> {
        Ok(format!("TRIM(TRAILING FROM {})", source))
    }

    fn trim(&self, source: &str) -> Result<String> {
        Ok(format!("TRIM({})", source))
    }

    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!("LPAD({}, {}, {})", source, width, pad))
    }

    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!("RPAD({}, {}, {})", source, width, pad))
    }

    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String> {
        Ok(format!("REPLACE({}, {}, {})", source, search, replacement))
    }

    fn concat(&self, parts: &[&str]) -> Result<String> {
        Ok(format!("({})", parts.join(" || ")))
    }

    fn group_concat(&self, source: &str, separator: &str) -> Result<String> {
        Ok(format!("LIST({}, {})", source, separator))
    }

    fn reverse(&self, source: &str) -> Result<String> {
        Ok(format!("REVERSE({})", source))
    }

    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        Ok(format!("{} SIMILAR TO {}", source, pattern))
    }
}

impl DateTimeSyntax for FirebirdDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!(
            "CAST({} || '-' || {} || '-' || {} AS DATE)",
            year, month, day
        ))
    }

    fn new_datetime(
        &self,
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
        minute: &str,
        second: &str,
    ) -> Result<String> {
        Ok(format!(
            "CAST({} || '-' || {} || '-' || {} || ' ' || {} || ':' || {} || ':' || {} AS TIMESTAMP)",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("CURRENT_TIMESTAMP".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "UtcNow"))
    }

    fn year(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(YEAR FROM {})", source))
    }

    fn month(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(MONTH FROM {})", source))
    }

    fn day(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(DAY FROM {})", source))
    }

    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(HOUR FROM {})", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(MINUTE FROM {})", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(SECOND FROM {})", source))
    }

    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(MILLISECOND FROM {})", source))
    }

    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(WEEKDAY FROM {})", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(YEARDAY FROM {}) + 1", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(WEEK FROM {})", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(YEAR, {}, {})", count, source))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(MONTH, {}, {})", count, source))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(DAY, {}, {})", count, source))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(HOUR, {}, {})", count, source))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(MINUTE, {}, {})", count, source))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD(SECOND, {}, {})", count, source))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF(DAY, {}, {})", start, end))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF(HOUR, {}, {})", start, end))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF(MINUTE, {}, {})", start, end))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF(SECOND, {}, {})", start, end))
    }
}

impl MathSyntax for FirebirdMathSyntax {
    fn bit_and(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("BIN_AND({}, {})", left, right))
    }

    fn bit_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("BIN_OR({}, {})", left, right))
    }

    fn bit_not(&self, source: &str) -> Result<String> {
        Ok(format!("BIN_NOT({})", source))
    }

    fn modulo(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("MOD({}, {})", left, right))
    }

    fn exclusive_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("BIN_XOR({}, {})", left, right))
    }

    fn ceiling(&self, source: &str) -> Result<String> {
        Ok(format!("CEILING({})", source))
    }

    fn floor(&self, source: &str) -> Result<String> {
        Ok(format!("FLOOR({})", source))
    }

    fn round(&self, source: &str, digits: Option<&str>) -> Result<String> {
        Ok(format!("ROUND({}, {})", source, digits.unwrap_or("0")))
    }

    fn truncate(&self, source: &str) -> Result<String> {
        Ok(format!("TRUNC({})", source))
    }

    fn log(&self, source: &str) -> Result<String> {
        Ok(format!("LN({})", source))
    }

    fn log10(&self, source: &str) -> Result<String> {
        Ok(format!("LOG10({})", source))
    }

    fn exp(&self, source: &str) -> Result<String> {
        Ok(format!("EXP({})", source))
    }

    fn abs(&self, source: &str) -> Result<String> {
        Ok(format!("ABS({})", source))
    }

    fn negate(&self, source: &str) -> Result<String> {
        Ok(format!("(-{})", source))
    }

    fn power(&self, source: &str, power: &str) -> Result<String> {
        Ok(format!("POWER({}, {})", source, power))
    }

    fn sqrt(&self, source: &str) -> Result<String> {
        Ok(format!("SQRT({})", source))
    }

    fn sin(&self, source: &str) -> Result<String> {
        Ok(format!("SIN({})", source))
    }

    fn cos(&self, source: &str) -> Result<String> {
        Ok(format!("COS({})", source))
    }

    fn tan(&self, source: &str) -> Result<String> {
        Ok(format!("TAN({})", source))
    }

    fn asin(&self, source: &str) -> Result<String> {
        Ok(format!("ASIN({})", source))
    }

    fn acos(&self, source: &str) -> Result<String> {
        Ok(format!("ACOS({})", source))
    }

    fn atan(&self, source: &str) -> Result<String> {
        Ok(format!("ATAN({})", source))
    }

    fn sign(&self, source: &str) -> Result<String> {
        Ok(format!("SIGN({})", source))
    }

    fn left_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("BIN_SHL({}, {})", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("BIN_SHR({}, {})", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("RAND()".to_string())
    }
}

#[test]
fn test_firebird_rows_segment() {
    let syntax = FirebirdSyntax::default();
    let sql = syntax
        .segment("SELECT * FROM T_USER", &Segment::range(20, 10))
        .unwrap();
    assert_eq!(sql, "SELECT * FROM T_USER ROWS 21 TO 30");
}

#[test]
fn test_firebird_unsupported_utc_now() {
    let syntax = FirebirdSyntax::default();
    assert!(syntax.datetime_syntax().utc_now().unwrap_err().is_unsupported());
}
