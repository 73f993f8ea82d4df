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
use crate::syntax::{DateTimeSyntax, MathSyntax, StringSyntax, SyntaxProvider};
use crate::types::DbType;

const DIALECT: &str = "SQLite";

#[derive(Debug, Default)]
pub struct SqliteSyntax {
    string: SqliteStringSyntax,
    datetime: SqliteDateTimeSyntax,
    math: SqliteMathSyntax,
}

#[derive(Debug, Default)]
pub struct SqliteStringSyntax;

#[derive(Debug, Default)]
pub struct SqliteDateTimeSyntax;

#[derive(Debug, Default)]
pub struct SqliteMathSyntax;

impl SyntaxProvider for SqliteSyntax {
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

    fn parameter_prefix(&self) -> char {
        '?'
    }

    // The trait default LIMIT/OFFSET form is already correct here.

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean
            | DbType::Byte
            | DbType::SByte
            | DbType::Int16
            | DbType::UInt16
            | DbType::Int32
            | DbType::UInt32
            | DbType::Int64
            | DbType::UInt64 => "INTEGER",
            DbType::Single | DbType::Double => "REAL",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "NUMERIC",
            DbType::AnsiString
            | DbType::AnsiStringFixedLength
            | DbType::String
            | DbType::StringFixedLength
            | DbType::Guid
            | DbType::Date
            | DbType::DateTime
            | DbType::DateTime2
            | DbType::DateTimeOffset
            | DbType::Time
            | DbType::Xml => "TEXT",
            DbType::Binary => "BLOB",
            DbType::Object => return Err(HuskyError::unknown_db_type("Convert", db_type)),
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
            DbType::Boolean
            | DbType::Byte
            | DbType::SByte
            | DbType::Int16
            | DbType::UInt16
            | DbType::Int32
            | DbType::UInt32
            | DbType::Int64
            | DbType::UInt64 => "INTEGER".to_string(),
            DbType::Single | DbType::Double => "REAL".to_string(),
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => {
                format!("DECIMAL({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::AnsiString | DbType::String => match length {
                None => "TEXT".to_string(),
                Some(len) => format!("VARCHAR({})", len),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Guid => "CHAR(36)".to_string(),
            DbType::Date => "DATE".to_string(),
            DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset => "DATETIME".to_string(),
            DbType::Time => "TIME".to_string(),
            DbType::Binary => "BLOB".to_string(),
            DbType::Xml => "TEXT".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn coalesce(&self, expressions: &[&str]) -> Result<String> {
        Ok(format!("IFNULL({})", expressions.join(", ")))
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM sqlite_master WHERE type = 'table' AND name = '{}'",
            table
        ))
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        match db_type {
            DbType::Guid => DbType::String,
            DbType::DateTimeOffset => DbType::DateTime,
            other => other,
        }
    }
}

impl StringSyntax for SqliteStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        Ok(format!("LENGTH({})", source))
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        Ok(match length {
            Some(length) => format!("SUBSTR({}, {}, {})", source, start, length),
            None => format!("SUBSTR({}, {})", source, start),
        })
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        Ok(match start {
            Some(start) => format!(
                "(INSTR(SUBSTR({src}, {start}), {search}) + {start} - 1)",
                src = source,
                search = search,
                start = start
            ),
            None => format!("INSTR({}, {})", source, search),
        })
    }

    fn to_upper(&self, source: &str) -> Result<String> {
        Ok(format!("UPPER({})", source))
    }

    fn to_lower(&self, source: &str) -> Result<String> {
        Ok(format!("LOWER({})", source))
    }

    fn trim_start(&self, source: &str) -> Result<String> {
        Ok(format!("LTRIM({})", source))
    }

    fn trim_end(&self, source: &str) -> Result<String> {
        Ok(format!("RTRIM({})", source))
    }

    fn trim(&self, source: &str) -> Result<String> {
        Ok(format!("TRIM({})", source))
    }

    // No native pad. HEX(ZEROBLOB(w)) is '00' repeated w times, so the
    // REPLACE turns it into the pad character repeated w times. Three
    // branches: exact width, too long, too short.
    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "CASE WHEN LENGTH({src}) > {w} THEN SUBSTR({src}, 1, {w}) WHEN LENGTH({src}) = {w} THEN {src} ELSE SUBSTR(REPLACE(HEX(ZEROBLOB({w})), '00', {pad}), 1, {w} - LENGTH({src})) || {src} END",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "CASE WHEN LENGTH({src}) > {w} THEN SUBSTR({src}, 1, {w}) WHEN LENGTH({src}) = {w} THEN {src} ELSE {src} || SUBSTR(REPLACE(HEX(ZEROBLOB({w})), '00', {pad}), 1, {w} - LENGTH({src})) END",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String> {
        Ok(format!("REPLACE({}, {}, {})", source, search, replacement))
    }

    fn concat(&self, parts: &[&str]) -> Result<String> {
        Ok(format!("({})", parts.join(" || ")))
    }

    fn group_concat(&self, source: &str, separator: &str) -> Result<String> {
        Ok(format!("GROUP_CONCAT({}, {})", source, separator))
    }

    fn reverse(&self, _source: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "Reverse"))
    }

    // Requires the REGEXP user function to be registered on the connection.
    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        Ok(format!("{} REGEXP {}", source, pattern))
    }
}

impl DateTimeSyntax for SqliteDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!(
            "DATE(PRINTF('%04d-%02d-%02d', {}, {}, {}))",
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
            "DATETIME(PRINTF('%04d-%02d-%02d %02d:%02d:%02d', {}, {}, {}, {}, {}, {}))",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("DATETIME('now', 'localtime')".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Ok("DATETIME('now')".to_string())
    }

    fn year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%Y', {}) AS INTEGER)", source))
    }

    fn month(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%m', {}) AS INTEGER)", source))
    }

    fn day(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%d', {}) AS INTEGER)", source))
    }

    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%H', {}) AS INTEGER)", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%M', {}) AS INTEGER)", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%S', {}) AS INTEGER)", source))
    }

    // %f is SS.SSS.
    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!(
            "CAST((CAST(STRFTIME('%f', {src}) AS REAL) - CAST(STRFTIME('%S', {src}) AS INTEGER)) * 1000 AS INTEGER)",
            src = source
        ))
    }

    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%w', {}) AS INTEGER)", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%j', {}) AS INTEGER)", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(STRFTIME('%W', {}) AS INTEGER)", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' YEAR')", source, count))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' MONTH')", source, count))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' DAY')", source, count))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' HOUR')", source, count))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' MINUTE')", source, count))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATETIME({}, ({}) || ' SECOND')", source, count))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "CAST(JULIANDAY({}) - JULIANDAY({}) AS INTEGER)",
            end, start
        ))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "CAST((JULIANDAY({}) - JULIANDAY({})) * 24 AS INTEGER)",
            end, start
        ))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "CAST((JULIANDAY({}) - JULIANDAY({})) * 1440 AS INTEGER)",
            end, start
        ))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "CAST((JULIANDAY({}) - JULIANDAY({})) * 86400 AS INTEGER)",
            end, start
        ))
    }
}

impl MathSyntax for SqliteMathSyntax {
    fn bit_and(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} & {})", left, right))
    }

    fn bit_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} | {})", left, right))
    }

    fn bit_not(&self, source: &str) -> Result<String> {
        Ok(format!("(~{})", source))
    }

    fn modulo(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} % {})", left, right))
    }

    // No xor operator.
    fn exclusive_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("(({l} | {r}) - ({l} & {r}))", l = left, r = right))
    }

    fn ceiling(&self, source: &str) -> Result<String> {
        Ok(format!("CEIL({})", source))
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
        Ok(format!("POW({}, {})", source, power))
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
        Ok(format!("({} << {})", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("({} >> {})", source, bits))
    }

    // RANDOM() spans the full signed 64-bit range.
    fn random(&self) -> Result<String> {
        Ok("(ABS(RANDOM()) / 9223372036854775807.0)".to_string())
    }
}

#[test]
fn test_sqlite_pad_left_three_way_branch() {
    let syntax = SqliteSyntax::default();
    let sql = syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap();
    assert!(sql.contains("WHEN LENGTH('ALFKI') > 7 THEN SUBSTR('ALFKI', 1, 7)"));
    assert!(sql.contains("WHEN LENGTH('ALFKI') = 7 THEN 'ALFKI'"));
    assert!(sql.contains("REPLACE(HEX(ZEROBLOB(7)), '00', '-')"));
}

#[test]
fn test_sqlite_tables_and_types() {
    let syntax = SqliteSyntax::default();
    assert_eq!(
        syntax.exists_table("t_user").unwrap(),
        "SELECT COUNT(1) FROM sqlite_master WHERE type = 'table' AND name = 't_user'"
    );
    assert_eq!(syntax.column(DbType::Decimal, None, None, None).unwrap(), "DECIMAL(19, 5)");
    assert_eq!(syntax.correct_db_type(DbType::Guid), DbType::String);
}
