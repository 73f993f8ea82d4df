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

use crate::errors::{HuskyError, Result};
use crate::syntax::{DateTimeSyntax, MathSyntax, Segment, StringSyntax, SyntaxProvider};
use crate::types::DbType;

const DIALECT: &str = "Oracle";

/// Version-aware: "12c" and later page with OFFSET/FETCH, older releases
/// get the ROWNUM nesting.
pub struct OracleSyntax {
    pub version: Option<String>,
    string: OracleStringSyntax,
    datetime: OracleDateTimeSyntax,
    math: OracleMathSyntax,
}

impl Default for OracleSyntax {
    fn default() -> Self {
        Self::with_version(Some("12c".to_string()))
    }
}

impl OracleSyntax {
    pub fn with_version(version: Option<String>) -> Self {
        Self {
            version,
            string: OracleStringSyntax,
            datetime: OracleDateTimeSyntax,
            math: OracleMathSyntax,
        }
    }

    fn supports_offset_fetch(&self) -> bool {
        self.version
            .as_deref()
            .map_or(false, |v| {
                v.starts_with("12") || v.starts_with("18") || v.starts_with("19") || v.starts_with("21") || v.starts_with("23")
            })
    }
}

#[derive(Debug, Default)]
pub struct OracleStringSyntax;

#[derive(Debug, Default)]
pub struct OracleDateTimeSyntax;

#[derive(Debug, Default)]
pub struct OracleMathSyntax;

impl SyntaxProvider for OracleSyntax {
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
        ':'
    }

    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        if segment.is_empty() {
            return Ok(sql.to_string());
        }
        let offset = segment.offset.unwrap_or(0);

        if segment.limit == Some(0) {
            return Ok(format!("SELECT * FROM ({}) WHERE 1 = 0", sql));
        }

        if self.supports_offset_fetch() {
            let mut out = sql.to_string();
            if offset > 0 {
                out.push_str(&format!(" OFFSET {} ROWS", offset));
            }
            if let Some(limit) = segment.limit {
                if offset > 0 {
                    out.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit));
                } else {
                    out.push_str(&format!(" FETCH FIRST {} ROWS ONLY", limit));
                }
            }
            return Ok(out);
        }

        Ok(match segment.limit {
            Some(limit) => format!(
                "SELECT * FROM (SELECT T.*, ROWNUM ROW_NUM FROM ({}) T WHERE ROWNUM <= {}) WHERE ROW_NUM > {}",
                sql,
                offset + limit,
                offset
            ),
            None => format!(
                "SELECT * FROM (SELECT T.*, ROWNUM ROW_NUM FROM ({}) T) WHERE ROW_NUM > {}",
                sql, offset
            ),
        })
    }

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean => "NUMBER(1)",
            DbType::Byte | DbType::SByte => "NUMBER(3)",
            DbType::Int16 | DbType::UInt16 => "NUMBER(5)",
            DbType::Int32 | DbType::UInt32 => "NUMBER(10)",
            DbType::Int64 => "NUMBER(19)",
            DbType::UInt64 => "NUMBER(20)",
            DbType::Single => "BINARY_FLOAT",
            DbType::Double => "BINARY_DOUBLE",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "NUMBER",
            DbType::AnsiString | DbType::String => "VARCHAR2(4000)",
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => "CHAR",
            DbType::Guid => "CHAR(36)",
            DbType::Date | DbType::DateTime => "DATE",
            DbType::DateTime2 | DbType::Time => "TIMESTAMP",
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE",
            DbType::Binary => "RAW(2000)",
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
            DbType::Boolean => "NUMBER(1)".to_string(),
            DbType::Byte | DbType::SByte => "NUMBER(3)".to_string(),
            DbType::Int16 | DbType::UInt16 => "NUMBER(5)".to_string(),
            DbType::Int32 | DbType::UInt32 => "NUMBER(10)".to_string(),
            DbType::Int64 => "NUMBER(19)".to_string(),
            DbType::UInt64 => "NUMBER(20)".to_string(),
            DbType::Single => "BINARY_FLOAT".to_string(),
            DbType::Double => "BINARY_DOUBLE".to_string(),
            DbType::Decimal | DbType::VarNumeric => {
                format!("NUMBER({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::Currency => "NUMBER(19, 4)".to_string(),
            DbType::AnsiString | DbType::String => match length {
                None => "VARCHAR2(255)".to_string(),
                Some(len) if len <= 4_000 => format!("VARCHAR2({})", len),
                Some(_) => "CLOB".to_string(),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Guid => "CHAR(36)".to_string(),
            DbType::Date | DbType::DateTime => "DATE".to_string(),
            DbType::DateTime2 | DbType::Time => "TIMESTAMP".to_string(),
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE".to_string(),
            DbType::Binary => match length {
                None => "BLOB".to_string(),
                Some(len) if len <= 2_000 => format!("RAW({})", len),
                Some(_) => "BLOB".to_string(),
            },
            DbType::Xml => "XMLTYPE".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn coalesce(&self, expressions: &[&str]) -> Result<String> {
        Ok(format!("NVL({})", expressions.join(", ")))
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM USER_TABLES WHERE TABLE_NAME = '{}'",
            self.toggle_case(table)
        ))
    }

    /// The Oracle catalog folds unquoted identifiers to uppercase.
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

    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        format!(
            "TO_DATE('{}', 'YYYY-MM-DD HH24:MI:SS')",
            value.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl StringSyntax for OracleStringSyntax {
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
            Some(start) => format!("INSTR({}, {}, {})", source, search, start),
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

    // Oracle LPAD/RPAD truncate on their own.
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
        Ok(format!(
            "LISTAGG({}, {}) WITHIN GROUP (ORDER BY {})",
            source, separator, source
        ))
    }

    fn reverse(&self, _source: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "Reverse"))
    }

    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        Ok(format!("REGEXP_LIKE({}, {})", source, pattern))
    }
}

impl DateTimeSyntax for OracleDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!(
            "TO_DATE({} || '-' || {} || '-' || {}, 'YYYY-MM-DD')",
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
            "TO_DATE({} || '-' || {} || '-' || {} || ' ' || {} || ':' || {} || ':' || {}, 'YYYY-MM-DD HH24:MI:SS')",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("SYSDATE".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Ok("SYS_EXTRACT_UTC(SYSTIMESTAMP)".to_string())
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

    // HOUR/MINUTE/SECOND extraction needs a TIMESTAMP operand.
    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(HOUR FROM CAST({} AS TIMESTAMP))", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("EXTRACT(MINUTE FROM CAST({} AS TIMESTAMP))", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("TRUNC(EXTRACT(SECOND FROM CAST({} AS TIMESTAMP)))", source))
    }

    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!("TO_NUMBER(TO_CHAR(CAST({} AS TIMESTAMP), 'FF3'))", source))
    }

    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("TO_NUMBER(TO_CHAR({}, 'D')) - 1", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("TO_NUMBER(TO_CHAR({}, 'DDD'))", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("TO_NUMBER(TO_CHAR({}, 'IW'))", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("ADD_MONTHS({}, ({}) * 12)", source, count))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("ADD_MONTHS({}, {})", source, count))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + ({}))", source, count))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + ({}) / 24)", source, count))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + ({}) / 1440)", source, count))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + ({}) / 86400)", source, count))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TRUNC({} - {})", end, start))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TRUNC(({} - {}) * 24)", end, start))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TRUNC(({} - {}) * 1440)", end, start))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TRUNC(({} - {}) * 86400)", end, start))
    }
}

impl MathSyntax for OracleMathSyntax {
    fn bit_and(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("BITAND({}, {})", left, right))
    }

    // Only BITAND is native; the rest are identities over it.
    fn bit_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({l} + {r} - BITAND({l}, {r}))", l = left, r = right))
    }

    fn bit_not(&self, source: &str) -> Result<String> {
        Ok(format!("(-1 - {})", source))
    }

    fn modulo(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("MOD({}, {})", left, right))
    }

    fn exclusive_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({l} + {r} - 2 * BITAND({l}, {r}))", l = left, r = right))
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
        Ok(format!("LOG(10, {})", source))
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
        Ok(format!("TRUNC({} * POWER(2, {}))", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("TRUNC({} / POWER(2, {}))", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("DBMS_RANDOM.VALUE".to_string())
    }
}

#[test]
fn test_oracle_rownum_segment_before_12c() {
    let syntax = OracleSyntax::with_version(Some("11g".to_string()));
    let sql = syntax
        .segment("SELECT * FROM T_USER", &Segment::range(20, 10))
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM (SELECT T.*, ROWNUM ROW_NUM FROM (SELECT * FROM T_USER) T WHERE ROWNUM <= 30) WHERE ROW_NUM > 20"
    );
}

#[test]
fn test_oracle_offset_fetch_segment() {
    let syntax = OracleSyntax::default();
    let sql = syntax
        .segment("SELECT * FROM T_USER", &Segment::range(20, 10))
        .unwrap();
    assert_eq!(sql, "SELECT * FROM T_USER OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY");
}

#[test]
fn test_oracle_zero_limit_short_circuits() {
    let syntax = OracleSyntax::default();
    let sql = syntax.segment("SELECT 1 FROM DUAL", &Segment::limit(0)).unwrap();
    assert_eq!(sql, "SELECT * FROM (SELECT 1 FROM DUAL) WHERE 1 = 0");
}

#[test]
fn test_oracle_identifier_folding() {
    let syntax = OracleSyntax::default();
    assert_eq!(syntax.toggle_case("t_user"), "T_USER");
    assert!(syntax.exists_table("t_user").unwrap().contains("'T_USER'"));
    assert!(syntax.string_syntax().reverse("name").unwrap_err().is_unsupported());
}
