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

const DIALECT: &str = "PostgreSql";

#[derive(Debug, Default)]
pub struct PostgreSqlSyntax {
    string: PostgreSqlStringSyntax,
    datetime: PostgreSqlDateTimeSyntax,
    math: PostgreSqlMathSyntax,
}

#[derive(Debug, Default)]
pub struct PostgreSqlStringSyntax;

#[derive(Debug, Default)]
pub struct PostgreSqlDateTimeSyntax;

#[derive(Debug, Default)]
pub struct PostgreSqlMathSyntax;

impl SyntaxProvider for PostgreSqlSyntax {
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

    // The trait default LIMIT/OFFSET form is already correct here.

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean => "BOOLEAN",
            DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT",
            DbType::UInt16 | DbType::Int32 => "INTEGER",
            DbType::UInt32 | DbType::Int64 => "BIGINT",
            DbType::UInt64 => "NUMERIC(20, 0)",
            DbType::Single => "REAL",
            DbType::Double => "DOUBLE PRECISION",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "NUMERIC",
            DbType::AnsiString | DbType::String => "VARCHAR",
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => "CHAR",
            DbType::Guid => "UUID",
            DbType::Date => "DATE",
            DbType::DateTime | DbType::DateTime2 => "TIMESTAMP",
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE",
            DbType::Time => "TIME",
            DbType::Binary => "BYTEA",
            DbType::Xml => "XML",
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
            DbType::Boolean => "BOOLEAN".to_string(),
            DbType::Byte | DbType::SByte | DbType::Int16 => "SMALLINT".to_string(),
            DbType::UInt16 | DbType::Int32 => "INTEGER".to_string(),
            DbType::UInt32 | DbType::Int64 => "BIGINT".to_string(),
            DbType::UInt64 => "NUMERIC(20, 0)".to_string(),
            DbType::Single => "REAL".to_string(),
            DbType::Double => "DOUBLE PRECISION".to_string(),
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => {
                format!("NUMERIC({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::AnsiString | DbType::String => match length {
                None => "VARCHAR(255)".to_string(),
                Some(len) if len <= 10_485_760 => format!("VARCHAR({})", len),
                Some(_) => "TEXT".to_string(),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Guid => "UUID".to_string(),
            DbType::Date => "DATE".to_string(),
            DbType::DateTime | DbType::DateTime2 => "TIMESTAMP".to_string(),
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE".to_string(),
            DbType::Time => "TIME".to_string(),
            DbType::Binary => "BYTEA".to_string(),
            DbType::Xml => "XML".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM information_schema.tables WHERE table_schema = 'public' AND table_name = '{}'",
            self.toggle_case(table)
        ))
    }

    /// The PostgreSQL catalog folds unquoted identifiers to lowercase.
    fn toggle_case(&self, identifier: &str) -> String {
        identifier.to_lowercase()
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        match db_type {
            DbType::UInt64 => DbType::Decimal,
            other => other,
        }
    }
}

impl StringSyntax for PostgreSqlStringSyntax {
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
            // STRPOS has no start argument; search the suffix and shift back.
            Some(start) => format!(
                "(STRPOS(SUBSTR({src}, {start}), {search}) + {start} - 1)",
                src = source,
                search = search,
                start = start
            ),
            None => format!("STRPOS({}, {})", source, search),
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
        Ok(format!("BTRIM({})", source))
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
        Ok(format!("STRING_AGG({}, {})", source, separator))
    }

    fn reverse(&self, source: &str) -> Result<String> {
        Ok(format!("REVERSE({})", source))
    }

    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        Ok(format!("{} ~ {}", source, pattern))
    }
}

impl DateTimeSyntax for PostgreSqlDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!("MAKE_DATE({}, {}, {})", year, month, day))
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
            "MAKE_TIMESTAMP({}, {}, {}, {}, {}, {})",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("NOW()".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Ok("(NOW() AT TIME ZONE 'UTC')".to_string())
    }

    fn year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(YEAR FROM {}) AS INTEGER)", source))
    }

    fn month(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(MONTH FROM {}) AS INTEGER)", source))
    }

    fn day(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(DAY FROM {}) AS INTEGER)", source))
    }

    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(HOUR FROM {}) AS INTEGER)", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(MINUTE FROM {}) AS INTEGER)", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("FLOOR(EXTRACT(SECOND FROM {}))", source))
    }

    // MILLISECONDS carries the seconds too.
    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!(
            "(CAST(EXTRACT(MILLISECONDS FROM {}) AS INTEGER) % 1000)",
            source
        ))
    }

    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(DOW FROM {}) AS INTEGER)", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(DOY FROM {}) AS INTEGER)", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("CAST(EXTRACT(WEEK FROM {}) AS INTEGER)", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 YEAR' * ({}))", source, count))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 MONTH' * ({}))", source, count))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 DAY' * ({}))", source, count))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 HOUR' * ({}))", source, count))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 MINUTE' * ({}))", source, count))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("({} + INTERVAL '1 SECOND' * ({}))", source, count))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "FLOOR(EXTRACT(EPOCH FROM ({} - {})) / 86400)",
            end, start
        ))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "FLOOR(EXTRACT(EPOCH FROM ({} - {})) / 3600)",
            end, start
        ))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!(
            "FLOOR(EXTRACT(EPOCH FROM ({} - {})) / 60)",
            end, start
        ))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("FLOOR(EXTRACT(EPOCH FROM ({} - {})))", end, start))
    }
}

impl MathSyntax for PostgreSqlMathSyntax {
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

    // `#` is the PostgreSQL xor operator.
    fn exclusive_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} # {})", left, right))
    }

    fn ceiling(&self, source: &str) -> Result<String> {
        Ok(format!("CEILING({})", source))
    }

    fn floor(&self, source: &str) -> Result<String> {
        Ok(format!("FLOOR({})", source))
    }

    fn round(&self, source: &str, digits: Option<&str>) -> Result<String> {
        Ok(format!(
            "ROUND(CAST({} AS NUMERIC), {})",
            source,
            digits.unwrap_or("0")
        ))
    }

    fn truncate(&self, source: &str) -> Result<String> {
        Ok(format!("TRUNC({})", source))
    }

    fn log(&self, source: &str) -> Result<String> {
        Ok(format!("LN({})", source))
    }

    fn log10(&self, source: &str) -> Result<String> {
        Ok(format!("LOG({})", source))
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
        Ok(format!("({} << {})", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("({} >> {})", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("RANDOM()".to_string())
    }
}

#[test]
fn test_postgres_syntax() {
    use crate::syntax::Segment;

    let syntax = PostgreSqlSyntax::default();
    assert_eq!(syntax.toggle_case("T_User"), "t_user");
    assert_eq!(
        syntax.segment("SELECT * FROM t", &Segment::range(5, 10)).unwrap(),
        "SELECT * FROM t LIMIT 10 OFFSET 5"
    );
    assert_eq!(
        syntax.convert("id", DbType::Guid).unwrap(),
        "CAST(id AS UUID)"
    );
    assert_eq!(
        syntax.string_syntax().index_of("name", "'a'", Some("3")).unwrap(),
        "(STRPOS(SUBSTR(name, 3), 'a') + 3 - 1)"
    );
    assert_eq!(
        syntax.column(DbType::Decimal, None, Some(10), None).unwrap(),
        "NUMERIC(10, 5)"
    );
}
