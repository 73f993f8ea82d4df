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

const DIALECT: &str = "MySql";

#[derive(Debug, Default)]
pub struct MySqlSyntax {
    string: MySqlStringSyntax,
    datetime: MySqlDateTimeSyntax,
    math: MySqlMathSyntax,
}

#[derive(Debug, Default)]
pub struct MySqlStringSyntax;

#[derive(Debug, Default)]
pub struct MySqlDateTimeSyntax;

#[derive(Debug, Default)]
pub struct MySqlMathSyntax;

impl SyntaxProvider for MySqlSyntax {
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
        ('`', '`')
    }

    fn parameter_prefix(&self) -> char {
        '?'
    }

    // The trait default already renders the MySQL LIMIT/OFFSET form.

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean | DbType::SByte | DbType::Int16 | DbType::Int32 | DbType::Int64 => {
                "SIGNED".to_string()
            }
            DbType::Byte | DbType::UInt16 | DbType::UInt32 | DbType::UInt64 => {
                "UNSIGNED".to_string()
            }
            DbType::Single | DbType::Double | DbType::Decimal | DbType::Currency | DbType::VarNumeric => {
                "DECIMAL(29, 10)".to_string()
            }
            DbType::AnsiString
            | DbType::AnsiStringFixedLength
            | DbType::String
            | DbType::StringFixedLength
            | DbType::Xml => "CHAR".to_string(),
            DbType::Guid => "CHAR(36)".to_string(),
            DbType::Binary => "BINARY".to_string(),
            DbType::Date => "DATE".to_string(),
            DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset => "DATETIME".to_string(),
            DbType::Time => "TIME".to_string(),
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
            DbType::Boolean => "TINYINT(1)".to_string(),
            DbType::Byte => "TINYINT UNSIGNED".to_string(),
            DbType::SByte => "TINYINT".to_string(),
            DbType::Int16 => "SMALLINT".to_string(),
            DbType::UInt16 => "SMALLINT UNSIGNED".to_string(),
            DbType::Int32 => "INT".to_string(),
            DbType::UInt32 => "INT UNSIGNED".to_string(),
            DbType::Int64 => "BIGINT".to_string(),
            DbType::UInt64 => "BIGINT UNSIGNED".to_string(),
            DbType::Single => "FLOAT".to_string(),
            DbType::Double => "DOUBLE".to_string(),
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => {
                format!("DECIMAL({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::Guid => "CHAR(36)".to_string(),
            DbType::AnsiString | DbType::String => match length {
                None => "VARCHAR(255)".to_string(),
                Some(len) if len <= 255 => format!("VARCHAR({})", len),
                Some(len) if len <= 65_535 => "TEXT".to_string(),
                Some(len) if len <= 16_777_215 => "MEDIUMTEXT".to_string(),
                Some(_) => "LONGTEXT".to_string(),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Binary => match length {
                None => "VARBINARY(255)".to_string(),
                Some(len) if len <= 255 => format!("VARBINARY({})", len),
                Some(len) if len <= 65_535 => "BLOB".to_string(),
                Some(len) if len <= 16_777_215 => "MEDIUMBLOB".to_string(),
                Some(_) => "LONGBLOB".to_string(),
            },
            DbType::Date => "DATE".to_string(),
            DbType::DateTime | DbType::DateTime2 => "DATETIME".to_string(),
            DbType::DateTimeOffset => "TIMESTAMP".to_string(),
            DbType::Time => "TIME".to_string(),
            DbType::Xml => "TEXT".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = '{}'",
            table
        ))
    }
}

impl StringSyntax for MySqlStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        Ok(format!("CHAR_LENGTH({})", source))
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        Ok(match length {
            Some(length) => format!("SUBSTRING({}, {}, {})", source, start, length),
            None => format!("SUBSTRING({}, {})", source, start),
        })
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        Ok(match start {
            Some(start) => format!("LOCATE({}, {}, {})", search, source, start),
            None => format!("LOCATE({}, {})", search, source),
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

    // MySQL LPAD/RPAD truncate on their own when the source is longer than
    // the requested width.
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
        Ok(format!("CONCAT({})", parts.join(", ")))
    }

    fn group_concat(&self, source: &str, separator: &str) -> Result<String> {
        Ok(format!("GROUP_CONCAT({} SEPARATOR {})", source, separator))
    }

    fn reverse(&self, source: &str) -> Result<String> {
        Ok(format!("REVERSE({})", source))
    }

    fn is_match(&self, source: &str, pattern: &str) -> Result<String> {
        Ok(format!("{} REGEXP {}", source, pattern))
    }
}

impl DateTimeSyntax for MySqlDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!(
            "STR_TO_DATE(CONCAT({}, '-', {}, '-', {}), '%Y-%m-%d')",
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
            "STR_TO_DATE(CONCAT({}, '-', {}, '-', {}, ' ', {}, ':', {}, ':', {}), '%Y-%m-%d %H:%i:%s')",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("NOW()".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Ok("UTC_TIMESTAMP()".to_string())
    }

    fn year(&self, source: &str) -> Result<String> {
        Ok(format!("YEAR({})", source))
    }

    fn month(&self, source: &str) -> Result<String> {
        Ok(format!("MONTH({})", source))
    }

    fn day(&self, source: &str) -> Result<String> {
        Ok(format!("DAY({})", source))
    }

    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("HOUR({})", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("MINUTE({})", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("SECOND({})", source))
    }

    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!("FLOOR(MICROSECOND({}) / 1000)", source))
    }

    // DAYOFWEEK counts Sunday as 1; callers expect Sunday as 0.
    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("DAYOFWEEK({}) - 1", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("DAYOFYEAR({})", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("WEEK({})", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) YEAR)", source, count))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) MONTH)", source, count))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) DAY)", source, count))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) HOUR)", source, count))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) MINUTE)", source, count))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATE_ADD({}, INTERVAL ({}) SECOND)", source, count))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF({}, {})", end, start))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TIMESTAMPDIFF(HOUR, {}, {})", start, end))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TIMESTAMPDIFF(MINUTE, {}, {})", start, end))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("TIMESTAMPDIFF(SECOND, {}, {})", start, end))
    }
}

impl MathSyntax for MySqlMathSyntax {
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

    fn exclusive_or(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} ^ {})", left, right))
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
        Ok(format!("TRUNCATE({}, 0)", source))
    }

    fn log(&self, source: &str) -> Result<String> {
        Ok(format!("LOG({})", source))
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
        Ok(format!("({} << {})", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("({} >> {})", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("RAND()".to_string())
    }
}

#[test]
fn test_mysql_syntax() {
    use crate::syntax::Segment;

    let syntax = MySqlSyntax::default();

    assert_eq!(syntax.delimit("db.users"), "`db`.`users`");
    assert_eq!(
        syntax.segment("SELECT * FROM `t`", &Segment::range(20, 10)).unwrap(),
        "SELECT * FROM `t` LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap(),
        "LPAD('ALFKI', 7, '-')"
    );
    assert_eq!(
        syntax.column(DbType::Decimal, None, None, None).unwrap(),
        "DECIMAL(19, 5)"
    );
    assert_eq!(syntax.column(DbType::String, Some(70_000), None, None).unwrap(), "MEDIUMTEXT");
    assert_eq!(
        syntax.math_syntax().round("score", None).unwrap(),
        "ROUND(score, 0)"
    );
}
