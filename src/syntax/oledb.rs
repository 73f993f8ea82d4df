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

const DIALECT: &str = "OleDb";

/// Jet-style dialect. The thinnest of the bunch: anything the engine
/// cannot express is refused outright rather than rendered wrong.
#[derive(Debug, Default)]
pub struct OleDbSyntax {
    string: OleDbStringSyntax,
    datetime: OleDbDateTimeSyntax,
    math: OleDbMathSyntax,
}

#[derive(Debug, Default)]
pub struct OleDbStringSyntax;

#[derive(Debug, Default)]
pub struct OleDbDateTimeSyntax;

#[derive(Debug, Default)]
pub struct OleDbMathSyntax;

impl SyntaxProvider for OleDbSyntax {
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
        ('[', ']')
    }

    // Only TOP exists; an offset cannot be expressed.
    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        if segment.is_empty() {
            return Ok(sql.to_string());
        }
        if segment.offset.unwrap_or(0) > 0 {
            return Err(HuskyError::unsupported(DIALECT, "Segment"));
        }
        let Some(limit) = segment.limit else {
            return Ok(sql.to_string());
        };
        let upper = sql.to_uppercase();
        let Some(pos) = upper.find("SELECT") else {
            return Ok(sql.to_string());
        };
        let insert_at = pos + "SELECT".len();
        Ok(format!("{} TOP {}{}", &sql[..insert_at], limit, &sql[insert_at..]))
    }

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let function = match db_type {
            DbType::Boolean => "CBOOL",
            DbType::Byte => "CBYTE",
            DbType::SByte | DbType::Int16 => "CINT",
            DbType::UInt16 | DbType::Int32 => "CLNG",
            DbType::UInt32 | DbType::Int64 | DbType::UInt64 => "CDEC",
            DbType::Single => "CSNG",
            DbType::Double => "CDBL",
            DbType::Currency => "CCUR",
            DbType::Decimal | DbType::VarNumeric => "CDEC",
            DbType::AnsiString
            | DbType::AnsiStringFixedLength
            | DbType::String
            | DbType::StringFixedLength => "CSTR",
            DbType::Date | DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset | DbType::Time => {
                "CDATE"
            }
            DbType::Guid | DbType::Binary | DbType::Xml | DbType::Object => {
                return Err(HuskyError::unknown_db_type("Convert", db_type))
            }
        };
        Ok(format!("{}({})", function, expression))
    }

    fn column(
        &self,
        db_type: DbType,
        length: Option<u64>,
        precision: Option<u8>,
        scale: Option<u8>,
    ) -> Result<String> {
        let column = match db_type {
            DbType::Boolean => "BIT".to_string(),
            DbType::Byte => "BYTE".to_string(),
            DbType::SByte | DbType::Int16 => "SMALLINT".to_string(),
            DbType::UInt16 | DbType::Int32 => "INTEGER".to_string(),
            DbType::UInt32 => "DECIMAL(10, 0)".to_string(),
            DbType::Int64 => "DECIMAL(19, 0)".to_string(),
            DbType::UInt64 => "DECIMAL(20, 0)".to_string(),
            DbType::Single => "REAL".to_string(),
            DbType::Double => "FLOAT".to_string(),
            DbType::Currency => "CURRENCY".to_string(),
            // A missing half keeps its default, the given half wins.
            DbType::Decimal | DbType::VarNumeric => {
                format!("DECIMAL({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::AnsiString | DbType::String => match length {
                None => "VARCHAR(255)".to_string(),
                Some(len) if len <= 255 => format!("VARCHAR({})", len),
                Some(len) if len <= 65_535 => "TEXT".to_string(),
                Some(_) => "MEMO".to_string(),
            },
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => {
                format!("CHAR({})", length.unwrap_or(255))
            }
            DbType::Guid => "GUID".to_string(),
            DbType::Date | DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset | DbType::Time => {
                "DATETIME".to_string()
            }
            DbType::Binary => match length {
                None => "LONGBINARY".to_string(),
                Some(len) if len <= 255 => format!("VARBINARY({})", len),
                Some(len) if len <= 65_535 => "IMAGE".to_string(),
                Some(_) => "LONGBINARY".to_string(),
            },
            DbType::Xml => "MEMO".to_string(),
            DbType::Object => return Err(HuskyError::unknown_db_type("Column", db_type)),
        };
        Ok(column)
    }

    fn coalesce(&self, expressions: &[&str]) -> Result<String> {
        // No COALESCE; nest IIF/ISNULL pairs.
        let mut iter = expressions.iter().rev();
        let Some(last) = iter.next() else {
            return Ok(String::new());
        };
        let mut out = last.to_string();
        for expr in iter {
            out = format!("IIF(ISNULL({e}), {rest}, {e})", e = expr, rest = out);
        }
        Ok(out)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM MSysObjects WHERE Type = 1 AND Name = '{}'",
            table
        ))
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        match db_type {
            DbType::UInt32 | DbType::Int64 | DbType::UInt64 => DbType::Decimal,
            other => other,
        }
    }
}

impl StringSyntax for OleDbStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        Ok(format!("LEN({})", source))
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        Ok(match length {
            Some(length) => format!("MID({}, {}, {})", source, start, length),
            None => format!("MID({}, {})", source, start),
        })
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        Ok(match start {
            Some(start) => format!("INSTR({}, {}, {})", start, source, search),
            None => format!("INSTR({}, {})", source, search),
        })
    }

    fn to_upper(&self, source: &str) -> Result<String> {
        Ok(format!("UCASE({})", source))
    }

    fn to_lower(&self, source: &str) -> Result<String> {
        Ok(format!("LCASE({})", source))
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

    // STRING(n, c) repeats the pad character; native pads do not truncate,
    // so the width comparison carries three branches.
    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "IIF(LEN({src}) > {w}, LEFT({src}, {w}), IIF(LEN({src}) = {w}, {src}, STRING({w} - LEN({src}), {pad}) & {src}))",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "IIF(LEN({src}) > {w}, LEFT({src}, {w}), IIF(LEN({src}) = {w}, {src}, {src} & STRING({w} - LEN({src}), {pad})))",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String> {
        Ok(format!("REPLACE({}, {}, {})", source, search, replacement))
    }

    fn concat(&self, parts: &[&str]) -> Result<String> {
        Ok(format!("({})", parts.join(" & ")))
    }

    fn group_concat(&self, _source: &str, _separator: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "GroupConcat"))
    }

    fn reverse(&self, source: &str) -> Result<String> {
        Ok(format!("STRREVERSE({})", source))
    }

    fn is_match(&self, _source: &str, _pattern: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "IsMatch"))
    }
}

impl DateTimeSyntax for OleDbDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        Ok(format!("DATESERIAL({}, {}, {})", year, month, day))
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
            "CDATE(DATESERIAL({}, {}, {}) + TIMESERIAL({}, {}, {}))",
            year, month, day, hour, minute, second
        ))
    }

    fn now(&self) -> Result<String> {
        Ok("NOW()".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "UtcNow"))
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

    fn millisecond(&self, _source: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "Millisecond"))
    }

    // WEEKDAY counts Sunday as 1.
    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("WEEKDAY({}) - 1", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART('y', {})", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART('ww', {})", source))
    }

    fn add_years(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('yyyy', {}, {})", count, source))
    }

    fn add_months(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('m', {}, {})", count, source))
    }

    fn add_days(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('d', {}, {})", count, source))
    }

    fn add_hours(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('h', {}, {})", count, source))
    }

    fn add_minutes(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('n', {}, {})", count, source))
    }

    fn add_seconds(&self, source: &str, count: &str) -> Result<String> {
        Ok(format!("DATEADD('s', {}, {})", count, source))
    }

    fn diff_days(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF('d', {}, {})", start, end))
    }

    fn diff_hours(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF('h', {}, {})", start, end))
    }

    fn diff_minutes(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF('n', {}, {})", start, end))
    }

    fn diff_seconds(&self, start: &str, end: &str) -> Result<String> {
        Ok(format!("DATEDIFF('s', {}, {})", start, end))
    }
}

impl MathSyntax for OleDbMathSyntax {
    fn bit_and(&self, _left: &str, _right: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "BitAnd"))
    }

    fn bit_or(&self, _left: &str, _right: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "BitOr"))
    }

    fn bit_not(&self, _source: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "BitNot"))
    }

    fn modulo(&self, left: &str, right: &str) -> Result<String> {
        Ok(format!("({} MOD {})", left, right))
    }

    fn exclusive_or(&self, _left: &str, _right: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "ExclusiveOr"))
    }

    // INT truncates toward negative infinity, so the correction only fires
    // on fractional values.
    fn ceiling(&self, source: &str) -> Result<String> {
        Ok(format!("IIF(INT({src}) = {src}, {src}, INT({src}) + 1)", src = source))
    }

    fn floor(&self, _source: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "Floor"))
    }

    fn round(&self, source: &str, digits: Option<&str>) -> Result<String> {
        Ok(format!("ROUND({}, {})", source, digits.unwrap_or("0")))
    }

    fn truncate(&self, source: &str) -> Result<String> {
        Ok(format!("FIX({})", source))
    }

    fn log(&self, source: &str) -> Result<String> {
        Ok(format!("LOG({})", source))
    }

    fn log10(&self, source: &str) -> Result<String> {
        Ok(format!("(LOG({}) / LOG(10))", source))
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
        Ok(format!("({} ^ {})", source, power))
    }

    fn sqrt(&self, source: &str) -> Result<String> {
        Ok(format!("SQR({})", source))
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
        Ok(format!("ATN({src} / SQR(1 - {src} * {src}))", src = source))
    }

    fn acos(&self, source: &str) -> Result<String> {
        Ok(format!("(ATN(-{src} / SQR(1 - {src} * {src})) + 2 * ATN(1))", src = source))
    }

    fn atan(&self, source: &str) -> Result<String> {
        Ok(format!("ATN({})", source))
    }

    fn sign(&self, source: &str) -> Result<String> {
        Ok(format!("SGN({})", source))
    }

    fn left_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("({} * (2 ^ {}))", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("FIX({} / (2 ^ {}))", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("RND()".to_string())
    }
}

#[test]
fn test_oledb_explicitly_unsupported_operations() {
    let syntax = OleDbSyntax::default();
    assert!(syntax.math_syntax().floor("x").unwrap_err().is_unsupported());
    assert!(syntax.datetime_syntax().millisecond("x").unwrap_err().is_unsupported());
    assert!(syntax.datetime_syntax().utc_now().unwrap_err().is_unsupported());
    assert!(syntax.string_syntax().group_concat("x", "','").unwrap_err().is_unsupported());
    assert!(syntax.string_syntax().is_match("x", "'a'").unwrap_err().is_unsupported());
}

#[test]
fn test_oledb_pad_left_three_way_branch() {
    let syntax = OleDbSyntax::default();
    let sql = syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap();
    assert_eq!(
        sql,
        "IIF(LEN('ALFKI') > 7, LEFT('ALFKI', 7), IIF(LEN('ALFKI') = 7, 'ALFKI', STRING(7 - LEN('ALFKI'), '-') & 'ALFKI'))"
    );
}

#[test]
fn test_oledb_decimal_column_defaults() {
    let syntax = OleDbSyntax::default();
    assert_eq!(syntax.column(DbType::Decimal, None, None, None).unwrap(), "DECIMAL(19, 5)");
    assert_eq!(syntax.column(DbType::Decimal, None, None, Some(2)).unwrap(), "DECIMAL(19, 2)");
    assert_eq!(syntax.column(DbType::Decimal, None, Some(10), None).unwrap(), "DECIMAL(10, 5)");
}

#[test]
fn test_oledb_string_column_buckets() {
    let syntax = OleDbSyntax::default();
    assert_eq!(syntax.column(DbType::String, Some(255), None, None).unwrap(), "VARCHAR(255)");
    assert_eq!(syntax.column(DbType::String, Some(256), None, None).unwrap(), "TEXT");
    assert_eq!(syntax.column(DbType::String, Some(65_536), None, None).unwrap(), "MEMO");
}

#[test]
fn test_oledb_segment_top_only() {
    let syntax = OleDbSyntax::default();
    assert_eq!(
        syntax.segment("SELECT * FROM [t]", &Segment::limit(10)).unwrap(),
        "SELECT TOP 10 * FROM [t]"
    );
    assert!(syntax
        .segment("SELECT * FROM [t]", &Segment::range(5, 10))
        .unwrap_err()
        .is_unsupported());
}
