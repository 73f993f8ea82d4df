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

const DIALECT: &str = "SqlServer";

/// Version-aware: "2012" and later page with OFFSET/FETCH and build dates
/// with the FROMPARTS family, older servers get the ROW_NUMBER wrap.
pub struct SqlServerSyntax {
    pub version: Option<String>,
    string: SqlServerStringSyntax,
    datetime: SqlServerDateTimeSyntax,
    math: SqlServerMathSyntax,
}

impl Default for SqlServerSyntax {
    fn default() -> Self {
        Self::with_version(None)
    }
}

impl SqlServerSyntax {
    pub fn with_version(version: Option<String>) -> Self {
        Self {
            string: SqlServerStringSyntax { version: version.clone() },
            datetime: SqlServerDateTimeSyntax { version: version.clone() },
            math: SqlServerMathSyntax,
            version,
        }
    }

    fn supports_offset_fetch(&self) -> bool {
        version_at_least(&self.version, "2012")
    }
}

fn version_at_least(version: &Option<String>, floor: &str) -> bool {
    version.as_deref().map_or(true, |v| v >= floor)
}

pub struct SqlServerStringSyntax {
    version: Option<String>,
}

pub struct SqlServerDateTimeSyntax {
    version: Option<String>,
}

#[derive(Debug, Default)]
pub struct SqlServerMathSyntax;

impl SyntaxProvider for SqlServerSyntax {
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

    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        if segment.is_empty() {
            return Ok(sql.to_string());
        }
        let offset = segment.offset.unwrap_or(0);

        if self.supports_offset_fetch() {
            let mut out = sql.to_string();
            // OFFSET requires an ORDER BY.
            if !sql.to_uppercase().contains("ORDER BY") {
                out.push_str(" ORDER BY (SELECT NULL)");
            }
            out.push_str(&format!(" OFFSET {} ROWS", offset));
            if let Some(limit) = segment.limit {
                out.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit));
            }
            return Ok(out);
        }

        let predicate = match segment.limit {
            Some(limit) => format!("T1.ROW_NUM > {} AND T1.ROW_NUM <= {}", offset, offset + limit),
            None => format!("T1.ROW_NUM > {}", offset),
        };
        Ok(format!(
            "SELECT * FROM (SELECT T.*, ROW_NUMBER() OVER (ORDER BY (SELECT NULL)) AS ROW_NUM FROM ({}) T) T1 WHERE {}",
            sql, predicate
        ))
    }

    fn convert(&self, expression: &str, db_type: DbType) -> Result<String> {
        let target = match db_type {
            DbType::Boolean => "BIT",
            DbType::Byte => "TINYINT",
            DbType::SByte | DbType::Int16 => "SMALLINT",
            DbType::UInt16 | DbType::Int32 => "INT",
            DbType::UInt32 | DbType::Int64 => "BIGINT",
            DbType::UInt64 => "DECIMAL(20, 0)",
            DbType::Single => "REAL",
            DbType::Double => "FLOAT",
            DbType::Decimal | DbType::VarNumeric => "DECIMAL",
            DbType::Currency => "MONEY",
            DbType::AnsiString => "VARCHAR(MAX)",
            DbType::AnsiStringFixedLength => "CHAR",
            DbType::String => "NVARCHAR(MAX)",
            DbType::StringFixedLength => "NCHAR",
            DbType::Guid => "UNIQUEIDENTIFIER",
            DbType::Date => "DATE",
            DbType::DateTime => "DATETIME",
            DbType::DateTime2 => "DATETIME2",
            DbType::DateTimeOffset => "DATETIMEOFFSET",
            DbType::Time => "TIME",
            DbType::Binary => "VARBINARY(MAX)",
            DbType::Xml => "XML",
            DbType::Object => "SQL_VARIANT",
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
            DbType::Boolean => "BIT".to_string(),
            DbType::Byte => "TINYINT".to_string(),
            DbType::SByte | DbType::Int16 => "SMALLINT".to_string(),
            DbType::UInt16 | DbType::Int32 => "INT".to_string(),
            DbType::UInt32 | DbType::Int64 => "BIGINT".to_string(),
            DbType::UInt64 => "DECIMAL(20, 0)".to_string(),
            DbType::Single => "REAL".to_string(),
            DbType::Double => "FLOAT".to_string(),
            DbType::Decimal | DbType::VarNumeric => {
                format!("DECIMAL({}, {})", precision.unwrap_or(19), scale.unwrap_or(5))
            }
            DbType::Currency => "MONEY".to_string(),
            DbType::String => match length {
                None => "NVARCHAR(255)".to_string(),
                Some(len) if len <= 4_000 => format!("NVARCHAR({})", len),
                Some(_) => "NVARCHAR(MAX)".to_string(),
            },
            DbType::AnsiString => match length {
                None => "VARCHAR(255)".to_string(),
                Some(len) if len <= 8_000 => format!("VARCHAR({})", len),
                Some(_) => "VARCHAR(MAX)".to_string(),
            },
            DbType::StringFixedLength => format!("NCHAR({})", length.unwrap_or(255)),
            DbType::AnsiStringFixedLength => format!("CHAR({})", length.unwrap_or(255)),
            DbType::Guid => "UNIQUEIDENTIFIER".to_string(),
            DbType::Date => "DATE".to_string(),
            DbType::DateTime => "DATETIME".to_string(),
            DbType::DateTime2 => "DATETIME2".to_string(),
            DbType::DateTimeOffset => "DATETIMEOFFSET".to_string(),
            DbType::Time => "TIME".to_string(),
            DbType::Binary => match length {
                None => "VARBINARY(MAX)".to_string(),
                Some(len) if len <= 8_000 => format!("VARBINARY({})", len),
                Some(_) => "VARBINARY(MAX)".to_string(),
            },
            DbType::Xml => "XML".to_string(),
            DbType::Object => "SQL_VARIANT".to_string(),
        };
        Ok(column)
    }

    fn exists_table(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(1) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_NAME = '{}'",
            table
        ))
    }

    fn correct_db_type(&self, db_type: DbType) -> DbType {
        match db_type {
            DbType::UInt16 => DbType::Int32,
            DbType::UInt32 => DbType::Int64,
            DbType::UInt64 => DbType::Decimal,
            other => other,
        }
    }

    fn is_reserved_word(&self, word: &str) -> bool {
        const KEYWORDS: &[&str] = &[
            "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUTHORIZATION", "BACKUP",
            "BEGIN", "BETWEEN", "BREAK", "BROWSE", "BULK", "BY", "CASCADE", "CASE", "CHECK",
            "CHECKPOINT", "CLOSE", "CLUSTERED", "COALESCE", "COLLATE", "COLUMN", "COMMIT",
            "COMPUTE", "CONSTRAINT", "CONTAINS", "CONTAINSTABLE", "CONTINUE", "CONVERT",
            "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
            "CURRENT_USER", "CURSOR", "DATABASE", "DBCC", "DEALLOCATE", "DECLARE", "DEFAULT",
            "DELETE", "DENY", "DESC", "DISK", "DISTINCT", "DISTRIBUTED", "DOUBLE", "DROP",
            "DUMP", "ELSE", "END", "ERRLVL", "ESCAPE", "EXCEPT", "EXEC", "EXECUTE", "EXISTS",
            "EXIT", "EXTERNAL", "FETCH", "FILE", "FILLFACTOR", "FOR", "FOREIGN", "FREETEXT",
            "FREETEXTTABLE", "FROM", "FULL", "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING",
            "HOLDLOCK", "IDENTITY", "IDENTITY_INSERT", "IDENTITYCOL", "IF", "IN", "INDEX",
            "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "KILL", "LEFT",
            "LIKE", "LINENO", "LOAD", "MERGE", "NATIONAL", "NOCHECK", "NONCLUSTERED",
            "NOT", "NULL", "NULLIF", "OF", "OFF", "OFFSETS", "ON", "OPEN", "OPENDATASOURCE",
            "OPENQUERY", "OPENROWSET", "OPENXML", "OPTION", "OR", "ORDER", "OUTER", "OVER",
            "PERCENT", "PIVOT", "PLAN", "PRECISION", "PRIMARY", "PRINT", "PROC", "PROCEDURE",
            "PUBLIC", "RAISERROR", "READ", "READTEXT", "RECONFIGURE", "REFERENCES",
            "REPLICATION", "RESTORE", "RESTRICT", "RETURN", "REVERT", "REVOKE", "RIGHT",
            "ROLLBACK", "ROWCOUNT", "ROWGUIDCOL", "RULE", "SAVE", "SCHEMA", "SECURITYAUDIT",
            "SELECT", "SESSION_USER", "SET", "SETUSER", "SHUTDOWN", "SOME", "STATISTICS",
            "SYSTEM_USER", "TABLE", "TABLESAMPLE", "TEXTSIZE", "THEN", "TO", "TOP", "TRAN",
            "TRANSACTION", "TRIGGER", "TRUNCATE", "TRY_CONVERT", "TSEQUAL", "UNION", "UNIQUE",
            "UNPIVOT", "UPDATE", "UPDATETEXT", "USE", "USER", "VALUES", "VARYING", "VIEW",
            "WAITFOR", "WHEN", "WHERE", "WHILE", "WITH", "WRITETEXT",
        ];
        KEYWORDS.contains(&word.to_uppercase().as_str())
    }
}

impl StringSyntax for SqlServerStringSyntax {
    fn length(&self, source: &str) -> Result<String> {
        Ok(format!("LEN({})", source))
    }

    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String> {
        Ok(match length {
            Some(length) => format!("SUBSTRING({}, {}, {})", source, start, length),
            None => format!("SUBSTRING({}, {}, LEN({}))", source, start, source),
        })
    }

    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String> {
        Ok(match start {
            Some(start) => format!("CHARINDEX({}, {}, {})", search, source, start),
            None => format!("CHARINDEX({}, {})", search, source),
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
        Ok(format!("LTRIM(RTRIM({}))", source))
    }

    // No native pad, and the width also truncates: three branches, exact
    // width / too long / too short.
    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "CASE WHEN LEN({src}) > {w} THEN LEFT({src}, {w}) WHEN LEN({src}) = {w} THEN {src} ELSE CONCAT(REPLICATE({pad}, {w} - LEN({src})), {src}) END",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String> {
        Ok(format!(
            "CASE WHEN LEN({src}) > {w} THEN LEFT({src}, {w}) WHEN LEN({src}) = {w} THEN {src} ELSE CONCAT({src}, REPLICATE({pad}, {w} - LEN({src}))) END",
            src = source,
            w = width,
            pad = pad
        ))
    }

    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String> {
        Ok(format!("REPLACE({}, {}, {})", source, search, replacement))
    }

    fn concat(&self, parts: &[&str]) -> Result<String> {
        Ok(format!("CONCAT({})", parts.join(", ")))
    }

    fn group_concat(&self, source: &str, separator: &str) -> Result<String> {
        if version_at_least(&self.version, "2017") {
            Ok(format!("STRING_AGG({}, {})", source, separator))
        } else {
            Err(HuskyError::unsupported(DIALECT, "GroupConcat"))
        }
    }

    fn reverse(&self, source: &str) -> Result<String> {
        Ok(format!("REVERSE({})", source))
    }

    fn is_match(&self, _source: &str, _pattern: &str) -> Result<String> {
        Err(HuskyError::unsupported(DIALECT, "IsMatch"))
    }
}

impl DateTimeSyntax for SqlServerDateTimeSyntax {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String> {
        if version_at_least(&self.version, "2012") {
            Ok(format!("DATEFROMPARTS({}, {}, {})", year, month, day))
        } else {
            Ok(format!(
                "CAST(CONCAT({}, '-', {}, '-', {}) AS DATETIME)",
                year, month, day
            ))
        }
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
        if version_at_least(&self.version, "2012") {
            Ok(format!(
                "DATETIMEFROMPARTS({}, {}, {}, {}, {}, {}, 0)",
                year, month, day, hour, minute, second
            ))
        } else {
            Ok(format!(
                "CAST(CONCAT({}, '-', {}, '-', {}, ' ', {}, ':', {}, ':', {}) AS DATETIME)",
                year, month, day, hour, minute, second
            ))
        }
    }

    fn now(&self) -> Result<String> {
        Ok("GETDATE()".to_string())
    }

    fn utc_now(&self) -> Result<String> {
        Ok("GETUTCDATE()".to_string())
    }

    fn year(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(YEAR, {})", source))
    }

    fn month(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(MONTH, {})", source))
    }

    fn day(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(DAY, {})", source))
    }

    fn hour(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(HOUR, {})", source))
    }

    fn minute(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(MINUTE, {})", source))
    }

    fn second(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(SECOND, {})", source))
    }

    fn millisecond(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(MILLISECOND, {})", source))
    }

    fn day_of_week(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(WEEKDAY, {}) - 1", source))
    }

    fn day_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(DAYOFYEAR, {})", source))
    }

    fn week_of_year(&self, source: &str) -> Result<String> {
        Ok(format!("DATEPART(WEEK, {})", source))
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

impl MathSyntax for SqlServerMathSyntax {
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

    // Third ROUND argument non-zero means truncate.
    fn truncate(&self, source: &str) -> Result<String> {
        Ok(format!("ROUND({}, 0, 1)", source))
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

    // T-SQL has no shift operators.
    fn left_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("({} * POWER(2, {}))", source, bits))
    }

    fn right_shift(&self, source: &str, bits: &str) -> Result<String> {
        Ok(format!("FLOOR({} / POWER(2, {}))", source, bits))
    }

    fn random(&self) -> Result<String> {
        Ok("RAND()".to_string())
    }
}

#[test]
fn test_mssql_offset_fetch_segment() {
    let syntax = SqlServerSyntax::default();
    let sql = syntax
        .segment("SELECT * FROM [users]", &Segment::range(20, 10))
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM [users] ORDER BY (SELECT NULL) OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn test_mssql_row_number_segment_before_2012() {
    let syntax = SqlServerSyntax::with_version(Some("2008".to_string()));
    let sql = syntax
        .segment("SELECT * FROM [users]", &Segment::range(20, 10))
        .unwrap();
    assert!(sql.contains("ROW_NUMBER() OVER"));
    assert!(sql.contains("T1.ROW_NUM > 20 AND T1.ROW_NUM <= 30"));
}

#[test]
fn test_mssql_pad_left_three_way_branch() {
    let syntax = SqlServerSyntax::default();
    let sql = syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap();
    assert!(sql.contains("WHEN LEN('ALFKI') > 7 THEN LEFT('ALFKI', 7)"));
    assert!(sql.contains("WHEN LEN('ALFKI') = 7 THEN 'ALFKI'"));
    assert!(sql.contains("REPLICATE('-', 7 - LEN('ALFKI'))"));
}

#[test]
fn test_mssql_unsupported_operations() {
    let syntax = SqlServerSyntax::with_version(Some("2008".to_string()));
    assert!(syntax.string_syntax().is_match("name", "'^a'").unwrap_err().is_unsupported());
    assert!(syntax.string_syntax().group_concat("name", "','").unwrap_err().is_unsupported());
}
