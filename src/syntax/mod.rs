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
use crate::types::DbType;

mod dameng;
mod firebird;
mod kingbase;
mod mssql;
mod mysql;
mod oledb;
mod oracle;
mod postgres;
mod shentong;
mod sqlite;

pub use dameng::DamengSyntax;
pub use firebird::FirebirdSyntax;
pub use kingbase::KingbaseSyntax;
pub use mssql::SqlServerSyntax;
pub use mysql::MySqlSyntax;
pub use oledb::OleDbSyntax;
pub use oracle::OracleSyntax;
pub use postgres::PostgreSqlSyntax;
pub use shentong::ShenTongSyntax;
pub use sqlite::SqliteSyntax;

/// Paging request applied to an already-composed SELECT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Segment {
    pub fn limit(limit: u64) -> Self {
        Segment { limit: Some(limit), offset: None }
    }

    pub fn range(offset: u64, limit: u64) -> Self {
        Segment { limit: Some(limit), offset: Some(offset) }
    }

    /// Page numbers start from one.
    pub fn page(page_no: u64, page_size: u64) -> Self {
        Segment {
            limit: Some(page_size),
            offset: Some(page_no.saturating_sub(1) * page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// String operation table. Every method maps already-delimited operand
/// expressions to one dialect-correct fragment; no method inspects operand
/// semantics.
pub trait StringSyntax: Send + Sync {
    fn length(&self, source: &str) -> Result<String>;
    fn substring(&self, source: &str, start: &str, length: Option<&str>) -> Result<String>;
    fn index_of(&self, source: &str, search: &str, start: Option<&str>) -> Result<String>;
    fn to_upper(&self, source: &str) -> Result<String>;
    fn to_lower(&self, source: &str) -> Result<String>;
    fn trim_start(&self, source: &str) -> Result<String>;
    fn trim_end(&self, source: &str) -> Result<String>;
    fn trim(&self, source: &str) -> Result<String>;
    fn pad_left(&self, source: &str, width: &str, pad: &str) -> Result<String>;
    fn pad_right(&self, source: &str, width: &str, pad: &str) -> Result<String>;
    fn replace(&self, source: &str, search: &str, replacement: &str) -> Result<String>;
    fn concat(&self, parts: &[&str]) -> Result<String>;
    fn group_concat(&self, source: &str, separator: &str) -> Result<String>;
    fn reverse(&self, source: &str) -> Result<String>;
    fn is_match(&self, source: &str, pattern: &str) -> Result<String>;
}

/// Date/time operation table.
pub trait DateTimeSyntax: Send + Sync {
    fn new_date(&self, year: &str, month: &str, day: &str) -> Result<String>;
    fn new_datetime(
        &self,
        year: &str,
        month: &str,
        day: &str,
        hour: &str,
        minute: &str,
        second: &str,
    ) -> Result<String>;
    fn now(&self) -> Result<String>;
    fn utc_now(&self) -> Result<String>;
    fn year(&self, source: &str) -> Result<String>;
    fn month(&self, source: &str) -> Result<String>;
    fn day(&self, source: &str) -> Result<String>;
    fn hour(&self, source: &str) -> Result<String>;
    fn minute(&self, source: &str) -> Result<String>;
    fn second(&self, source: &str) -> Result<String>;
    fn millisecond(&self, source: &str) -> Result<String>;
    fn day_of_week(&self, source: &str) -> Result<String>;
    fn day_of_year(&self, source: &str) -> Result<String>;
    fn week_of_year(&self, source: &str) -> Result<String>;
    fn add_years(&self, source: &str, count: &str) -> Result<String>;
    fn add_months(&self, source: &str, count: &str) -> Result<String>;
    fn add_days(&self, source: &str, count: &str) -> Result<String>;
    fn add_hours(&self, source: &str, count: &str) -> Result<String>;
    fn add_minutes(&self, source: &str, count: &str) -> Result<String>;
    fn add_seconds(&self, source: &str, count: &str) -> Result<String>;
    fn diff_days(&self, start: &str, end: &str) -> Result<String>;
    fn diff_hours(&self, start: &str, end: &str) -> Result<String>;
    fn diff_minutes(&self, start: &str, end: &str) -> Result<String>;
    fn diff_seconds(&self, start: &str, end: &str) -> Result<String>;
}

/// Math operation table. `round` with `None` digits defaults the digit
/// argument to 0 in every dialect that carries an explicit digit parameter.
pub trait MathSyntax: Send + Sync {
    fn bit_and(&self, left: &str, right: &str) -> Result<String>;
    fn bit_or(&self, left: &str, right: &str) -> Result<String>;
    fn bit_not(&self, source: &str) -> Result<String>;
    fn modulo(&self, left: &str, right: &str) -> Result<String>;
    fn exclusive_or(&self, left: &str, right: &str) -> Result<String>;
    fn ceiling(&self, source: &str) -> Result<String>;
    fn floor(&self, source: &str) -> Result<String>;
    fn round(&self, source: &str, digits: Option<&str>) -> Result<String>;
    fn truncate(&self, source: &str) -> Result<String>;
    fn log(&self, source: &str) -> Result<String>;
    fn log10(&self, source: &str) -> Result<String>;
    fn exp(&self, source: &str) -> Result<String>;
    fn abs(&self, source: &str) -> Result<String>;
    fn negate(&self, source: &str) -> Result<String>;
    fn power(&self, source: &str, power: &str) -> Result<String>;
    fn sqrt(&self, source: &str) -> Result<String>;
    fn sin(&self, source: &str) -> Result<String>;
    fn cos(&self, source: &str) -> Result<String>;
    fn tan(&self, source: &str) -> Result<String>;
    fn asin(&self, source: &str) -> Result<String>;
    fn acos(&self, source: &str) -> Result<String>;
    fn atan(&self, source: &str) -> Result<String>;
    fn sign(&self, source: &str) -> Result<String>;
    fn left_shift(&self, source: &str, bits: &str) -> Result<String>;
    fn right_shift(&self, source: &str, bits: &str) -> Result<String>;
    fn random(&self) -> Result<String>;
}

/// Per-vendor dialect surface: the three sub-syntax tables plus the
/// provider-level operations. Implementations are stateless translation
/// tables, safe for unlimited concurrent callers.
pub trait SyntaxProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn string_syntax(&self) -> &dyn StringSyntax;
    fn datetime_syntax(&self) -> &dyn DateTimeSyntax;
    fn math_syntax(&self) -> &dyn MathSyntax;

    /// Identifier delimiter pair.
    fn delimiter(&self) -> (char, char);

    fn parameter_prefix(&self) -> char {
        '@'
    }

    fn format_parameter(&self, name: &str) -> String {
        format!("{}{}", self.parameter_prefix(), normalize_parameter_name(name))
    }

    /// Quotes an identifier, part by part around dots. Already-quoted parts
    /// pass through.
    fn delimit(&self, identifier: &str) -> String {
        let (open, close) = self.delimiter();
        identifier
            .split('.')
            .map(|part| {
                let part = part.trim();
                if part.starts_with(open) && part.ends_with(close) && part.len() > 1 {
                    part.to_string()
                } else {
                    let escaped = part.replace(close, &format!("{}{}", close, close));
                    format!("{}{}{}", open, escaped, close)
                }
            })
            .collect::<Vec<String>>()
            .join(".")
    }

    /// Applies a paging request to a composed SELECT. Default is the
    /// LIMIT/OFFSET form.
    fn segment(&self, sql: &str, segment: &Segment) -> Result<String> {
        let clause = match (segment.limit, segment.offset) {
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (None, Some(offset)) => format!("LIMIT 18446744073709551615 OFFSET {}", offset),
            (None, None) => String::new(),
        };
        if clause.is_empty() {
            Ok(sql.to_string())
        } else {
            Ok(format!("{} {}", sql, clause))
        }
    }

    /// Casts an expression to the dialect's rendering of a logical type.
    fn convert(&self, expression: &str, db_type: DbType) -> Result<String>;

    /// Column DDL type from a logical type plus optional length /
    /// precision / scale.
    fn column(
        &self,
        db_type: DbType,
        length: Option<u64>,
        precision: Option<u8>,
        scale: Option<u8>,
    ) -> Result<String>;

    fn coalesce(&self, expressions: &[&str]) -> Result<String> {
        Ok(format!("COALESCE({})", expressions.join(", ")))
    }

    /// Statement testing whether a table exists in the current catalog.
    fn exists_table(&self, table: &str) -> Result<String>;

    /// Folds an identifier into the dialect's catalog case. Default keeps
    /// it untouched.
    fn toggle_case(&self, identifier: &str) -> String {
        identifier.to_string()
    }

    /// Corrects a logical type to the nearest one the vendor can store.
    fn correct_db_type(&self, db_type: DbType) -> DbType {
        db_type
    }

    fn is_reserved_word(&self, _word: &str) -> bool {
        false
    }

    /// Renders a datetime literal for this dialect.
    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        format!("'{}'", value.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Keeps alphanumerics and underscores, never starts with a digit.
pub(crate) fn normalize_parameter_name(name: &str) -> String {
    let mut result = String::new();
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            result.push(ch);
        } else {
            result.push('_');
        }
    }
    if result.chars().next().map_or(false, |c| c.is_numeric()) {
        format!("p{}", result)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_parameter_name() {
        assert_eq!(normalize_parameter_name("user name"), "user_name");
        assert_eq!(normalize_parameter_name("1st"), "p1st");
        assert_eq!(normalize_parameter_name("ok_1"), "ok_1");
    }

    #[test]
    fn test_segment_page() {
        let seg = Segment::page(3, 10);
        assert_eq!(seg.offset, Some(20));
        assert_eq!(seg.limit, Some(10));
        assert!(Segment::default().is_empty());
    }
}
