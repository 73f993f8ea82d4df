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
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HuskyError;

/// The vendor-neutral logical type set. The per-dialect convert/column
/// tables are keyed by these values and form a wire contract with existing
/// schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbType {
    AnsiString,
    AnsiStringFixedLength,
    Binary,
    Boolean,
    Byte,
    Currency,
    Date,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    StringFixedLength,
    Time,
    UInt16,
    UInt32,
    UInt64,
    VarNumeric,
    Xml,
}

impl DbType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::AnsiString => "AnsiString",
            DbType::AnsiStringFixedLength => "AnsiStringFixedLength",
            DbType::Binary => "Binary",
            DbType::Boolean => "Boolean",
            DbType::Byte => "Byte",
            DbType::Currency => "Currency",
            DbType::Date => "Date",
            DbType::DateTime => "DateTime",
            DbType::DateTime2 => "DateTime2",
            DbType::DateTimeOffset => "DateTimeOffset",
            DbType::Decimal => "Decimal",
            DbType::Double => "Double",
            DbType::Guid => "Guid",
            DbType::Int16 => "Int16",
            DbType::Int32 => "Int32",
            DbType::Int64 => "Int64",
            DbType::Object => "Object",
            DbType::SByte => "SByte",
            DbType::Single => "Single",
            DbType::String => "String",
            DbType::StringFixedLength => "StringFixedLength",
            DbType::Time => "Time",
            DbType::UInt16 => "UInt16",
            DbType::UInt32 => "UInt32",
            DbType::UInt64 => "UInt64",
            DbType::VarNumeric => "VarNumeric",
            DbType::Xml => "Xml",
        }
    }

    pub fn is_string_type(&self) -> bool {
        matches!(
            self,
            DbType::AnsiString
                | DbType::AnsiStringFixedLength
                | DbType::String
                | DbType::StringFixedLength
        )
    }

    pub fn is_integer_type(&self) -> bool {
        matches!(
            self,
            DbType::Byte
                | DbType::SByte
                | DbType::Int16
                | DbType::Int32
                | DbType::Int64
                | DbType::UInt16
                | DbType::UInt32
                | DbType::UInt64
        )
    }

    pub fn is_decimal_type(&self) -> bool {
        matches!(
            self,
            DbType::Decimal | DbType::Currency | DbType::VarNumeric | DbType::Single | DbType::Double
        )
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbType {
    type Err = HuskyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "ansistring" => DbType::AnsiString,
            "ansistringfixedlength" => DbType::AnsiStringFixedLength,
            "binary" => DbType::Binary,
            "boolean" | "bool" => DbType::Boolean,
            "byte" => DbType::Byte,
            "currency" => DbType::Currency,
            "date" => DbType::Date,
            "datetime" => DbType::DateTime,
            "datetime2" => DbType::DateTime2,
            "datetimeoffset" => DbType::DateTimeOffset,
            "decimal" => DbType::Decimal,
            "double" => DbType::Double,
            "guid" | "uuid" => DbType::Guid,
            "int16" => DbType::Int16,
            "int32" | "int" => DbType::Int32,
            "int64" | "long" => DbType::Int64,
            "object" => DbType::Object,
            "sbyte" => DbType::SByte,
            "single" | "float" => DbType::Single,
            "string" => DbType::String,
            "stringfixedlength" => DbType::StringFixedLength,
            "time" => DbType::Time,
            "uint16" => DbType::UInt16,
            "uint32" => DbType::UInt32,
            "uint64" => DbType::UInt64,
            "varnumeric" => DbType::VarNumeric,
            "xml" => DbType::Xml,
            other => return Err(HuskyError::data_error(format!("unknown DbType name `{}`", other))),
        };
        Ok(ty)
    }
}

/// Scalar value carried by restriction dictionaries and schema rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Int(v) => Some(*v != 0),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_type_round_trip() {
        for ty in [DbType::AnsiString, DbType::Decimal, DbType::Guid, DbType::UInt64] {
            assert_eq!(ty.as_str().parse::<DbType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_db_type_parse_aliases() {
        assert_eq!("int".parse::<DbType>().unwrap(), DbType::Int32);
        assert_eq!("uuid".parse::<DbType>().unwrap(), DbType::Guid);
        assert!("blob".parse::<DbType>().is_err());
    }
}
