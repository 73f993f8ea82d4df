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

//!
//! Cross-dialect invariants over the syntax tables.
//!
use std::sync::Arc;

use husky::{DbType, DriverCatalog, HuskyError, ProviderRegistry, Segment, SyntaxProvider};

const ALL_PROVIDERS: &[&str] = &[
    "SqlServer", "Oracle", "MySql", "PostgreSql", "SQLite", "Firebird", "Dameng", "Kingbase",
    "ShenTong", "OleDb",
];

fn syntaxes() -> Vec<Arc<dyn SyntaxProvider>> {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    ALL_PROVIDERS
        .iter()
        .map(|name| {
            registry
                .get_defined_provider_instance(name)
                .unwrap_or_else(|| panic!("provider {} must exist", name))
                .syntax()
        })
        .collect()
}

#[test]
fn round_without_digits_defaults_to_zero_everywhere() {
    for syntax in syntaxes() {
        let math = syntax.math_syntax();
        let implicit = math.round("score", None).unwrap();
        let explicit = math.round("score", Some("0")).unwrap();
        assert_eq!(implicit, explicit, "dialect {}", syntax.name());
        assert!(implicit.contains("0"), "dialect {}", syntax.name());
    }
}

#[test]
fn mysql_pad_uses_native_truncating_functions() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let syntax = registry.get_defined_provider_instance("MySql").unwrap().syntax();

    assert_eq!(
        syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap(),
        "LPAD('ALFKI', 7, '-')"
    );
    assert_eq!(
        syntax.string_syntax().pad_right("'ALFKI'", "2", "'-'").unwrap(),
        "RPAD('ALFKI', 2, '-')"
    );
}

#[test]
fn conditional_pad_dialects_render_all_three_branches() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    for name in ["SqlServer", "SQLite", "OleDb"] {
        let syntax = registry.get_defined_provider_instance(name).unwrap().syntax();
        let fragment = syntax.string_syntax().pad_left("'ALFKI'", "7", "'-'").unwrap();
        // Too-long truncates with LEFT/SUBSTR, exact width passes through,
        // too-short pads by the width difference.
        assert!(
            fragment.contains("LEFT('ALFKI', 7)") || fragment.contains("SUBSTR('ALFKI', 1, 7)"),
            "dialect {} missing truncation branch: {}",
            name,
            fragment
        );
        assert!(fragment.contains("= 7"), "dialect {} missing exact branch", name);
        assert!(
            fragment.contains("7 - LEN") || fragment.contains("7 - LENGTH"),
            "dialect {} missing pad branch",
            name
        );
    }
}

#[test]
fn decimal_column_defaults_and_half_substitution() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    for (name, keyword) in [
        ("MySql", "DECIMAL"),
        ("SqlServer", "DECIMAL"),
        ("SQLite", "DECIMAL"),
        ("OleDb", "DECIMAL"),
        ("PostgreSql", "NUMERIC"),
        ("Kingbase", "NUMERIC"),
    ] {
        let syntax = registry.get_defined_provider_instance(name).unwrap().syntax();
        assert_eq!(
            syntax.column(DbType::Decimal, None, None, None).unwrap(),
            format!("{}(19, 5)", keyword),
            "dialect {}",
            name
        );
        assert_eq!(
            syntax.column(DbType::Decimal, None, None, Some(2)).unwrap(),
            format!("{}(19, 2)", keyword),
            "dialect {}",
            name
        );
        assert_eq!(
            syntax.column(DbType::Decimal, None, Some(10), None).unwrap(),
            format!("{}(10, 5)", keyword),
            "dialect {}",
            name
        );
    }
}

#[test]
fn unsupported_operations_raise_never_mislead() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let oledb = registry.get_defined_provider_instance("OleDb").unwrap().syntax();

    for err in [
        oledb.math_syntax().floor("x").unwrap_err(),
        oledb.datetime_syntax().millisecond("x").unwrap_err(),
        oledb.datetime_syntax().utc_now().unwrap_err(),
        oledb.string_syntax().group_concat("x", "','").unwrap_err(),
        oledb.string_syntax().is_match("x", "'^a'").unwrap_err(),
    ] {
        match err {
            HuskyError::UnsupportedSyntax { ref dialect, .. } => assert_eq!(dialect, "OleDb"),
            other => panic!("expected UnsupportedSyntax, got {:?}", other),
        }
    }
}

#[test]
fn unknown_db_type_errors_name_the_operation() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let sqlite = registry.get_defined_provider_instance("SQLite").unwrap().syntax();

    match sqlite.convert("x", DbType::Object).unwrap_err() {
        HuskyError::UnknownDbType { operation, db_type } => {
            assert_eq!(operation, "Convert");
            assert_eq!(db_type, DbType::Object);
        }
        other => panic!("expected UnknownDbType, got {:?}", other),
    }
    match sqlite.column(DbType::Object, None, None, None).unwrap_err() {
        HuskyError::UnknownDbType { operation, .. } => assert_eq!(operation, "Column"),
        other => panic!("expected UnknownDbType, got {:?}", other),
    }
}

#[test]
fn segment_rendering_is_dialect_correct() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));
    let segment = Segment::range(20, 10);
    let cases = [
        ("MySql", "SELECT * FROM t LIMIT 10 OFFSET 20"),
        ("PostgreSql", "SELECT * FROM t LIMIT 10 OFFSET 20"),
        ("SQLite", "SELECT * FROM t LIMIT 10 OFFSET 20"),
        ("Firebird", "SELECT * FROM t ROWS 21 TO 30"),
        (
            "SqlServer",
            "SELECT * FROM t ORDER BY (SELECT NULL) OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY",
        ),
        ("Oracle", "SELECT * FROM t OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"),
    ];
    for (name, expected) in cases {
        let syntax = registry.get_defined_provider_instance(name).unwrap().syntax();
        assert_eq!(syntax.segment("SELECT * FROM t", &segment).unwrap(), expected, "dialect {}", name);
    }
}

#[test]
fn delimiters_and_parameters_match_each_engine() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));

    let mssql = registry.get_defined_provider_instance("SqlServer").unwrap().syntax();
    assert_eq!(mssql.delimit("dbo.users"), "[dbo].[users]");
    assert_eq!(mssql.format_parameter("user name"), "@user_name");
    assert!(mssql.is_reserved_word("select"));

    let mysql = registry.get_defined_provider_instance("MySql").unwrap().syntax();
    assert_eq!(mysql.delimit("app.users"), "`app`.`users`");
    assert_eq!(mysql.format_parameter("id"), "?id");

    let oracle = registry.get_defined_provider_instance("Oracle").unwrap().syntax();
    assert_eq!(oracle.format_parameter("1id"), ":p1id");
}

#[test]
fn wrapping_dialects_share_their_parent_tables() {
    let registry = ProviderRegistry::new(Arc::new(DriverCatalog::new()));

    let dameng = registry.get_defined_provider_instance("DM").unwrap().syntax();
    let oracle = registry.get_defined_provider_instance("Oracle").unwrap().syntax();
    assert_eq!(
        dameng.math_syntax().exclusive_or("a", "b").unwrap(),
        oracle.math_syntax().exclusive_or("a", "b").unwrap()
    );

    let kingbase = registry.get_defined_provider_instance("KingbaseES").unwrap().syntax();
    let postgres = registry.get_defined_provider_instance("Postgres").unwrap().syntax();
    assert_eq!(
        kingbase.datetime_syntax().add_days("d", "3").unwrap(),
        postgres.datetime_syntax().add_days("d", "3").unwrap()
    );
}
