// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for statement compilation and generator runs

use std::collections::BTreeMap;
use std::sync::Arc;

use sqlforge_catalog::{raw_column_from_type_name, CatalogError, DriverRegistry, MySqlDriver};
use sqlforge_compiler::{
    CompileError, Generator, GeneratorConfig, StatementCompiler, StatementFailure, StatementKind,
    TemplateDocument, TypeMapError,
};
use sqlforge_directive::{
    build_document, Directive, DirectiveContext, DirectiveRegistry, DirectiveResult,
    ResultColumnType, TemplateNode,
};
use sqlforge_ir::{CanonicalType, DbInfo, Dialect};
use sqlforge_test_utils::{
    MockConnection, MockConnectionBuilder, SchemaAssertions, SchemaFixtures, TemplateFixtures,
};

fn doc(body: &str) -> String {
    format!("<stmts>{}</stmts>", body)
}

fn templates(body: &str) -> Vec<sqlforge_directive::StatementTemplate> {
    build_document(
        &doc(body),
        &DirectiveRegistry::with_builtins(),
        &SchemaFixtures::standard_db(),
        Dialect::MySQL,
    )
    .unwrap()
}

#[tokio::test]
async fn test_replace_probes_origin_and_emits_replacement() {
    let driver = MySqlDriver::new();
    let compiler = StatementCompiler::new(&driver);
    let mut conn = MockConnection::new().on_describe(
        "SELECT 1+1 AS x",
        vec![raw_column_from_type_name("x", "BIGINT", Some(false))],
    );

    let template = templates(r#"<stmt name="X">SELECT <replace with="?">1+1</replace> AS x</stmt>"#)
        .remove(0);
    let compiled = compiler
        .compile(&mut conn, "x.xml", Arc::new(template))
        .await
        .unwrap();

    assert_eq!(compiled.kind, StatementKind::Select);
    assert_eq!(compiled.probe.as_deref(), Some("SELECT 1+1 AS x"));
    assert_eq!(compiled.text, "SELECT ? AS x");
    assert_eq!(compiled.columns.len(), 1);
    SchemaAssertions::assert_column(&compiled.columns[0], "x", CanonicalType::Int64, false);
    assert_eq!(conn.issued(), &["SELECT 1+1 AS x".to_string()]);
}

#[tokio::test]
async fn test_non_select_is_not_probed() {
    let driver = MySqlDriver::new();
    let compiler = StatementCompiler::new(&driver);
    let mut conn = MockConnection::new();

    let template = templates(
        r#"<stmt name="Touch">UPDATE users SET active = 1 WHERE id = <arg name="id" type="uint64">7</arg></stmt>"#,
    )
    .remove(0);
    let compiled = compiler
        .compile(&mut conn, "users.xml", Arc::new(template))
        .await
        .unwrap();

    assert_eq!(compiled.kind, StatementKind::Update);
    assert_eq!(compiled.text, "UPDATE users SET active = 1 WHERE id = ?");
    assert!(compiled.probe.is_none());
    assert!(compiled.columns.is_empty());
    assert_eq!(compiled.template.arguments()[0].sample, "7");
    assert!(conn.issued().is_empty());
}

#[tokio::test]
async fn test_probe_failure_is_statement_scoped() {
    let driver = MySqlDriver::new();
    let compiler = StatementCompiler::new(&driver);
    let mut conn = MockConnection::new()
        .fail_describe("SELECT nope FROM users", "Unknown column 'nope'")
        .on_describe(
            "SELECT id FROM users",
            vec![raw_column_from_type_name("id", "BIGINT UNSIGNED", Some(false))],
        );

    let results = compiler
        .compile_document(
            &mut conn,
            "users.xml",
            templates(
                r#"<stmt name="Broken">SELECT nope FROM users</stmt><stmt name="Ids">SELECT id FROM users</stmt>"#,
            ),
        )
        .await;
    assert_eq!(results.len(), 2);

    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.statement(), Some("Broken"));
    assert_eq!(err.query(), Some("SELECT nope FROM users"));
    let message = err.to_string();
    assert!(message.starts_with("users.xml: statement 'Broken'"));
    assert!(message.contains("Unknown column 'nope'"));

    let ids = results[1].as_ref().unwrap();
    SchemaAssertions::assert_column(&ids.columns[0], "id", CanonicalType::Uint64, false);
}

#[tokio::test]
async fn test_unclassified_result_column_fails_statement() {
    let driver = MySqlDriver::new();
    let compiler = StatementCompiler::new(&driver);
    let mut conn = MockConnection::new().on_describe(
        "SELECT NULL AS n",
        vec![raw_column_from_type_name("n", "NULL", Some(true))],
    );

    let template = templates(r#"<stmt name="N">SELECT NULL AS n</stmt>"#).remove(0);
    let err = compiler
        .compile(&mut conn, "n.xml", Arc::new(template))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::Statement {
            source: StatementFailure::Catalog(CatalogError::UnclassifiedColumn { .. }),
            ..
        }
    ));
}

/// Marks every result column nullable and drops the last one
#[derive(Debug, Default)]
struct Loosen;

impl Directive for Loosen {
    fn initialize(&mut self, _ctx: &mut DirectiveContext<'_>, _node: &TemplateNode) -> DirectiveResult<()> {
        Ok(())
    }

    fn generate(&self) -> DirectiveResult<String> {
        Ok(String::new())
    }

    fn generate_query(&self) -> DirectiveResult<String> {
        Ok(String::new())
    }

    fn process_query_result(
        &self,
        names: &mut Vec<String>,
        types: &mut Vec<ResultColumnType>,
    ) -> DirectiveResult<()> {
        names.pop();
        types.pop();
        for ty in types.iter_mut() {
            ty.nullable = true;
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_processing_shapes_final_columns() {
    let driver = MySqlDriver::new();
    let compiler = StatementCompiler::new(&driver);
    let mut conn = MockConnection::new().on_describe(
        "SELECT id, email FROM users",
        vec![
            raw_column_from_type_name("id", "BIGINT UNSIGNED", Some(false)),
            raw_column_from_type_name("email", "VARCHAR", Some(false)),
        ],
    );

    let mut registry = DirectiveRegistry::with_builtins();
    registry.register(|| Box::new(Loosen), &["loosen"]);
    let template = build_document(
        &doc(r#"<stmt name="L">SELECT id, email FROM users<loosen/></stmt>"#),
        &registry,
        &DbInfo::default(),
        Dialect::MySQL,
    )
    .unwrap()
    .remove(0);

    let compiled = compiler
        .compile(&mut conn, "l.xml", Arc::new(template))
        .await
        .unwrap();
    assert_eq!(compiled.columns.len(), 1);
    SchemaAssertions::assert_column(&compiled.columns[0], "id", CanonicalType::Uint64, true);
}

fn generator_connection() -> MockConnection {
    // Probe texts come from the same templates the generator will build
    let statements = build_document(
        TemplateFixtures::user_queries(),
        &DirectiveRegistry::with_builtins(),
        &SchemaFixtures::standard_db(),
        Dialect::MySQL,
    )
    .unwrap();
    let get_user = statements[0].generate_query().unwrap();
    let count_active = statements[1].generate_query().unwrap();

    MockConnectionBuilder::new()
        .with_standard_schema()
        .with_describe(
            &get_user,
            vec![
                raw_column_from_type_name("id", "BIGINT UNSIGNED", Some(false)),
                raw_column_from_type_name("email", "VARCHAR", Some(false)),
                raw_column_from_type_name("name", "VARCHAR", Some(true)),
                raw_column_from_type_name("active", "BOOLEAN", Some(false)),
                raw_column_from_type_name("created_at", "DATETIME", Some(true)),
            ],
        )
        .with_describe(
            &count_active,
            vec![raw_column_from_type_name("n", "BIGINT", Some(false))],
        )
        .build()
}

fn full_type_map() -> BTreeMap<String, String> {
    CanonicalType::ALL
        .iter()
        .map(|ty| (ty.as_str().to_string(), format!("T{}", ty)))
        .collect()
}

#[tokio::test]
async fn test_generator_run() {
    let mut config = GeneratorConfig::new("mysql", "mysql://localhost/app").with_blacklist(["orders"]);
    config.type_map = full_type_map();
    let generator = Generator::new(config).unwrap();
    let mut conn = generator_connection();

    let output = generator
        .run(
            &mut conn,
            &[TemplateDocument::new("users.xml", TemplateFixtures::user_queries())],
        )
        .await
        .unwrap();

    assert_eq!(output.driver, "mysql");
    assert_eq!(output.tables, vec![SchemaFixtures::users()]);
    assert_eq!(
        output.type_map.as_ref().and_then(|m| m.get(CanonicalType::Bool)),
        Some("Tbool")
    );

    let statements = &output.documents[0].statements;
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[0].name(), "GetUser");
    assert_eq!(statements[0].columns.len(), 5);
    SchemaAssertions::assert_column(&statements[0].columns[3], "active", CanonicalType::Bool, false);
    assert_eq!(statements[1].columns[0].data_type, CanonicalType::Int64);
    assert_eq!(statements[2].kind, StatementKind::Update);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["documents"][0]["statements"][0]["statement"]["name"], "GetUser");
    assert_eq!(json["documents"][0]["statements"][0]["statement"]["args"][0]["name"], "id");
    assert_eq!(json["tables"][0]["columns"][0]["data_type"], "uint64");
    assert_eq!(json["type_map"]["json"], "Tjson");
}

#[tokio::test]
async fn test_generator_unknown_driver() {
    let generator = Generator::new(GeneratorConfig::new("oracle", "oracle://h/d")).unwrap();
    let mut conn = generator_connection();
    let err = generator.run(&mut conn, &[]).await.unwrap_err();
    assert!(matches!(err, CompileError::Catalog(CatalogError::UnknownDriver(_))));
    assert!(conn.issued().is_empty());
}

#[tokio::test]
async fn test_generator_incomplete_type_map_fails_before_load() {
    let mut config = GeneratorConfig::new("mysql", "mysql://localhost/app");
    config.type_map = [("bool".to_string(), "bool".to_string())].into_iter().collect();
    let generator = Generator::new(config).unwrap();
    let mut conn = generator_connection();

    let err = generator.run(&mut conn, &[]).await.unwrap_err();
    assert!(matches!(err, CompileError::TypeMap(TypeMapError::Incomplete { .. })));
    assert!(conn.issued().is_empty());
}

#[tokio::test]
async fn test_generator_rejects_ambiguous_filters() {
    let config = GeneratorConfig::new("mysql", "mysql://localhost/app")
        .with_whitelist(["users"])
        .with_blacklist(["orders"]);
    assert!(matches!(Generator::new(config), Err(CompileError::Config(_))));
}

#[tokio::test]
async fn test_generator_unknown_tag_names_document() {
    let generator = Generator::new(GeneratorConfig::new("mysql", "mysql://localhost/app")).unwrap();
    let mut conn = generator_connection();

    let err = generator
        .run(
            &mut conn,
            &[TemplateDocument::new("bad.xml", TemplateFixtures::unknown_tag())],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CompileError::Document { ref document, .. } if document == "bad.xml"));
    assert!(err.to_string().contains("Unknown directive <bogus> in statement 'Bad'"));
}

#[tokio::test]
async fn test_generator_registry_alias() {
    let generator = Generator::with_registries(
        GeneratorConfig::new("tidb", "mysql://localhost/app"),
        DriverRegistry::with_builtins(),
        DirectiveRegistry::with_builtins(),
    )
    .unwrap();
    let mut conn = generator_connection();

    let output = generator.run(&mut conn, &[]).await.unwrap();
    assert_eq!(output.driver, "tidb");
    assert_eq!(output.tables.len(), 2);
    assert!(output.type_map.is_none());
}
