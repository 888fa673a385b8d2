// system-tests/tests/suites/scenarios.rs
// ============================================================================
// Module: Translation Scenario Tests
// Description: Concrete accessor scenarios rendered by both backends.
// Purpose: Pin emitted query text for the reference chain table.
// Dependencies: system-tests helpers, mcs-core, mcs-hql, mcs-query, mcs-sql, mcs-translate
// ============================================================================

//! ## Overview
//! The fixture config uses chains `[["kz-KZ","kz","ru"], ["*","en"]]` and the
//! ambient culture `ru`.

use std::sync::Arc;

use mcs_core::CultureName;
use mcs_core::FallbackPolicy;
use mcs_core::PolicyError;
use mcs_core::SharedPolicy;
use mcs_hql::HqlError;
use mcs_query::Expr;
use mcs_query::MethodRef;
use mcs_query::Query;
use mcs_query::Scope;
use mcs_sql::SqlError;
use mcs_sql::SqlModel;
use mcs_translate::AccessorName;
use mcs_translate::ParamType;
use mcs_translate::Shape;
use mcs_translate::TranslateError;

use crate::helpers::calls::CallArgs;
use crate::helpers::calls::hql_call;
use crate::helpers::calls::sql_call;
use crate::helpers::fixtures::TestResult;
use crate::helpers::fixtures::context;
use crate::helpers::fixtures::culture;
use crate::helpers::fixtures::ensure;
use crate::helpers::fixtures::fixture_config;
use crate::helpers::fixtures::hql;
use crate::helpers::fixtures::sql;
use crate::helpers::recording::RecordingTrace;
use crate::helpers::recording::TraceEvent;

/// Policy that always fails.
#[derive(Debug)]
struct FailingPolicy;

impl FallbackPolicy for FailingPolicy {
    fn chain(&self, _culture: &CultureName) -> Result<Vec<CultureName>, PolicyError> {
        Err(PolicyError::new("policy store unavailable"))
    }
}

/// Renders the same projection through both backends.
fn render_both(
    ui_culture: &str,
    accessor: AccessorName,
    shape: Shape,
    scope: &Scope,
) -> TestResult<(String, String)> {
    let config = fixture_config()?;
    let hql = hql(context(&config, ui_culture)?)
        .render_query(&Query::from("Product", "p").select(hql_call(accessor, shape)), scope)?;
    let sql = sql(&config, context(&config, ui_culture)?)?
        .render_query(&Query::from("Product", "p").select(sql_call(accessor, shape)), scope)?;
    Ok((hql, sql))
}

#[test]
fn exact_chain_head_selects_its_chain() -> TestResult {
    let args = CallArgs {
        culture: culture("kz-KZ")?,
        flag: true,
        policy: None,
    };
    let (hql, sql) = render_both("ru", AccessorName::ToString, Shape::S1, &args.scope())?;
    ensure(
        hql == "select mcs_get_string(p.Name, 'kz-KZ', 'kz-KZ,kz,ru') from Product p",
        format!("unexpected hql: {hql}"),
    )?;
    ensure(
        sql == "SELECT [dbo].[mcs_get_string]([p].[name], N'kz-KZ', N'kz-KZ,kz,ru') FROM [dbo].[t_product] AS [p]",
        format!("unexpected sql: {sql}"),
    )?;
    Ok(())
}

#[test]
fn wildcard_chain_resolves_to_requested_culture() -> TestResult {
    let args = CallArgs {
        culture: culture("fr-FR")?,
        flag: true,
        policy: None,
    };
    let (hql, sql) = render_both("ru", AccessorName::GetString, Shape::S4, &args.scope())?;
    ensure(hql.contains("mcs_get_string(p.Name, 'fr-FR', 'fr-FR,en')"), format!("unexpected hql: {hql}"))?;
    ensure(
        sql.contains("[dbo].[mcs_get_string]([p].[name], N'fr-FR', N'fr-FR,en')"),
        format!("unexpected sql: {sql}"),
    )?;
    Ok(())
}

#[test]
fn zero_argument_accessor_uses_ambient_culture() -> TestResult {
    let (hql, sql) = render_both("ru", AccessorName::ToString, Shape::S0, &Scope::new())?;
    ensure(hql.contains("mcs_get_string(p.Name, 'ru', 'ru,en')"), format!("unexpected hql: {hql}"))?;
    ensure(
        sql.contains("[dbo].[mcs_get_string]([p].[name], N'ru', N'ru,en')"),
        format!("unexpected sql: {sql}"),
    )?;
    Ok(())
}

#[test]
fn false_flag_disables_the_chain_whatever_the_policy() -> TestResult {
    let args = CallArgs {
        culture: culture("kz-KZ")?,
        flag: false,
        policy: Some(Arc::new(FailingPolicy)),
    };
    for shape in [Shape::S2, Shape::S4, Shape::S6] {
        let (hql, sql) = render_both("ru", AccessorName::ToString, shape, &args.scope())?;
        ensure(hql.contains(", null)"), format!("{shape}: unexpected hql: {hql}"))?;
        ensure(sql.contains(", NULL)"), format!("{shape}: unexpected sql: {sql}"))?;
    }
    Ok(())
}

#[test]
fn policy_failure_propagates_unchanged() -> TestResult {
    let config = fixture_config()?;
    let policy: SharedPolicy = Arc::new(FailingPolicy);
    let args = CallArgs {
        culture: culture("ru")?,
        flag: true,
        policy: Some(policy),
    };
    let expected = TranslateError::Policy(PolicyError::new("policy store unavailable"));
    let mut trace = RecordingTrace::default();
    let hql_err = hql(context(&config, "ru")?)
        .translate_expr(&hql_call(AccessorName::GetString, Shape::S5), &args.scope(), &mut trace)
        .err()
        .ok_or("hql ignored the failing policy")?;
    ensure(hql_err == HqlError::Translate(expected.clone()), format!("hql: {hql_err}"))?;
    ensure(
        trace.events.last() == Some(&TraceEvent::Rejected(Shape::S5, expected.clone())),
        "rejection traced with the policy error",
    )?;
    let sql_err = sql(&config, context(&config, "ru")?)?
        .translate_expr(
            "Product",
            &sql_call(AccessorName::GetString, Shape::S5),
            &args.scope(),
            &mut trace,
        )
        .err()
        .ok_or("sql ignored the failing policy")?;
    ensure(sql_err == SqlError::Translate(expected), format!("sql: {sql_err}"))?;
    Ok(())
}

#[test]
fn unsupported_signatures_fail_in_each_framework_style() -> TestResult {
    let config = fixture_config()?;
    let hql_call = Expr::call(
        Expr::property("p", "Name", ParamType::MultiCulturalString),
        MethodRef::instance("to_string", vec![ParamType::Boolean, ParamType::Culture]),
        vec![Expr::constant(true), Expr::constant(culture("ru")?)],
    );
    let hql_result = hql(context(&config, "ru")?).translate_expr(
        &hql_call,
        &Scope::new(),
        &mut RecordingTrace::default(),
    );
    ensure(matches!(hql_result, Err(HqlError::UnsupportedMethod(_))), "hql leaves the call unclaimed")?;

    let mut model = SqlModel::with_mcs_accessors(config.sql.schema.clone())?;
    let registration = model.has_mcs_get_string_function(MethodRef::extension(
        "to_string",
        vec![ParamType::Text, ParamType::Boolean, ParamType::Culture],
    ));
    ensure(
        matches!(registration, Err(SqlError::Translate(TranslateError::UnsupportedSignature { .. }))),
        "sql rejects the signature when the model is built",
    )?;
    Ok(())
}
