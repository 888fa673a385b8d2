// system-tests/tests/suites/parity.rs
// ============================================================================
// Module: Backend Parity Tests
// Description: Both backends resolve every overload to the same triple.
// Purpose: Ensure one pipeline drives both frameworks identically.
// Dependencies: system-tests helpers, mcs-core, mcs-hql, mcs-sql, mcs-translate, proptest
// ============================================================================

//! ## Overview
//! Each accessor overload is translated by both backends with the same
//! captured arguments. The recorded traces and the literals frozen into the
//! emitted `mcs_get_string` calls must agree, for successes and rejections.

use std::sync::Arc;

use mcs_core::NoFallbackPolicy;
use mcs_core::ParentCultureFallbackPolicy;
use mcs_core::SharedPolicy;
use mcs_hql::HqlError;
use mcs_query::Expr;
use mcs_query::MethodRef;
use mcs_query::Scope;
use mcs_sql::SqlError;
use mcs_translate::AccessorName;
use mcs_translate::ParamType;
use mcs_translate::Shape;
use mcs_translate::TranslateError;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use proptest::test_runner::TestCaseError;
use proptest::test_runner::TestRunner;
use system_tests::config::SystemTestConfig;

use crate::helpers::calls::CallArgs;
use crate::helpers::calls::hql_call;
use crate::helpers::calls::overloads;
use crate::helpers::calls::sql_call;
use crate::helpers::fixtures::TestResult;
use crate::helpers::fixtures::context;
use crate::helpers::fixtures::culture;
use crate::helpers::fixtures::ensure;
use crate::helpers::fixtures::fixture_config;
use crate::helpers::fixtures::hql;
use crate::helpers::fixtures::init_tracing;
use crate::helpers::fixtures::sql;
use crate::helpers::recording::RecordingTrace;
use crate::helpers::recording::TraceEvent;
use crate::helpers::store::FrozenArgs;
use crate::helpers::store::frozen_hql;
use crate::helpers::store::frozen_sql;

/// Outcome of one call site in one backend.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    /// Trace events.
    events: Vec<TraceEvent>,
    /// Frozen literals, or the translation error.
    result: Result<FrozenArgs, TranslateError>,
}

/// Translates one overload through both backends.
fn both(
    ui_culture: &str,
    accessor: AccessorName,
    shape: Shape,
    scope: &Scope,
) -> TestResult<(Outcome, Outcome)> {
    let config = fixture_config()?;
    let hql = hql(context(&config, ui_culture)?);
    let sql = sql(&config, context(&config, ui_culture)?)?;

    let mut hql_trace = RecordingTrace::default();
    let hql_result = match hql.translate_expr(&hql_call(accessor, shape), scope, &mut hql_trace) {
        Ok(node) => Ok(frozen_hql(&node).ok_or("hql emitted no mcs_get_string call")?),
        Err(HqlError::Translate(err)) => Err(err),
        Err(other) => return Err(other.into()),
    };
    let mut sql_trace = RecordingTrace::default();
    let sql_result =
        match sql.translate_expr("Product", &sql_call(accessor, shape), scope, &mut sql_trace) {
            Ok(expr) => Ok(frozen_sql(&expr).ok_or("sql emitted no mcs_get_string call")?),
            Err(SqlError::Translate(err)) => Err(err),
            Err(other) => return Err(other.into()),
        };
    Ok((
        Outcome {
            events: hql_trace.events,
            result: hql_result,
        },
        Outcome {
            events: sql_trace.events,
            result: sql_result,
        },
    ))
}

// ============================================================================
// SECTION: Exhaustive Parity
// ============================================================================

#[test]
fn every_overload_resolves_identically() -> TestResult {
    init_tracing();
    let policies: [Option<SharedPolicy>; 3] = [
        None,
        Some(Arc::new(NoFallbackPolicy)),
        Some(Arc::new(ParentCultureFallbackPolicy::new(vec![culture("en")?]))),
    ];
    for ui_culture in ["ru", "kz-KZ", "en-US"] {
        for requested in ["kz-KZ", "fr-FR"] {
            for flag in [true, false] {
                for policy in &policies {
                    let args = CallArgs {
                        culture: culture(requested)?,
                        flag,
                        policy: policy.clone(),
                    };
                    for (accessor, shape) in overloads() {
                        let (hql, sql) = both(ui_culture, accessor, shape, &args.scope())?;
                        ensure(
                            hql == sql,
                            format!("{accessor} {shape} diverged: hql {hql:?} vs sql {sql:?}"),
                        )?;
                        ensure(hql.result.is_ok(), format!("{accessor} {shape} rejected: {hql:?}"))?;
                    }
                }
            }
        }
    }
    Ok(())
}

#[test]
fn accessor_names_are_interchangeable() -> TestResult {
    let args = CallArgs {
        culture: culture("kz-KZ")?,
        flag: true,
        policy: None,
    };
    for shape in Shape::ALL {
        let (to_string, _) = both("ru", AccessorName::ToString, shape, &args.scope())?;
        let (get_string, _) = both("ru", AccessorName::GetString, shape, &args.scope())?;
        ensure(
            to_string.result == get_string.result,
            format!("{shape}: to_string and get_string resolve differently"),
        )?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Rejection Parity
// ============================================================================

#[test]
fn unbound_arguments_reject_identically() -> TestResult {
    for (accessor, shape) in overloads().filter(|(_, shape)| shape.arity() > 0) {
        let (hql, sql) = both("ru", accessor, shape, &Scope::new())?;
        ensure(hql == sql, format!("{accessor} {shape} rejections diverged"))?;
        ensure(
            matches!(hql.result, Err(TranslateError::Evaluation { position: 0, .. })),
            format!("{accessor} {shape}: unexpected {:?}", hql.result),
        )?;
        ensure(
            matches!(hql.events.last(), Some(TraceEvent::Rejected(..))),
            "rejection is traced",
        )?;
    }
    Ok(())
}

#[test]
fn row_dependent_flag_rejects_identically() -> TestResult {
    let config = fixture_config()?;
    let flag = Expr::equals(Expr::property("p", "Code", ParamType::Text), Expr::constant("V0016887"));
    let hql_call = Expr::call(
        Expr::property("p", "Name", ParamType::MultiCulturalString),
        MethodRef::instance("to_string", vec![ParamType::Boolean]),
        vec![flag.clone()],
    );
    let sql_call = Expr::call_static(
        MethodRef::extension("to_string", vec![ParamType::Text, ParamType::Boolean]),
        vec![Expr::property("p", "RawName", ParamType::Text), flag],
    );
    let hql_err = hql(context(&config, "ru")?)
        .translate_expr(&hql_call, &Scope::new(), &mut RecordingTrace::default())
        .err()
        .ok_or("hql accepted a row-dependent flag")?;
    let sql_err = sql(&config, context(&config, "ru")?)?
        .translate_expr("Product", &sql_call, &Scope::new(), &mut RecordingTrace::default())
        .err()
        .ok_or("sql accepted a row-dependent flag")?;
    let expected = TranslateError::NonConstantArgument {
        position: 0,
        detail: "p.Code".to_string(),
    };
    ensure(hql_err == HqlError::Translate(expected.clone()), format!("hql: {hql_err}"))?;
    ensure(sql_err == SqlError::Translate(expected), format!("sql: {sql_err}"))?;
    Ok(())
}

// ============================================================================
// SECTION: Randomized Parity
// ============================================================================

/// Culture pool for randomized call sites.
const CULTURES: [&str; 6] = ["ru", "kz-KZ", "kz", "en", "en-US", "zh-Hans-CN"];

#[test]
fn randomized_call_sites_resolve_identically() -> TestResult {
    let cases = SystemTestConfig::load()?.prop_cases.unwrap_or(64);
    let mut runner = TestRunner::new(ProptestConfig::with_cases(cases));
    let strategy = (
        0 .. CULTURES.len(),
        0 .. CULTURES.len(),
        any::<bool>(),
        0 .. 3_usize,
        0 .. AccessorName::ALL.len(),
        0 .. Shape::ALL.len(),
    );
    runner
        .run(&strategy, |(ui, requested, flag, policy, accessor, shape)| {
            let policy: Option<SharedPolicy> = match policy {
                0 => None,
                1 => Some(Arc::new(NoFallbackPolicy)),
                _ => Some(Arc::new(ParentCultureFallbackPolicy::default())),
            };
            let args = CallArgs {
                culture: culture(CULTURES[requested]).map_err(fail)?,
                flag,
                policy,
            };
            let (hql, sql) =
                both(CULTURES[ui], AccessorName::ALL[accessor], Shape::ALL[shape], &args.scope())
                    .map_err(fail)?;
            prop_assert_eq!(hql, sql);
            Ok(())
        })
        .map_err(|err| err.to_string())?;
    Ok(())
}

/// Converts a helper error into a proptest failure.
fn fail(err: Box<dyn std::error::Error>) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}
