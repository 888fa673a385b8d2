// system-tests/tests/suites/end_to_end.rs
// ============================================================================
// Module: End-to-End Tests
// Description: Config file to translated query to rows read through the primitive.
// Purpose: Ensure in-query resolution agrees with host-side lookup.
// Dependencies: system-tests helpers, mcs-config, mcs-core, mcs-query, mcs-sql, tempfile
// ============================================================================

//! ## Overview
//! A config file is loaded from disk, products are stored as XML column
//! text, and the literals each backend freezes into `mcs_get_string` are
//! executed against the stored rows. The rows must match what host-side
//! `get_string` returns for the same culture, flag and policy.

use std::io::Write;

use mcs_config::I18nConfig;
use mcs_query::Expr;
use mcs_query::Query;
use mcs_translate::AccessorName;
use mcs_translate::NoopTrace;
use mcs_translate::Shape;
use tempfile::NamedTempFile;

use crate::helpers::calls::CallArgs;
use crate::helpers::calls::hql_call;
use crate::helpers::calls::sql_call;
use crate::helpers::fixtures::FIXTURE_CONFIG;
use crate::helpers::fixtures::TestResult;
use crate::helpers::fixtures::context;
use crate::helpers::fixtures::culture;
use crate::helpers::fixtures::ensure;
use crate::helpers::fixtures::hql;
use crate::helpers::fixtures::init_tracing;
use crate::helpers::fixtures::products;
use crate::helpers::fixtures::sql;
use crate::helpers::store::ProductTable;
use crate::helpers::store::frozen_hql;
use crate::helpers::store::frozen_sql;

/// Writes the fixture config to a temp file and loads it back.
fn loaded_config() -> TestResult<(NamedTempFile, I18nConfig)> {
    let mut file = NamedTempFile::new()?;
    file.write_all(FIXTURE_CONFIG.as_bytes())?;
    let config = I18nConfig::load(Some(file.path()))?;
    Ok((file, config))
}

/// Expected `(id, name)` rows.
fn rows(expected: &[(i64, Option<&str>)]) -> Vec<(i64, Option<String>)> {
    expected.iter().map(|(id, text)| (*id, text.map(str::to_string))).collect()
}

#[test]
fn stored_rows_resolve_like_host_lookup() -> TestResult {
    init_tracing();
    let (_file, config) = loaded_config()?;
    let table = ProductTable::store(config.xml_formatter(), products()?)?;
    let policy = config.fallback_policy()?;
    for requested in ["ru", "en", "kz-KZ", "en-US", "fr-FR"] {
        for flag in [true, false] {
            let args = CallArgs {
                culture: culture(requested)?,
                flag,
                policy: None,
            };
            let scope = args.scope();
            let select = sql(&config, config.translation_context()?)?.translate_query(
                &Query::from("Product", "p").select(sql_call(AccessorName::ToString, Shape::S4)),
                &scope,
                &mut NoopTrace,
            )?;
            let frozen = select.projection.first().and_then(frozen_sql).ok_or("no primitive call")?;
            let in_query = table.execute(&frozen)?;
            let host = table.host_lookup(&args.culture, flag, &*policy)?;
            ensure(
                in_query == host,
                format!("{requested}/{flag}: query {in_query:?} vs host {host:?}"),
            )?;
        }
    }
    Ok(())
}

#[test]
fn kazakh_reader_falls_back_through_russian() -> TestResult {
    let (_file, config) = loaded_config()?;
    let table = ProductTable::store(config.xml_formatter(), products()?)?;
    let node = hql(context(&config, "kz-KZ")?).translate_expr(
        &hql_call(AccessorName::GetString, Shape::S0),
        &CallArgs {
            culture: culture("kz-KZ")?,
            flag: true,
            policy: None,
        }
        .scope(),
        &mut NoopTrace,
    )?;
    let frozen = frozen_hql(&node).ok_or("no primitive call")?;
    ensure(frozen == ("kz-KZ".to_string(), Some("kz-KZ,kz,ru".to_string())), format!("{frozen:?}"))?;
    let expected = rows(&[
        (1, Some("Шоколад Алина")),
        (2, Some("Конфеты")),
        (3, Some("Шоколад")),
        (4, None),
    ]);
    ensure(table.execute(&frozen)? == expected, "kz-KZ rows")?;
    Ok(())
}

#[test]
fn english_reader_uses_wildcard_chain() -> TestResult {
    let (_file, config) = loaded_config()?;
    let table = ProductTable::store(config.xml_formatter(), products()?)?;
    let node = hql(context(&config, "en-US")?).translate_expr(
        &hql_call(AccessorName::ToString, Shape::S0),
        &CallArgs {
            culture: culture("en-US")?,
            flag: true,
            policy: None,
        }
        .scope(),
        &mut NoopTrace,
    )?;
    let frozen = frozen_hql(&node).ok_or("no primitive call")?;
    let expected = rows(&[
        (1, Some("Chocolate Alina")),
        (2, None),
        (3, Some("Chocolate bar")),
        (4, None),
    ]);
    ensure(table.execute(&frozen)? == expected, "en-US rows")?;
    Ok(())
}

#[test]
fn filter_on_localized_name_matches_one_row() -> TestResult {
    let (_file, config) = loaded_config()?;
    let table = ProductTable::store(config.xml_formatter(), products()?)?;
    let select = sql(&config, context(&config, "en")?)?.translate_query(
        &Query::from("Product", "p")
            .filter(Expr::equals(
                sql_call(AccessorName::ToString, Shape::S0),
                Expr::constant("Chocolate Alina"),
            )),
        &CallArgs {
            culture: culture("en")?,
            flag: true,
            policy: None,
        }
        .scope(),
        &mut NoopTrace,
    )?;
    let predicate = select.predicate.as_ref().ok_or("missing predicate")?;
    let frozen = frozen_sql(predicate).ok_or("no primitive call")?;
    let matching: Vec<i64> = table
        .execute(&frozen)?
        .into_iter()
        .filter(|(_, text)| text.as_deref() == Some("Chocolate Alina"))
        .map(|(id, _)| id)
        .collect();
    ensure(matching == vec![1], format!("unexpected matches {matching:?}"))?;
    Ok(())
}

#[test]
fn missing_names_are_stored_as_null_columns() -> TestResult {
    let (_file, config) = loaded_config()?;
    let table = ProductTable::store(config.xml_formatter(), products()?)?;
    let stored: Vec<Option<&str>> = table.stored_names().collect();
    ensure(stored.len() == 4, "four rows stored")?;
    ensure(stored[3].is_none(), "unset name is a null column")?;
    ensure(
        stored[0].is_some_and(|text| {
            text.ends_with("<ru>Шоколад Алина</ru><en>Chocolate Alina</en></MultiCulturalString>")
        }),
        format!("unexpected stored text {:?}", stored[0]),
    )?;
    Ok(())
}
