// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Fixtures
// Description: Fixture config, products and backend builders.
// Purpose: Build both translators from one validated configuration.
// Dependencies: system-tests, mcs-config, mcs-core, mcs-hql, mcs-sql, tracing-subscriber
// ============================================================================

use std::error::Error;
use std::fmt;

use mcs_config::I18nConfig;
use mcs_core::CultureName;
use mcs_core::MultiCulturalString;
use mcs_hql::HqlTranslator;
use mcs_sql::SqlModel;
use mcs_sql::SqlTranslator;
use mcs_translate::TranslationContext;
use system_tests::config::SystemTestConfig;
use tracing_subscriber::EnvFilter;

/// Standard result type used across system tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

/// Built-in config: the chain table used throughout the scenarios.
pub const FIXTURE_CONFIG: &str = r#"
[globalization]
ui_culture = "ru"

[fallback]
policy = "chains"
chains = [["kz-KZ", "kz", "ru"], ["*", "en"]]

[sql]
schema = "dbo"
"#;

/// Installs a test subscriber; the filter comes from the environment when set.
pub fn init_tracing() {
    let filter = SystemTestConfig::load()
        .ok()
        .and_then(|config| config.log_filter)
        .unwrap_or_else(|| "mcs_translate=debug".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Loads the config override from the environment, else the fixture config.
pub fn fixture_config() -> TestResult<I18nConfig> {
    let env = SystemTestConfig::load()?;
    match env.config_path {
        Some(path) => Ok(I18nConfig::load(Some(&path))?),
        None => Ok(I18nConfig::from_toml(FIXTURE_CONFIG)?),
    }
}

/// Parses a culture identifier.
pub fn culture(raw: &str) -> TestResult<CultureName> {
    Ok(CultureName::parse(raw)?)
}

/// Context of `config` with the ambient culture replaced by `ui_culture`.
pub fn context(config: &I18nConfig, ui_culture: &str) -> TestResult<TranslationContext> {
    Ok(config.translation_context()?.with_ui_culture(culture(ui_culture)?))
}

/// HQL backend over `ctx`.
pub fn hql(ctx: TranslationContext) -> HqlTranslator {
    HqlTranslator::new(ctx)
}

/// SQL backend over the `t_product` mapping with every accessor registered.
pub fn sql(config: &I18nConfig, ctx: TranslationContext) -> TestResult<SqlTranslator> {
    let mut model = SqlModel::with_mcs_accessors(config.sql.schema.clone())?;
    model
        .entity("Product", "t_product")
        .column("Id", "id_product")
        .column("Code", "code")
        .column("RawName", "name");
    Ok(SqlTranslator::new(model, ctx))
}

/// Product row before storage.
#[derive(Debug, Clone)]
pub struct Product {
    /// Primary key.
    pub id: i64,
    /// Article code.
    pub code: &'static str,
    /// Localized name, `None` when never set.
    pub name: Option<MultiCulturalString>,
}

/// Products used by the end-to-end scenarios.
pub fn products() -> TestResult<Vec<Product>> {
    Ok(vec![
        Product {
            id: 1,
            code: "V0016887",
            name: Some(
                MultiCulturalString::single(culture("ru")?, "Шоколад Алина")
                    .with(culture("en")?, "Chocolate Alina"),
            ),
        },
        Product {
            id: 2,
            code: "V0016888",
            name: Some(MultiCulturalString::single(culture("ru")?, "Конфеты")),
        },
        Product {
            id: 3,
            code: "V0016889",
            name: Some(
                MultiCulturalString::single(culture("kz")?, "Шоколад")
                    .with(culture("en-US")?, "Chocolate bar"),
            ),
        },
        Product {
            id: 4,
            code: "V0016890",
            name: None,
        },
    ])
}
