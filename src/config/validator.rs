use crate::error::{AppError, Result};
use crate::render::Color;

use super::GridConfig;

/// Check the structural settings and surface every problem in one error.
///
/// The number of symbols is left alone here: an out-of-range count is reported by the
/// renderer as a full-panel error rather than refusing to load.
pub fn validate_config(config: &GridConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_symbols(config, &mut issues);
    validate_template(config, &mut issues);
    validate_limits(config, &mut issues);
    validate_color(config, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "grid config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_symbols(config: &GridConfig, issues: &mut Vec<String>) {
    for (idx, symbol) in config.stock_symbols.iter().enumerate() {
        if symbol.trim().is_empty() {
            issues.push(format!("stockSymbols[{idx}] must not be blank"));
        }
    }
}

fn validate_template(config: &GridConfig, issues: &mut Vec<String>) {
    if !config.chart_url_template.contains("{symbol}") {
        issues.push("chartUrlTemplate must contain a `{symbol}` placeholder".to_string());
    }
}

fn validate_limits(config: &GridConfig, issues: &mut Vec<String>) {
    if config.max_concurrent == 0 {
        issues.push("maxConcurrent must be at least 1".to_string());
    }

    if !(config.timeout_seconds.is_finite() && config.timeout_seconds > 0.0) {
        issues.push(format!(
            "timeoutSeconds must be positive, got {}",
            config.timeout_seconds
        ));
    } else if let Err(err) = config.timeout() {
        issues.push(err.to_string());
    }
}

fn validate_color(config: &GridConfig, issues: &mut Vec<String>) {
    if let Err(err) = Color::parse_hex(&config.background_color) {
        issues.push(format!("backgroundColor: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_builtin_config() {
        validate_config(&GridConfig::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn aggregates_multiple_issues() {
        let mut config = GridConfig::builtin();
        config.chart_url_template = "https://example.com/chart.png".to_string();
        config.max_concurrent = 0;
        config.timeout_seconds = 0.0;

        let err = validate_config(&config).expect_err("validation should fail");
        let msg = err.to_string();
        assert!(msg.contains("{symbol}"), "unexpected error message: {msg}");
        assert!(msg.contains("maxConcurrent"), "unexpected error message: {msg}");
        assert!(msg.contains("timeoutSeconds"), "unexpected error message: {msg}");
    }

    #[test]
    fn rejects_timeout_too_large_for_a_duration() {
        let mut config = GridConfig::builtin();
        config.timeout_seconds = 1e20;

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(err.to_string().contains("timeoutSeconds"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_unparsable_background() {
        let mut config = GridConfig::builtin();
        config.background_color = "dark grey".to_string();

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(
            err.to_string().contains("backgroundColor"),
            "unexpected error message: {}",
            err
        );
    }

    #[test]
    fn ignores_symbol_count() {
        let mut config = GridConfig::builtin();
        config.stock_symbols.push("META".to_string());
        validate_config(&config).expect("count is checked at render time");
    }

    #[test]
    fn rejects_blank_symbol() {
        let mut config = GridConfig::builtin();
        config.stock_symbols[1] = "  ".to_string();

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(err.to_string().contains("stockSymbols[1]"));
    }
}
