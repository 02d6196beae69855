use std::{fs, path::Path};

use crate::error::{Context, Result};

use super::{validator, GridConfig};

/// Read a JSON grid config from disk and validate it.
pub fn load_config(path: &Path) -> Result<GridConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid config at {}", path.display()))?;

    let config: GridConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse grid config at {}", path.display()))?;

    validator::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_shipped_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join("stock_grid.json");
        let config = load_config(&path).expect("load shipped config");
        assert_eq!(config, GridConfig::builtin());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/does_not_exist.json");
        let err = load_config(&path).expect_err("missing file should fail");
        assert!(
            err.to_string().contains("does_not_exist.json"),
            "unexpected error message: {err}"
        );
    }
}
