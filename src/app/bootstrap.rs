use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::app::controller::{GridController, RenderPass};
use crate::canvas::CanvasProvider;
use crate::config::{load_config, validate_config, GridConfig};
use crate::error::Result;
use crate::fetch::HttpChartSource;
use crate::render::RasterSurface;

/// Overrides gathered by the binary before a render.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub symbols: Option<Vec<String>>,
    pub debug: bool,
    pub output: Option<PathBuf>,
}

impl RunOptions {
    /// Load the config file (or the built-in defaults) and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<GridConfig> {
        let mut config = match &self.config_path {
            Some(path) => load_config(path)?,
            None => GridConfig::builtin(),
        };

        if let Some(symbols) = &self.symbols {
            config.stock_symbols = symbols.clone();
        }
        config.debug_mode |= self.debug;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Entry point used by `main`: render one panel over HTTP and optionally save it as PNG.
pub async fn run(options: &RunOptions, canvas: &dyn CanvasProvider) -> Result<RenderPass> {
    let config = options.resolve_config()?;
    let source = Arc::new(HttpChartSource::new()?);
    let controller = GridController::new(config, source, RasterSurface::new());

    let pass = controller.render(canvas.canvas_size()).await;

    if let Some(path) = &options.output {
        controller.surface().save_png(&pass.tree, path)?;
        info!("Wrote panel to {}", path.display());
    }

    Ok(pass)
}
