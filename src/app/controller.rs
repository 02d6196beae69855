use std::sync::Arc;

use log::{error, info};

use crate::config::GridConfig;
use crate::error::Result;
use crate::fetch::{ChartFetcher, ChartSource, ErrorLog};
use crate::layout::{cell_geometry, plan_layout, CanvasSize};
use crate::render::{
    error_footer, error_panel, render_grid, Color, GridStyle, RenderSurface, RenderTree,
};

/// Everything produced by one render: the panel and the failures behind its placeholders.
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub tree: RenderTree,
    pub errors: ErrorLog,
}

/// Sequences layout, fetching and rendering for one panel.
pub struct GridController<S: ChartSource + ?Sized, R: RenderSurface> {
    config: GridConfig,
    source: Arc<S>,
    surface: R,
}

impl<S: ChartSource + ?Sized, R: RenderSurface> GridController<S, R> {
    pub fn new(config: GridConfig, source: Arc<S>, surface: R) -> Self {
        Self {
            config,
            source,
            surface,
        }
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Render the panel. Any failure that escapes the per-chart handling replaces the
    /// whole grid with a full-panel error view.
    pub async fn render(&self, canvas: CanvasSize) -> RenderPass {
        match self.try_render(canvas).await {
            Ok(pass) => pass,
            Err(err) => {
                error!("Grid render failed: {err}");
                RenderPass {
                    tree: error_panel(canvas, &err.to_string()),
                    errors: ErrorLog::default(),
                }
            }
        }
    }

    async fn try_render(&self, canvas: CanvasSize) -> Result<RenderPass> {
        let config = &self.config;
        if config.debug_mode {
            info!("Canvas size: {}x{}", canvas.width, canvas.height);
        }

        let plan = plan_layout(config.stock_symbols.len())?;
        let background = Color::parse_hex(&config.background_color)?;
        let policy = config.retry_policy()?;

        let fetcher = ChartFetcher::with_concurrency_limit(
            Arc::clone(&self.source),
            config.chart_url_template.as_str(),
            policy,
            config.max_concurrent,
        );
        let batch = fetcher.fetch_all(&config.stock_symbols).await;

        if config.debug_mode {
            let geometry = cell_geometry(canvas, plan, config.grid_spacing);
            info!(
                "Layout: {}x{}, cell size: {}x{}",
                plan.rows, plan.cols, geometry.width, geometry.height
            );
        }

        let style = GridStyle {
            spacing: config.grid_spacing,
            background,
        };
        let mut tree = render_grid(&batch.results, plan, canvas, style, &self.surface);

        if config.debug_mode && !batch.errors.is_empty() {
            tree.footer = Some(error_footer(batch.errors.len()));
        }

        Ok(RenderPass {
            tree,
            errors: batch.errors,
        })
    }
}
