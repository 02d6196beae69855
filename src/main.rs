mod cli;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use stock_grid::app::{self, RunOptions};
use stock_grid::canvas::{CanvasProvider, FixedCanvas, MediumWidgetCanvas};
use stock_grid::layout::CanvasSize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let canvas: Box<dyn CanvasProvider> = match (cli.width, cli.height) {
        (Some(width), Some(height)) => Box::new(FixedCanvas(CanvasSize::new(width, height))),
        _ => Box::new(MediumWidgetCanvas {
            screen_width: cli.screen_width,
        }),
    };

    let options = RunOptions {
        config_path: cli.config,
        symbols: cli.symbols,
        debug: cli.debug,
        output: cli.output,
    };

    let pass = app::run(&options, canvas.as_ref()).await?;
    let stats = pass.tree.stats();

    println!(
        "Panel {}x{}: {} row(s), {} chart(s), {} placeholder(s), {} blank(s)",
        pass.tree.width,
        pass.tree.height,
        stats.rows,
        stats.image_cells,
        stats.placeholder_cells,
        stats.blank_cells
    );
    for entry in pass.errors.entries() {
        println!("  {}: {}", entry.symbol, entry.message);
    }

    Ok(())
}
