use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "stock-grid")]
#[command(about = "Render a grid of stock chart images into a fixed-size panel")]
#[command(version)]
pub struct Cli {
    /// JSON config file; the built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Symbols to chart, overriding the config (1 to 6)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Panel width in pixels
    #[arg(long, requires = "height", conflicts_with = "screen_width")]
    pub width: Option<u32>,

    /// Panel height in pixels
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Derive the medium widget size from this logical screen width
    #[arg(long, default_value_t = 390)]
    pub screen_width: u32,

    /// Write the composed panel to this PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log layout details and add the failure footer
    #[arg(short, long)]
    pub debug: bool,
}
