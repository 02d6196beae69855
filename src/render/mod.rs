//! Renderer-agnostic description of the finished panel.
//!
//! The grid and error views are built as a tree of nested stacks; turning the tree into
//! pixels is the job of a [`RenderSurface`].

use serde::Serialize;

use crate::chart::ChartImage;

pub mod color;
pub mod grid;
pub mod placeholder;
pub mod surface;
pub mod text;

pub use color::Color;
pub use grid::{render_grid, GridStyle};
pub use placeholder::{error_footer, error_panel, error_placeholder};
pub use surface::{RasterSurface, RenderSurface};
pub use text::FontBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub content: String,
    pub font: Font,
    pub color: Option<Color>,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub axis: Axis,
    pub spacing: u32,
    /// Fixed `(width, height)`; `None` sizes the stack to its children.
    pub size: Option<(u32, u32)>,
    pub background: Option<Color>,
    pub center: bool,
    pub children: Vec<Node>,
}

impl Stack {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            spacing: 0,
            size: None,
            background: None,
            center: false,
            children: Vec::new(),
        }
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn centered(mut self) -> Self {
        self.center = true;
        self
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellContent {
    /// Chart already redrawn to the cell's exact size; fills the cell with no padding.
    Image { image: ChartImage },
    Placeholder { symbol: String, body: Stack },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Stack(Stack),
    /// Fixed gap along the parent's axis.
    Spacer { length: u32 },
    /// Unused grid slot: takes a cell's room, draws nothing.
    Blank { width: u32, height: u32 },
    Cell(Cell),
    Text(Text),
}

/// The whole panel handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub padding: u32,
    pub body: Node,
    /// Drawn over the bottom edge; never takes space from `body`.
    pub footer: Option<Node>,
}

/// Counts of what a tree contains, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub rows: usize,
    pub image_cells: usize,
    pub placeholder_cells: usize,
    pub blank_cells: usize,
}

impl RenderTree {
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Node::Stack(main) = &self.body {
            stats.rows = main
                .children
                .iter()
                .filter(|node| matches!(node, Node::Stack(row) if row.axis == Axis::Horizontal))
                .count();
        }
        collect_stats(&self.body, &mut stats);
        stats
    }

    /// Placeholder symbols in grid order.
    pub fn failed_symbols(&self) -> Vec<&str> {
        let mut symbols = Vec::new();
        walk(&self.body, &mut |node| {
            if let Node::Cell(Cell {
                content: CellContent::Placeholder { symbol, .. },
                ..
            }) = node
            {
                symbols.push(symbol.as_str());
            }
        });
        symbols
    }
}

fn collect_stats(node: &Node, stats: &mut TreeStats) {
    walk(node, &mut |node| match node {
        Node::Cell(cell) => match cell.content {
            CellContent::Image { .. } => stats.image_cells += 1,
            CellContent::Placeholder { .. } => stats.placeholder_cells += 1,
        },
        Node::Blank { .. } => stats.blank_cells += 1,
        _ => {}
    });
}

fn walk<'a>(node: &'a Node, visit: &mut impl FnMut(&'a Node)) {
    visit(node);
    if let Node::Stack(stack) = node {
        for child in &stack.children {
            walk(child, &mut *visit);
        }
    }
}
