use std::path::Path;

use image::{imageops, ImageFormat, Rgba, RgbaImage};

use super::text::FontBook;
use super::{Axis, Cell, CellContent, Color, Node, RenderTree, Stack};
use crate::chart::ChartImage;
use crate::error::{AppError, Result};

/// Drawing capability of the host: redraw images to exact sizes and composite a tree.
pub trait RenderSurface {
    type Output;

    /// Redraw `image` into exactly `width` x `height`, discarding its aspect ratio.
    fn stretch(&self, image: &ChartImage, width: u32, height: u32) -> ChartImage;

    fn compose(&self, tree: &RenderTree) -> Result<Self::Output>;
}

/// Paints backgrounds, boxes, charts and labels into an RGBA bitmap.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    fonts: FontBook,
}

impl RasterSurface {
    /// Surface drawing labels with the platform's sans-serif face.
    pub fn new() -> Self {
        Self::with_fonts(FontBook::system())
    }

    pub fn with_fonts(fonts: FontBook) -> Self {
        Self { fonts }
    }

    pub fn save_png(&self, tree: &RenderTree, path: &Path) -> Result<()> {
        let bitmap = self.compose(tree)?;
        bitmap.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for RasterSurface {
    type Output = RgbaImage;

    fn stretch(&self, image: &ChartImage, width: u32, height: u32) -> ChartImage {
        image.stretched(width, height)
    }

    fn compose(&self, tree: &RenderTree) -> Result<RgbaImage> {
        if tree.width == 0 || tree.height == 0 {
            return Err(AppError::message(format!(
                "cannot compose a {}x{} panel",
                tree.width, tree.height
            )));
        }

        let painter = Painter { fonts: &self.fonts };
        let mut canvas = RgbaImage::from_pixel(tree.width, tree.height, tree.background.to_rgba());
        painter.draw(&mut canvas, &tree.body, tree.padding, tree.padding);

        if let Some(footer) = &tree.footer {
            let (width, height) = painter.measure(footer);
            let x = tree.width.saturating_sub(width) / 2;
            let y = tree.height.saturating_sub(height);
            painter.draw(&mut canvas, footer, x, y);
        }

        Ok(canvas)
    }
}

/// Walks a tree, measuring text with the surface's fonts.
struct Painter<'a> {
    fonts: &'a FontBook,
}

impl Painter<'_> {
    /// Size along `axis` and across it.
    fn extent(&self, node: &Node, axis: Axis) -> (u32, u32) {
        if let Node::Spacer { length } = node {
            return (*length, 0);
        }
        let (width, height) = self.measure(node);
        match axis {
            Axis::Horizontal => (width, height),
            Axis::Vertical => (height, width),
        }
    }

    fn measure(&self, node: &Node) -> (u32, u32) {
        match node {
            Node::Spacer { length } => (*length, *length),
            Node::Blank { width, height } => (*width, *height),
            Node::Cell(cell) => (cell.width, cell.height),
            Node::Stack(stack) => stack.size.unwrap_or_else(|| self.content_size(stack)),
            Node::Text(text) => self.fonts.measure(text),
        }
    }

    fn content_size(&self, stack: &Stack) -> (u32, u32) {
        let (main, cross) = self.content_extent(stack);
        match stack.axis {
            Axis::Horizontal => (main, cross),
            Axis::Vertical => (cross, main),
        }
    }

    fn content_extent(&self, stack: &Stack) -> (u32, u32) {
        let gaps = u32::try_from(stack.children.len().saturating_sub(1))
            .map_or(u32::MAX, |count| stack.spacing.saturating_mul(count));
        stack
            .children
            .iter()
            .map(|child| self.extent(child, stack.axis))
            .fold((gaps, 0), |(main, cross), (m, c)| {
                (main.saturating_add(m), cross.max(c))
            })
    }

    fn draw(&self, canvas: &mut RgbaImage, node: &Node, x: u32, y: u32) {
        match node {
            Node::Spacer { .. } | Node::Blank { .. } => {}
            Node::Cell(cell) => self.draw_cell(canvas, cell, x, y),
            Node::Stack(stack) => self.draw_stack(canvas, stack, x, y),
            Node::Text(text) => self.fonts.draw(canvas, text, x, y),
        }
    }

    fn draw_stack(&self, canvas: &mut RgbaImage, stack: &Stack, x: u32, y: u32) {
        let (width, height) = stack.size.unwrap_or_else(|| self.content_size(stack));
        if let Some(background) = stack.background {
            fill_rect(canvas, x, y, width, height, background);
        }

        let (own_main, own_cross) = match stack.axis {
            Axis::Horizontal => (width, height),
            Axis::Vertical => (height, width),
        };
        let (content_main, _) = self.content_extent(stack);

        let mut cursor = if stack.center {
            own_main.saturating_sub(content_main) / 2
        } else {
            0
        };

        for child in &stack.children {
            let (main, cross) = self.extent(child, stack.axis);
            let offset = if stack.center {
                own_cross.saturating_sub(cross) / 2
            } else {
                0
            };
            let (cx, cy) = match stack.axis {
                Axis::Horizontal => (x.saturating_add(cursor), y.saturating_add(offset)),
                Axis::Vertical => (x.saturating_add(offset), y.saturating_add(cursor)),
            };
            if cx >= canvas.width() || cy >= canvas.height() {
                break;
            }
            self.draw(canvas, child, cx, cy);
            cursor = cursor.saturating_add(main).saturating_add(stack.spacing);
        }
    }

    fn draw_cell(&self, canvas: &mut RgbaImage, cell: &Cell, x: u32, y: u32) {
        fill_rect(canvas, x, y, cell.width, cell.height, cell.background);
        match &cell.content {
            CellContent::Image { image } => {
                imageops::replace(canvas, image.pixels(), i64::from(x), i64::from(y));
            }
            CellContent::Placeholder { body, .. } => self.draw_stack(canvas, body, x, y),
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Color) {
    let pixel: Rgba<u8> = color.to_rgba();
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, pixel);
        }
    }
}
