use super::{Cell, CellContent, Color, Font, Node, RenderTree, Stack, Text};
use crate::layout::CanvasSize;

const WARNING_GLYPH: &str = "⚠️";
const FAILURE_LABEL: &str = "Load failed";
const PANEL_ERROR_ICON: &str = "❌";
const PANEL_ERROR_TITLE: &str = "Widget Error";
const PANEL_ERROR_PADDING: u32 = 20;

fn text(content: impl Into<String>, font: Font, color: Option<Color>) -> Node {
    Node::Text(Text {
        content: content.into(),
        font,
        color,
        centered: true,
    })
}

/// Cell shown in place of a chart that could not be loaded.
pub fn error_placeholder(symbol: &str, width: u32, height: u32) -> Cell {
    let w = width as f32;

    let mut inner = Stack::vertical().spacing(4).centered();
    inner.push(text(
        symbol,
        Font::bold(14f32.min(w / 8.0)),
        Some(Color::WHITE),
    ));
    inner.push(text(WARNING_GLYPH, Font::regular(20f32.min(w / 6.0)), None));
    inner.push(text(
        FAILURE_LABEL,
        Font::regular(10f32.min(w / 12.0)),
        Some(Color::FAILURE),
    ));

    let mut body = Stack::vertical().spacing(4).size(width, height).centered();
    body.push(Node::Stack(inner));

    Cell {
        width,
        height,
        background: Color::ERROR_BACKGROUND,
        content: CellContent::Placeholder {
            symbol: symbol.to_string(),
            body,
        },
    }
}

/// Small overlay line summarising how many charts failed.
pub fn error_footer(failed: usize) -> Node {
    let noun = if failed == 1 { "chart" } else { "charts" };
    text(
        format!("{WARNING_GLYPH} {failed} {noun} failed to load"),
        Font::regular(8.0),
        Some(Color::FAILURE.with_alpha(0.7)),
    )
}

/// Full-panel view used when the grid cannot be produced at all.
pub fn error_panel(canvas: CanvasSize, message: &str) -> RenderTree {
    let mut stack = Stack::vertical().spacing(8).centered();
    stack.push(text(PANEL_ERROR_ICON, Font::regular(40.0), None));
    stack.push(text(PANEL_ERROR_TITLE, Font::bold(16.0), Some(Color::WHITE)));
    stack.push(text(message, Font::regular(12.0), Some(Color::FAILURE)));

    RenderTree {
        width: canvas.width,
        height: canvas.height,
        background: Color::ERROR_BACKGROUND,
        padding: PANEL_ERROR_PADDING,
        body: Node::Stack(stack),
        footer: None,
    }
}
