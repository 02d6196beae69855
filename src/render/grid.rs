use super::{error_placeholder, Cell, CellContent, Color, Node, RenderSurface, RenderTree, Stack};
use crate::fetch::FetchResult;
use crate::layout::{cell_geometry, CanvasSize, LayoutPlan};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub spacing: u32,
    pub background: Color,
}

/// Lay `results` out row-major over `plan`, stretching charts to fill their cells.
///
/// Gaps of `style.spacing` sit before the first and after every row and column. Slots
/// past the end of `results` become blanks.
pub fn render_grid<S>(
    results: &[FetchResult],
    plan: LayoutPlan,
    canvas: CanvasSize,
    style: GridStyle,
    surface: &S,
) -> RenderTree
where
    S: RenderSurface + ?Sized,
{
    let geometry = cell_geometry(canvas, plan, style.spacing);
    let mut pending = results.iter();

    let mut main = Stack::vertical();
    main.push(Node::Spacer {
        length: style.spacing,
    });

    for _ in 0..plan.rows {
        let mut row = Stack::horizontal().size(canvas.width, geometry.height);
        row.push(Node::Spacer {
            length: style.spacing,
        });

        for _ in 0..plan.cols {
            let node = match pending.next() {
                Some(result) => Node::Cell(render_cell(
                    result,
                    geometry.width,
                    geometry.height,
                    style.background,
                    surface,
                )),
                None => Node::Blank {
                    width: geometry.width,
                    height: geometry.height,
                },
            };
            row.push(node);
            row.push(Node::Spacer {
                length: style.spacing,
            });
        }

        main.push(Node::Stack(row));
        main.push(Node::Spacer {
            length: style.spacing,
        });
    }

    RenderTree {
        width: canvas.width,
        height: canvas.height,
        background: style.background,
        padding: 0,
        body: Node::Stack(main),
        footer: None,
    }
}

fn render_cell<S>(
    result: &FetchResult,
    width: u32,
    height: u32,
    background: Color,
    surface: &S,
) -> Cell
where
    S: RenderSurface + ?Sized,
{
    match (&result.image, result.success) {
        (Some(image), true) => Cell {
            width,
            height,
            background,
            content: CellContent::Image {
                image: surface.stretch(image, width, height),
            },
        },
        _ => error_placeholder(&result.symbol, width, height),
    }
}
