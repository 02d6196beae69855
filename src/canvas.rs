use crate::layout::CanvasSize;

/// Supplies the pixel size of the panel. The grid never inspects the device itself.
pub trait CanvasProvider {
    fn canvas_size(&self) -> CanvasSize;
}

/// Canvas with an explicit size, e.g. from the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedCanvas(pub CanvasSize);

impl CanvasProvider for FixedCanvas {
    fn canvas_size(&self) -> CanvasSize {
        self.0
    }
}

/// Medium home-screen widget size derived from the phone's logical screen width.
#[derive(Debug, Clone, Copy)]
pub struct MediumWidgetCanvas {
    pub screen_width: u32,
}

const MEDIUM_WIDGET_SIZES: &[(u32, CanvasSize)] = &[
    (428, CanvasSize { width: 364, height: 170 }),
    (414, CanvasSize { width: 360, height: 169 }),
    (393, CanvasSize { width: 338, height: 158 }),
    (390, CanvasSize { width: 338, height: 158 }),
    (375, CanvasSize { width: 329, height: 155 }),
];

impl CanvasProvider for MediumWidgetCanvas {
    fn canvas_size(&self) -> CanvasSize {
        if let Some((_, size)) = MEDIUM_WIDGET_SIZES
            .iter()
            .find(|(screen, _)| *screen == self.screen_width)
        {
            return *size;
        }

        let width = (f64::from(self.screen_width.saturating_sub(60)) * 0.94).floor();
        let height = (width * 0.47).floor();
        CanvasSize::new(width as u32, height as u32)
    }
}
