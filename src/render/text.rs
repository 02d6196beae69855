use std::fmt;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use image::{imageops, Rgba, RgbaImage};
use log::{debug, warn};
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};
use ttf_parser::{Face, OutlineBuilder};

use super::{Color, Text};

const LINE_HEIGHT: f32 = 1.2;
/// Advance used for characters the face cannot draw, in ems.
const MISSING_ADVANCE: f32 = 0.6;
const VARIATION_SELECTOR: char = '\u{FE0F}';
/// Tried in order before the database's generic sans-serif face.
const SANS_SERIF_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
];

/// Sans-serif faces used to rasterise labels, shared between surfaces.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<Database>,
    regular: Option<ID>,
    bold: Option<ID>,
}

impl FontBook {
    /// Scan the platform font directories.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(db)
    }

    /// No faces at all; text still takes up room but is not drawn.
    pub fn empty() -> Self {
        Self::from_database(Database::new())
    }

    fn from_database(db: Database) -> Self {
        let regular = query(&db, Weight::NORMAL);
        let bold = query(&db, Weight::BOLD).or(regular);
        match regular {
            Some(_) => debug!("Font book ready with {} faces", db.len()),
            None if db.len() == 0 => {}
            None => warn!("No sans-serif face among {} fonts; labels will be blank", db.len()),
        }
        Self {
            db: Arc::new(db),
            regular,
            bold,
        }
    }

    pub fn has_faces(&self) -> bool {
        self.regular.is_some()
    }

    fn face_for(&self, text: &Text) -> Option<ID> {
        if text.font.bold {
            self.bold
        } else {
            self.regular
        }
    }

    /// Box taken by a single line of `text`.
    pub fn measure(&self, text: &Text) -> (u32, u32) {
        let height = (text.font.size * LINE_HEIGHT).round() as u32;
        let width = self
            .with_face(text, |face| shape_line(face, &text.content, text.font.size).1)
            .unwrap_or_else(|| {
                text.content.chars().count() as f32 * text.font.size * MISSING_ADVANCE
            });
        (width.round() as u32, height)
    }

    /// Fill the glyphs of `text` with the line's top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &Text, x: u32, y: u32) {
        let (width, height) = self.measure(text);
        let Some(path) = self
            .with_face(text, |face| shape_line(face, &text.content, text.font.size).0)
            .flatten()
        else {
            return;
        };
        let Some(mut pixmap) = Pixmap::new(width.max(1), height.max(1)) else {
            return;
        };

        let color = text.color.unwrap_or(Color::WHITE);
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        let glyphs = RgbaImage::from_fn(pixmap.width(), pixmap.height(), |px, py| {
            pixmap.pixel(px, py).map_or(Rgba([0, 0, 0, 0]), |pixel| {
                let c = pixel.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            })
        });
        imageops::overlay(canvas, &glyphs, i64::from(x), i64::from(y));
    }

    fn with_face<T>(&self, text: &Text, f: impl FnOnce(&Face<'_>) -> T) -> Option<T> {
        let id = self.face_for(text)?;
        self.db
            .with_face_data(id, |data, index| Face::parse(data, index).ok().map(|face| f(&face)))
            .flatten()
    }
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("regular", &self.regular)
            .field("bold", &self.bold)
            .finish()
    }
}

fn query(db: &Database, weight: Weight) -> Option<ID> {
    let lookup = |family: Family<'_>| {
        db.query(&Query {
            families: &[family],
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })
    };
    SANS_SERIF_FAMILIES
        .iter()
        .find_map(|&name| lookup(Family::Name(name)))
        .or_else(|| lookup(Family::SansSerif))
}

/// Outline of one line of text in pixel space, plus its advance width.
fn shape_line(face: &Face<'_>, content: &str, size: f32) -> (Option<Path>, f32) {
    let scale = size / f32::from(face.units_per_em());
    let ascent = f32::from(face.ascender()) * scale;
    let descent = f32::from(face.descender()) * scale;
    let baseline = ascent + (size * LINE_HEIGHT - (ascent - descent)) / 2.0;

    let mut pen = GlyphPen {
        builder: PathBuilder::new(),
        scale,
        origin_x: 0.0,
        baseline,
    };

    for ch in content.chars().filter(|&ch| ch != VARIATION_SELECTOR) {
        match face.glyph_index(ch) {
            Some(glyph) => {
                face.outline_glyph(glyph, &mut pen);
                pen.origin_x += face
                    .glyph_hor_advance(glyph)
                    .map_or(0.0, |advance| f32::from(advance) * scale);
            }
            None => pen.origin_x += size * MISSING_ADVANCE,
        }
    }

    let advance = pen.origin_x;
    (pen.builder.finish(), advance)
}

/// Maps font units (Y-up) onto the line's pixmap (Y-down).
struct GlyphPen {
    builder: PathBuilder,
    scale: f32,
    origin_x: f32,
    baseline: f32,
}

impl GlyphPen {
    #[inline]
    fn x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    #[inline]
    fn y(&self, y: f32) -> f32 {
        self.baseline - y * self.scale
    }
}

impl OutlineBuilder for GlyphPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.x(x1), self.y(y1), self.x(x), self.y(y));
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.x(x1), self.y(y1));
        let (x2, y2) = (self.x(x2), self.y(y2));
        let (x, y) = (self.x(x), self.y(y));
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Font;

    fn label(content: &str, size: f32) -> Text {
        Text {
            content: content.to_string(),
            font: Font::regular(size),
            color: Some(Color::WHITE),
            centered: true,
        }
    }

    #[test]
    fn empty_book_estimates_width_and_draws_nothing() {
        let fonts = FontBook::empty();
        let text = label("TSLA", 10.0);

        assert!(!fonts.has_faces());
        assert_eq!(fonts.measure(&text), (24, 12));

        let mut canvas = RgbaImage::from_pixel(30, 15, Rgba([0, 0, 0, 255]));
        let before = canvas.clone();
        fonts.draw(&mut canvas, &text, 0, 0);
        assert_eq!(canvas, before);
    }

    #[test]
    fn system_font_paints_inside_measured_box() {
        let fonts = FontBook::system();
        if !fonts.has_faces() {
            eprintln!("no system sans-serif font; skipping");
            return;
        }
        let text = label("AAPL", 14.0);
        let (width, height) = fonts.measure(&text);
        assert!(width > 0 && height == 17);

        let mut canvas = RgbaImage::from_pixel(width + 20, height + 20, Rgba([0, 0, 0, 255]));
        fonts.draw(&mut canvas, &text, 10, 10);

        let lit: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel[0] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!lit.is_empty(), "no glyph pixels drawn");
        assert!(lit
            .iter()
            .all(|&(x, y)| (10..10 + width).contains(&x) && (10..10 + height).contains(&y)));
    }

    #[test]
    fn variation_selector_takes_no_room() {
        let fonts = FontBook::system();
        if !fonts.has_faces() {
            return;
        }
        let bare = fonts.measure(&label("\u{26A0}", 20.0));
        let selected = fonts.measure(&label("\u{26A0}\u{FE0F}", 20.0));
        assert_eq!(bare, selected);
    }
}
