use std::fmt;
use std::sync::Arc;

use image::{imageops, imageops::FilterType, RgbaImage};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Decoded chart bitmap. Cheap to clone; pixels are shared.
#[derive(Clone)]
pub struct ChartImage {
    pixels: Arc<RgbaImage>,
}

impl ChartImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decode PNG/JPEG/GIF/WebP bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Redraw into exactly `width` x `height`, ignoring the source aspect ratio.
    pub fn stretched(&self, width: u32, height: u32) -> ChartImage {
        if self.width() == width && self.height() == height {
            return self.clone();
        }
        if width == 0 || height == 0 {
            return Self::from_rgba(RgbaImage::new(width, height));
        }
        let resized = imageops::resize(self.pixels.as_ref(), width, height, FilterType::Triangle);
        Self::from_rgba(resized)
    }
}

impl PartialEq for ChartImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
            || (self.pixels.dimensions() == other.pixels.dimensions()
                && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl fmt::Debug for ChartImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChartImage({}x{})", self.width(), self.height())
    }
}

impl Serialize for ChartImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChartImage", 2)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}
