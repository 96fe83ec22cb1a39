//! Logo decoding and embedding.
//!
//! The caller reads the logo file; this module only sees bytes. Any format
//! the `image` crate was built with (PNG, JPEG) is accepted. Transparent
//! pixels are flattened onto white, since the PDF gets a plain RGB image.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Stream};

use crate::error::{RenderError, RenderResult};

/// A decoded logo, ready to be placed in a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    width: u32,
    height: u32,
    /// Packed 8-bit RGB, row by row.
    rgb: Vec<u8>,
}

impl Logo {
    /// Decodes an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> RenderResult<Logo> {
        let image = image::load_from_memory(bytes)?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        if width == 0 || height == 0 {
            return Err(RenderError::Logo("image has no pixels".to_string()));
        }

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend([over_white(r, a), over_white(g, a), over_white(b, a)]);
        }

        tracing::debug!(width, height, "Decoded logo");
        Ok(Logo { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Builds the image XObject stream, Flate-compressed.
    pub(crate) fn to_xobject(&self) -> RenderResult<Stream> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.rgb)?;
        let data = encoder.finish()?;

        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(self.width),
            "Height" => i64::from(self.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "FlateDecode",
        };

        Ok(Stream::new(dict, data))
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel);
    let a = u32::from(alpha);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}
