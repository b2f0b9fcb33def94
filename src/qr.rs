//! Adapter over `fast_qr`, which owns the QR encoding and the drawing of the symbol.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fast_qr::QRBuilder;
use fast_qr::convert::{Builder, image::ImageBuilder, svg::SvgBuilder};
use fast_qr::qr::QRCode;
use log::debug;

use crate::errors::{RuntimeError, StartupError};
use crate::options::{ErrorLevel, HexColor, RenderAs};

/// Image drawn at the center of the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    data_uri: String,
}

impl Logo {
    /// Reads an image file and embeds it as a `data:` URI
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let media_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => return Err(StartupError::UnsupportedLogoFormat(extension)),
        };
        let bytes = std::fs::read(path).map_err(|e| {
            StartupError::IoError(format!("Failed to read logo {}", path.display()), e)
        })?;

        Ok(Self::from_bytes(media_type, &bytes))
    }

    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self {
            data_uri: format!("data:{media_type};base64,{}", STANDARD.encode(bytes)),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}

/// Everything the rendering library is given to draw one code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceParams {
    pub value: String,
    pub size: u32,
    pub level: ErrorLevel,
    pub background: HexColor,
    pub foreground: HexColor,
    pub margin: u32,
    pub render_as: RenderAs,
    pub image: Option<Logo>,
}

/// A drawn code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// PNG encoded bitmap
    Canvas(Vec<u8>),

    /// Standalone SVG document
    Svg(String),
}

impl Surface {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Surface::Canvas(bytes) => bytes,
            Surface::Svg(markup) => markup.into_bytes(),
        }
    }
}

/// Encodes `params.value` and draws it on the requested surface
pub fn render_surface(params: &SurfaceParams) -> Result<Surface, RuntimeError> {
    let qr = encode(&params.value, params.level)?;
    debug!(
        "Drawing {} for {:?} ({}px, level {})",
        params.render_as, params.value, params.size, params.level
    );

    match params.render_as {
        RenderAs::Canvas => draw_png(&qr, params).map(Surface::Canvas),
        RenderAs::Svg => Ok(Surface::Svg(draw_svg(&qr, params))),
    }
}

fn encode(value: &str, level: ErrorLevel) -> Result<QRCode, RuntimeError> {
    QRBuilder::new(value)
        .ecl(level.ecl())
        .build()
        .map_err(|e| RuntimeError::RenderError(format!("{e:?}")))
}

fn apply_style<B: Builder>(builder: &mut B, params: &SurfaceParams) {
    builder
        .margin(params.margin as usize)
        .module_color(params.foreground.rgba())
        .background_color(params.background.rgba());

    if let Some(logo) = &params.image {
        builder
            .image(logo.data_uri().to_string())
            .image_background_color(params.background.rgba());
    }
}

fn draw_svg(qr: &QRCode, params: &SurfaceParams) -> String {
    let mut builder = SvgBuilder::default();
    apply_style(&mut builder, params);

    // fast_qr only emits a viewBox; give the document its pixel dimensions.
    builder.to_str(qr).replacen(
        "<svg ",
        &format!(r#"<svg width="{0}" height="{0}" "#, params.size),
        1,
    )
}

fn draw_png(qr: &QRCode, params: &SurfaceParams) -> Result<Vec<u8>, RuntimeError> {
    let mut builder = ImageBuilder::default();
    apply_style(&mut builder, params);

    builder
        .fit_width(params.size)
        .to_bytes(qr)
        .map_err(|e| RuntimeError::RenderError(format!("{e:?}")))
}
