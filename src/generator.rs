use log::info;

use crate::consts::DEFAULT_FILENAME;
use crate::errors::RuntimeError;
use crate::options::{RenderAs, RenderOptions};
use crate::qr::{self, Logo, Surface, SurfaceParams};

/// Lifecycle of the display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// No URL yet: a placeholder is shown and exports are disabled
    Empty,

    /// A code is drawn for the current URL and options
    Rendered,
}

/// What the display panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    Surface(Surface),
}

/// A file handed to the browser as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

/// Display panel: draws the code for a URL and exports it
#[derive(Debug, Clone)]
pub struct Generator {
    url: String,
    options: RenderOptions,
    logo: Option<Logo>,
    filename: String,
}

impl Generator {
    pub fn new(url: &str, options: &RenderOptions) -> Self {
        Self {
            url: url.to_string(),
            options: options.clone(),
            logo: None,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Draw `logo` at the center of the code
    pub fn logo(mut self, logo: Option<Logo>) -> Self {
        self.logo = logo;
        self
    }

    /// Base name of exported files, without extension
    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }

    pub fn state(&self) -> PanelState {
        if self.url.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Rendered
        }
    }

    pub fn is_export_enabled(&self) -> bool {
        self.state() == PanelState::Rendered
    }

    /// Label of the export button, following the current format
    pub fn export_label(&self) -> String {
        format!("Download {}", self.options.render_as().label())
    }

    /// Parameters handed to the rendering library, `None` while there is nothing to draw
    pub fn params(&self) -> Option<SurfaceParams> {
        match self.state() {
            PanelState::Empty => None,
            PanelState::Rendered => Some(SurfaceParams {
                value: self.url.clone(),
                size: self.options.size(),
                level: self.options.level(),
                background: self.options.bg_color().clone(),
                foreground: self.options.fg_color().clone(),
                margin: self.options.margin(),
                render_as: self.options.render_as(),
                image: self.logo.clone(),
            }),
        }
    }

    pub fn render(&self) -> Result<Preview, RuntimeError> {
        let Some(params) = self.params() else {
            return Ok(Preview::Placeholder);
        };

        qr::render_surface(&params).map(Preview::Surface)
    }

    pub fn export_png(&self) -> Result<Download, RuntimeError> {
        self.export_as(RenderAs::Canvas)
    }

    pub fn export_svg(&self) -> Result<Download, RuntimeError> {
        self.export_as(RenderAs::Svg)
    }

    /// Exports in the format currently selected in the options
    pub fn export(&self) -> Result<Download, RuntimeError> {
        match self.options.render_as() {
            RenderAs::Canvas => self.export_png(),
            RenderAs::Svg => self.export_svg(),
        }
    }

    fn export_as(&self, render_as: RenderAs) -> Result<Download, RuntimeError> {
        let params = self.params().ok_or(RuntimeError::NothingToExport)?;
        let params = SurfaceParams { render_as, ..params };
        let filename = format!("{}.{}", self.filename, render_as.extension());

        info!("Exporting {filename} for {:?}", self.url);

        Ok(Download {
            filename,
            content_type: render_as.mime(),
            bytes: qr::render_surface(&params)?.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ErrorLevel, HexColor};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const URL: &str = "https://bashta.in.ua";

    fn svg_options() -> RenderOptions {
        RenderOptions::default().with_render_as(RenderAs::Svg)
    }

    fn colored_options() -> RenderOptions {
        RenderOptions::default()
            .with_fg_color(HexColor::parse("#ff0000").unwrap())
            .with_bg_color(HexColor::parse("#ffff00").unwrap())
            .with_level(ErrorLevel::H)
    }

    #[rstest]
    #[case(RenderOptions::default())]
    #[case(svg_options())]
    #[case(colored_options())]
    fn empty_url_shows_placeholder(#[case] options: RenderOptions) {
        let generator = Generator::new("", &options);

        assert_eq!(generator.state(), PanelState::Empty);
        assert!(!generator.is_export_enabled());
        assert_eq!(generator.render().unwrap(), Preview::Placeholder);
        assert!(matches!(generator.export(), Err(RuntimeError::NothingToExport)));
        assert!(matches!(generator.export_png(), Err(RuntimeError::NothingToExport)));
        assert!(matches!(generator.export_svg(), Err(RuntimeError::NothingToExport)));
    }

    #[rstest]
    #[case(RenderOptions::default())]
    #[case(svg_options())]
    #[case(colored_options())]
    fn url_renders_code(#[case] options: RenderOptions) {
        let generator = Generator::new(URL, &options);

        assert_eq!(generator.state(), PanelState::Rendered);
        assert!(generator.is_export_enabled());
        assert_ne!(generator.render().unwrap(), Preview::Placeholder);
    }

    #[test]
    fn params_mirror_options() {
        let options = colored_options();
        let params = Generator::new(URL, &options).params().unwrap();

        assert_eq!(params.value, URL);
        assert_eq!(params.size, 300);
        assert_eq!(params.level, ErrorLevel::H);
        assert_eq!(params.foreground.as_str(), "#ff0000");
        assert_eq!(params.background.as_str(), "#ffff00");
        assert_eq!(params.margin, 1);
        assert_eq!(params.render_as, RenderAs::Canvas);
        assert_eq!(params.image, None);
    }

    #[test]
    fn default_scenario() {
        let options = RenderOptions::default();
        let generator = Generator::new(URL, &options);
        assert!(matches!(generator.render().unwrap(), Preview::Surface(Surface::Canvas(_))));
        assert_eq!(generator.export_label(), "Download PNG");

        let generator = Generator::new(URL, &options.with_render_as(RenderAs::Svg));
        assert!(matches!(generator.render().unwrap(), Preview::Surface(Surface::Svg(_))));
        assert_eq!(generator.export_label(), "Download SVG");
    }

    #[rstest]
    #[case(RenderAs::Canvas)]
    #[case(RenderAs::Svg)]
    fn preview_is_the_drawn_surface(#[case] render_as: RenderAs) {
        let options = RenderOptions::default().with_render_as(render_as);
        let generator = Generator::new(URL, &options);

        let Preview::Surface(surface) = generator.render().unwrap() else {
            panic!("expected a drawn surface");
        };
        assert_eq!(surface, qr::render_surface(&generator.params().unwrap()).unwrap());
    }

    #[rstest]
    #[case(RenderAs::Canvas, "qrcode.png", mime::IMAGE_PNG)]
    #[case(RenderAs::Svg, "qrcode.svg", mime::IMAGE_SVG)]
    fn export_dispatches_on_format(
        #[case] render_as: RenderAs,
        #[case] filename: &str,
        #[case] content_type: mime::Mime,
    ) {
        let options = RenderOptions::default().with_render_as(render_as);
        let download = Generator::new(URL, &options).export().unwrap();

        assert_eq!(download.filename, filename);
        assert_eq!(download.content_type, content_type);
        assert!(!download.bytes.is_empty());
    }

    #[test]
    fn explicit_exports_ignore_selected_format() {
        let generator = Generator::new(URL, &svg_options()).filename("bashta");

        let png = generator.export_png().unwrap();
        assert_eq!(png.filename, "bashta.png");
        assert!(png.bytes.starts_with(b"\x89PNG"));

        let svg = generator.export_svg().unwrap();
        assert_eq!(svg.filename, "bashta.svg");
        assert!(svg.bytes.starts_with(b"<svg"));
    }
}
