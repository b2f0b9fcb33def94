use log::debug;

use crate::options::{HexColor, RenderAs, RenderOptions};

/// One user interaction with a customization control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizerEvent {
    /// A value picked in the format dropdown
    Format(RenderAs),

    /// The foreground color picker moved; the value may lack its leading `#`
    ForegroundPicked(String),

    /// The background color picker moved; the value may lack its leading `#`
    BackgroundPicked(String),

    /// Text committed in the foreground hex field
    ForegroundText(String),

    /// Text committed in the background hex field
    BackgroundText(String),
}

/// Customization panel
///
/// Displays a copy of the options owned by the parent view and turns user events into updated
/// options. It never writes to the parent: [`Customizer::handle`] returns the replacement value
/// and the parent hands it back through [`Customizer::sync`] once it has been accepted.
///
/// The hex text fields keep whatever the user typed, even when it is not a color yet. Such
/// drafts are never emitted.
#[derive(Debug, Clone)]
pub struct Customizer {
    options: RenderOptions,
    fg_text: String,
    bg_text: String,
}

impl Customizer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            options: options.clone(),
            fg_text: options.fg_color().to_string(),
            bg_text: options.bg_color().to_string(),
        }
    }

    /// Restores the hex field contents submitted with the page
    ///
    /// Fields that were not submitted keep showing the current color.
    pub fn with_drafts(mut self, fg_text: Option<&str>, bg_text: Option<&str>) -> Self {
        if let Some(text) = fg_text {
            self.fg_text = text.to_string();
        }
        if let Some(text) = bg_text {
            self.bg_text = text.to_string();
        }
        self
    }

    /// Re-synchronizes the displayed state with options supplied by the parent
    ///
    /// Drafts are only reset for the colors that actually changed, so an invalid draft survives
    /// an unrelated update such as a format switch.
    pub fn sync(&mut self, options: &RenderOptions) {
        if &self.options == options {
            return;
        }
        if self.options.fg_color() != options.fg_color() {
            self.fg_text = options.fg_color().to_string();
        }
        if self.options.bg_color() != options.bg_color() {
            self.bg_text = options.bg_color().to_string();
        }
        self.options = options.clone();
    }

    /// Applies one event, returning the options the parent should adopt, if any
    pub fn handle(&mut self, event: CustomizerEvent) -> Option<RenderOptions> {
        debug!("Customizer event {event:?}");

        match event {
            CustomizerEvent::Format(render_as) => Some(self.options.with_render_as(render_as)),
            CustomizerEvent::ForegroundPicked(value) => {
                picked_color(&value).map(|color| self.options.with_fg_color(color))
            }
            CustomizerEvent::BackgroundPicked(value) => {
                picked_color(&value).map(|color| self.options.with_bg_color(color))
            }
            CustomizerEvent::ForegroundText(text) => {
                let color = HexColor::parse(&text).ok();
                self.fg_text = text;
                color.map(|color| self.options.with_fg_color(color))
            }
            CustomizerEvent::BackgroundText(text) => {
                let color = HexColor::parse(&text).ok();
                self.bg_text = text;
                color.map(|color| self.options.with_bg_color(color))
            }
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Content of the foreground hex field
    pub fn fg_text(&self) -> &str {
        &self.fg_text
    }

    /// Content of the background hex field
    pub fn bg_text(&self) -> &str {
        &self.bg_text
    }
}

/// Color pickers report `rrggbb`, with or without the leading `#`
fn picked_color(value: &str) -> Option<HexColor> {
    let value = value.trim();
    if value.starts_with('#') {
        HexColor::parse(value).ok()
    } else {
        HexColor::parse(&format!("#{value}")).ok()
    }
}
