use serde::Deserialize;

use crate::config::QrServeConfig;
use crate::customizer::CustomizerEvent;
use crate::errors::RuntimeError;
use crate::generator::Generator;
use crate::options::{ErrorLevel, HexColor, RenderAs, RenderOptions};

/// Changes reported to the root view by its panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    UrlChanged(String),
    OptionsChanged(RenderOptions),
}

/// Root view state
///
/// Owns the canonical URL and options. Panels only ever receive copies and report changes
/// through [`Message`]s, which makes [`AppState::update`] the single place where state is
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    url: String,
    options: RenderOptions,
}

impl AppState {
    /// Fresh state: empty URL and the given default options
    pub fn new(options: RenderOptions) -> Self {
        Self {
            url: String::new(),
            options,
        }
    }

    /// Applies a message, returning whether anything changed
    pub fn update(&mut self, message: Message) -> bool {
        match message {
            Message::UrlChanged(url) if url != self.url => self.url = url,
            Message::OptionsChanged(options) if options != self.options => self.options = options,
            _ => return false,
        }
        true
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The display panel for the current state
    pub fn generator(&self, conf: &QrServeConfig) -> Generator {
        Generator::new(&self.url, &self.options)
            .logo(conf.logo.clone())
            .filename(&conf.filename)
    }
}

/// Canonical state as carried by the query string of every request
#[derive(Debug, Default, Deserialize)]
pub struct StateQuery {
    #[serde(default)]
    pub url: String,
    pub size: Option<u32>,
    pub level: Option<ErrorLevel>,
    pub margin: Option<u32>,
    pub render_as: Option<RenderAs>,
    pub fg: Option<HexColor>,
    pub bg: Option<HexColor>,
}

impl StateQuery {
    /// Resolves the submitted options, falling back to `defaults` for missing fields
    pub fn options(&self, defaults: &RenderOptions) -> Result<RenderOptions, RuntimeError> {
        RenderOptions::try_new(
            self.size.unwrap_or(defaults.size()),
            self.level.unwrap_or(defaults.level()),
            self.bg.clone().unwrap_or_else(|| defaults.bg_color().clone()),
            self.fg.clone().unwrap_or_else(|| defaults.fg_color().clone()),
            self.margin.unwrap_or(defaults.margin()),
            self.render_as.unwrap_or(defaults.render_as()),
        )
    }

    /// Builds the root state the way the page does: start from the defaults and apply what
    /// the user changed
    pub fn into_state(self, defaults: &RenderOptions) -> Result<AppState, RuntimeError> {
        let options = self.options(defaults)?;
        let mut state = AppState::new(defaults.clone());
        state.update(Message::UrlChanged(self.url));
        state.update(Message::OptionsChanged(options));
        Ok(state)
    }
}

/// The customization control that triggered a page submission, if any
#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub event: Option<String>,
    pub format: Option<String>,
    pub fg_picker: Option<String>,
    pub bg_picker: Option<String>,
    pub fg_hex: Option<String>,
    pub bg_hex: Option<String>,
}

impl EventQuery {
    pub fn into_event(self) -> Result<Option<CustomizerEvent>, RuntimeError> {
        let event = match self.event.as_deref() {
            None | Some("") => return Ok(None),
            Some("format") => {
                let format = self.format.unwrap_or_default();
                let render_as = format.parse::<RenderAs>().map_err(|e| {
                    RuntimeError::ParseError(format!("format '{format}'"), e.to_string())
                })?;
                CustomizerEvent::Format(render_as)
            }
            Some("fg_picker") => CustomizerEvent::ForegroundPicked(self.fg_picker.unwrap_or_default()),
            Some("bg_picker") => CustomizerEvent::BackgroundPicked(self.bg_picker.unwrap_or_default()),
            Some("fg_hex") => CustomizerEvent::ForegroundText(self.fg_hex.unwrap_or_default()),
            Some("bg_hex") => CustomizerEvent::BackgroundText(self.bg_hex.unwrap_or_default()),
            Some(other) => {
                return Err(RuntimeError::ParseError(
                    "customizer event".to_string(),
                    format!("unknown event '{other}'"),
                ));
            }
        };
        Ok(Some(event))
    }
}
