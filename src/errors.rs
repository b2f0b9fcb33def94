use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};
use thiserror::Error;

use crate::renderer::render_error;

#[derive(Debug, Error)]
pub enum StartupError {
    /// Any kind of IO errors
    #[error("{0}\ncaused by: {1}")]
    IoError(String, std::io::Error),

    /// The file given to --logo has an extension we cannot embed
    #[error("Unsupported logo format '{0}'. Expected png, jpg, jpeg, gif, webp or svg")]
    UnsupportedLogoFormat(String),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Any error related to parsing
    #[error("Failed to parse {0}\ncaused by: {1}")]
    ParseError(String, String),

    /// A color that is not `#` followed by six hex digits
    #[error("'{0}' is not a valid hex color. Expected # followed by 6 hex digits")]
    InvalidHexColor(String),

    /// A numeric option outside of its accepted range
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// An export was requested while no URL is set
    #[error("Nothing to export: the URL is empty")]
    NothingToExport,

    /// The QR code library refused the input, e.g. because it is too long
    #[error("Failed to render QR code\ncaused by: {0}")]
    RenderError(String),

    /// Might occur when trying to access a page that does not exist
    #[error("Route {0} could not be found")]
    RouteNotFoundError(String),
}

impl ResponseError for RuntimeError {
    fn status_code(&self) -> StatusCode {
        use RuntimeError as E;
        use StatusCode as S;
        match self {
            E::ParseError(..) => S::BAD_REQUEST,
            E::InvalidHexColor(_) => S::BAD_REQUEST,
            E::OutOfRange { .. } => S::BAD_REQUEST,
            E::NothingToExport => S::BAD_REQUEST,
            E::RenderError(_) => S::UNPROCESSABLE_ENTITY,
            E::RouteNotFoundError(_) => S::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log_error_chain(self.to_string());

        let status = self.status_code();
        HttpResponse::build(status)
            .insert_header(ContentType::html())
            .body(render_error(&self.to_string(), status).into_string())
    }
}

pub fn log_error_chain(description: String) {
    for cause in description.lines() {
        log::error!("{cause}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(RuntimeError::NothingToExport, StatusCode::BAD_REQUEST)]
    #[case(RuntimeError::InvalidHexColor("red".to_string()), StatusCode::BAD_REQUEST)]
    #[case(RuntimeError::RenderError("data too long".to_string()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(RuntimeError::RouteNotFoundError("/nope".to_string()), StatusCode::NOT_FOUND)]
    fn status_codes(#[case] error: RuntimeError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn out_of_range_message() {
        let error = RuntimeError::OutOfRange {
            name: "size",
            value: 0,
            min: 1,
            max: 4096,
        };
        assert_eq!(error.to_string(), "size must be between 1 and 4096, got 0");
    }
}
