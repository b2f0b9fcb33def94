use std::net::IpAddr;
use std::path::PathBuf;

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use clap::{Parser, ValueHint};
use clap_complete::Shell;

use crate::consts::{DEFAULT_COPYRIGHT, DEFAULT_FILENAME, DEFAULT_TITLE};
use crate::options::{ErrorLevel, HexColor, RenderAs};

#[derive(Parser)]
#[command(name = "qrserve", author, about, version)]
pub struct CliArgs {
    /// Be verbose, includes emitting access logs
    #[arg(short = 'v', long = "verbose", env = "QRSERVE_VERBOSE")]
    pub verbose: bool,

    /// Port to use
    #[arg(
        short = 'p',
        long = "port",
        default_value = "8080",
        env = "QRSERVE_PORT"
    )]
    pub port: u16,

    /// Interface to listen on
    #[arg(
        short = 'i',
        long = "interfaces",
        value_parser(parse_interface),
        num_args(1),
        env = "QRSERVE_INTERFACE"
    )]
    pub interfaces: Vec<IpAddr>,

    /// Shown in the page title and heading
    #[arg(short = 't', long = "title", default_value = DEFAULT_TITLE, env = "QRSERVE_TITLE")]
    pub title: String,

    /// Text shown in the footer after the current year
    #[arg(long = "copyright", default_value = DEFAULT_COPYRIGHT, env = "QRSERVE_COPYRIGHT")]
    pub copyright: String,

    /// Default size of the rendered code in pixels
    #[arg(long = "size", default_value = "300", env = "QRSERVE_SIZE")]
    pub size: u32,

    /// Default error correction level (L, M, Q or H)
    #[arg(long = "level", default_value = "M", env = "QRSERVE_LEVEL")]
    pub level: ErrorLevel,

    /// Default foreground color, as #rrggbb
    #[arg(long = "fg-color", default_value = "#000000", env = "QRSERVE_FG_COLOR")]
    pub fg_color: HexColor,

    /// Default background color, as #rrggbb
    #[arg(long = "bg-color", default_value = "#ffffff", env = "QRSERVE_BG_COLOR")]
    pub bg_color: HexColor,

    /// Default quiet zone around the code, in modules
    #[arg(long = "margin", default_value = "1", env = "QRSERVE_MARGIN")]
    pub margin: u32,

    /// Default output format (canvas renders PNG, svg renders SVG)
    #[arg(long = "render-as", default_value = "canvas", env = "QRSERVE_RENDER_AS")]
    pub render_as: RenderAs,

    /// Image drawn at the center of every code
    ///
    /// The file is read once at startup and embedded in the generated images. Supported formats
    /// are png, jpg, gif, webp and svg. Consider using `--level H` so the code stays readable.
    #[arg(long = "logo", value_hint = ValueHint::FilePath, env = "QRSERVE_LOGO")]
    pub logo: Option<PathBuf>,

    /// Name of downloaded files, without extension
    #[arg(long = "filename", default_value = DEFAULT_FILENAME, env = "QRSERVE_FILENAME")]
    pub filename: String,

    /// Set custom header for responses
    #[arg(
        long = "header",
        value_parser(parse_header),
        num_args(1),
        env = "QRSERVE_HEADER"
    )]
    pub header: Vec<HeaderMap>,

    /// Print a QR code of the server address to the terminal
    #[arg(short = 'q', long = "qrcode", env = "QRSERVE_QRCODE")]
    pub qrcode: bool,

    /// Generate completion file for a shell
    #[arg(long = "print-completions", value_name = "shell")]
    pub print_completions: Option<Shell>,

    /// Generate man page
    #[arg(long = "print-manpage")]
    pub print_manpage: bool,
}

/// Checks whether an interface is valid, i.e. it can be parsed into an IP address
fn parse_interface(src: &str) -> Result<IpAddr, std::net::AddrParseError> {
    src.parse::<IpAddr>()
}

/// Custom header parser (allow multiple headers input)
pub fn parse_header(src: &str) -> Result<HeaderMap, String> {
    let mut headers = [httparse::EMPTY_HEADER; 1];
    let header = format!("{src}\n");
    httparse::parse_headers(header.as_bytes(), &mut headers).map_err(|e| e.to_string())?;

    let mut header_map = HeaderMap::new();
    if let Some(h) = headers.first()
        && h.name != httparse::EMPTY_HEADER.name
    {
        header_map.insert(
            HeaderName::from_bytes(h.name.as_bytes()).map_err(|e| e.to_string())?,
            HeaderValue::from_bytes(h.value).map_err(|e| e.to_string())?,
        );
    }

    Ok(header_map)
}
