use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use actix_web::http::header::HeaderMap;
use anyhow::{Context, Result};

use crate::{
    args::CliArgs,
    options::RenderOptions,
    qr::Logo,
};

#[derive(Debug, Clone)]
/// Configuration of the qrserve application
pub struct QrServeConfig {
    /// Enable verbose mode
    pub verbose: bool,

    /// Port on which qrserve will be listening
    pub port: u16,

    /// IP address(es) on which qrserve will be available
    pub interfaces: Vec<IpAddr>,

    /// Page title and heading
    pub title: String,

    /// Footer text, printed after the current year
    pub copyright: String,

    /// Options a fresh page starts with
    pub default_options: RenderOptions,

    /// Image drawn at the center of every code
    pub logo: Option<Logo>,

    /// Name of downloaded files, without extension
    pub filename: String,

    /// If specified, header will be added
    pub header: Vec<HeaderMap>,

    /// Print a QR code of the server address to the terminal
    pub show_qrcode: bool,
}

impl QrServeConfig {
    /// Parses the command line arguments
    pub fn try_from_args(args: CliArgs) -> Result<Self> {
        let interfaces = if !args.interfaces.is_empty() {
            args.interfaces
        } else {
            vec![
                IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)),
                IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            ]
        };

        let port = match args.port {
            0 => port_check::free_local_port().context("No free ports available")?,
            _ => args.port,
        };

        let default_options = RenderOptions::try_new(
            args.size,
            args.level,
            args.bg_color,
            args.fg_color,
            args.margin,
            args.render_as,
        )
        .context("Invalid default render options")?;

        let logo = args
            .logo
            .as_deref()
            .map(Logo::from_file)
            .transpose()
            .context("Couldn't load the logo")?;

        let filename = args.filename.trim();
        if filename.is_empty() || filename.contains(['/', '\\', '"']) {
            anyhow::bail!("Invalid download file name {:?}", args.filename);
        }

        Ok(Self {
            verbose: args.verbose,
            port,
            interfaces,
            title: args.title,
            copyright: args.copyright,
            default_options,
            logo,
            filename: filename.to_string(),
            header: args.header,
            show_qrcode: args.qrcode,
        })
    }
}
