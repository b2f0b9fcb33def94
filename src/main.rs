use std::io::{self, IsTerminal};
use std::net::{IpAddr, SocketAddr, TcpListener};

use actix_web::{App, middleware, web};
use anyhow::Result;
use clap::{CommandFactory, Parser, crate_version};
use colored::*;
use fast_qr::QRBuilder;
use log::error;

mod app;
mod args;
mod config;
mod consts;
mod customizer;
mod errors;
mod generator;
mod handlers;
mod options;
mod qr;
mod renderer;

use crate::config::QrServeConfig;
use crate::errors::{RuntimeError, StartupError};

static STYLESHEET: &str = grass::include!("data/style.scss");

fn main() -> Result<()> {
    let args = args::CliArgs::parse();

    if let Some(shell) = args.print_completions {
        let mut clap_app = args::CliArgs::command();
        let app_name = clap_app.get_name().to_string();
        clap_complete::generate(shell, &mut clap_app, app_name, &mut io::stdout());
        return Ok(());
    }

    if args.print_manpage {
        let clap_app = args::CliArgs::command();
        let man = clap_mangen::Man::new(clap_app);
        man.render(&mut io::stdout())?;
        return Ok(());
    }

    let qrserve_config = QrServeConfig::try_from_args(args)?;

    run(qrserve_config).inspect_err(|e| {
        errors::log_error_chain(e.to_string());
    })?;

    Ok(())
}

#[actix_web::main]
async fn run(qrserve_config: QrServeConfig) -> Result<(), StartupError> {
    let log_level = if qrserve_config.verbose {
        simplelog::LevelFilter::Info
    } else {
        simplelog::LevelFilter::Warn
    };

    simplelog::TermLogger::init(
        log_level,
        simplelog::ConfigBuilder::new()
            .set_time_format_rfc2822()
            .build(),
        simplelog::TerminalMode::Mixed,
        if io::stdout().is_terminal() {
            simplelog::ColorChoice::Auto
        } else {
            simplelog::ColorChoice::Never
        },
    )
    .or_else(|_| simplelog::SimpleLogger::init(log_level, simplelog::Config::default()))
    .expect("Couldn't initialize logger");

    let inside_config = qrserve_config.clone();

    let display_urls = {
        let (mut ifaces, wildcard): (Vec<_>, Vec<_>) = qrserve_config
            .interfaces
            .clone()
            .into_iter()
            .partition(|addr| !addr.is_unspecified());

        // Replace wildcard addresses with local interface addresses
        if !wildcard.is_empty() {
            let all_ipv4 = wildcard.iter().any(|addr| addr.is_ipv4());
            let all_ipv6 = wildcard.iter().any(|addr| addr.is_ipv6());
            ifaces = if_addrs::get_if_addrs()
                .unwrap_or_else(|e| {
                    error!("Failed to get local interface addresses: {e}");
                    Default::default()
                })
                .into_iter()
                .map(|iface| iface.ip())
                .filter(|ip| (all_ipv4 && ip.is_ipv4()) || (all_ipv6 && ip.is_ipv6()))
                .collect();
            ifaces.sort();
        }

        ifaces
            .into_iter()
            .map(|addr| match addr {
                IpAddr::V4(_) => format!("http://{}:{}", addr, qrserve_config.port),
                IpAddr::V6(_) => format!("http://[{}]:{}", addr, qrserve_config.port),
            })
            .collect::<Vec<_>>()
    };

    let socket_addresses = qrserve_config
        .interfaces
        .iter()
        .map(|&interface| SocketAddr::new(interface, qrserve_config.port))
        .collect::<Vec<_>>();

    let display_sockets = socket_addresses
        .iter()
        .map(|sock| sock.to_string().green().bold().to_string())
        .collect::<Vec<_>>();

    let stylesheet = web::Data::new(STYLESHEET.to_string());

    let srv = actix_web::HttpServer::new(move || {
        App::new()
            .wrap(configure_header(&inside_config))
            .app_data(web::Data::new(inside_config.clone()))
            .app_data(stylesheet.clone())
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                RuntimeError::ParseError("query string".to_string(), err.to_string()).into()
            }))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .route(consts::HEALTHCHECK_ROUTE, web::get().to(handlers::healthcheck))
            .route(consts::FAVICON_ROUTE, web::get().to(handlers::favicon))
            .route(consts::CSS_ROUTE, web::get().to(handlers::css))
            .route(consts::DOWNLOAD_ROUTE, web::get().to(handlers::download))
            .route("/", web::get().to(handlers::index))
            .default_service(web::to(handlers::error_404))
    });

    let srv = socket_addresses.iter().try_fold(srv, |srv, addr| {
        let listener = create_tcp_listener(*addr)
            .map_err(|e| StartupError::IoError(format!("Failed to bind server to {addr}"), e))?;

        srv.listen(listener)
            .map_err(|e| StartupError::IoError(format!("Failed to bind server to {addr}"), e))
    })?;

    let srv = srv.shutdown_timeout(0).run();

    println!(
        "{name} v{version}",
        name = "qrserve".bold(),
        version = crate_version!()
    );

    println!("Bound to {}", display_sockets.join(", "));

    println!(
        "Available at (non-exhaustive list):\n    {}\n",
        display_urls
            .iter()
            .map(|url| url.green().bold().to_string())
            .collect::<Vec<_>>()
            .join("\n    "),
    );

    // print QR code to terminal
    if qrserve_config.show_qrcode && io::stdout().is_terminal() {
        for url in display_urls
            .iter()
            .filter(|url| !url.contains("//127.0.0.1:") && !url.contains("//[::1]:"))
        {
            match QRBuilder::new(url.clone()).ecl(consts::QR_EC_LEVEL).build() {
                Ok(qr) => {
                    println!("QR code for {}:", url.green().bold());
                    qr.print();
                }
                Err(e) => {
                    error!("Failed to render QR to terminal: {e:?}");
                }
            };
        }
    }

    if io::stdout().is_terminal() {
        println!("Quit by pressing CTRL-C");
    }

    srv.await
        .map_err(|e| StartupError::IoError("".to_owned(), e))
}

/// Allows us to set low-level socket options
///
/// This mainly used to set `set_only_v6` socket option
/// to get a consistent behavior across platforms.
fn create_tcp_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    use socket2::{Domain, Protocol, Socket, Type};
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024 /* Default backlog */)?;
    Ok(TcpListener::from(socket))
}

fn configure_header(conf: &QrServeConfig) -> middleware::DefaultHeaders {
    conf.header.iter().flatten().fold(
        middleware::DefaultHeaders::new(),
        |headers, (header_name, header_value)| headers.add((header_name, header_value)),
    )
}
