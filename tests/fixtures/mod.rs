#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use assert_cmd::prelude::*;
use port_check::free_local_port;
use reqwest::Url;
use rstest::fixture;
use select::document::Document;

/// Error type used by tests
pub type Error = Box<dyn std::error::Error>;

/// A URL long enough to be realistic, short enough for every error correction level
pub static TEST_URL: &str = "https://bashta.in.ua";

/// Shown in the display panel while no URL is set
pub static PLACEHOLDER: &str = "Enter a URL to generate a QR code";

/// Get a free port.
#[fixture]
pub fn port() -> u16 {
    free_local_port().expect("Couldn't find a free local port")
}

/// Run qrserve as a server; Start with a free port.
/// The argument `args` is passed to qrserve.
#[fixture]
pub fn server<I>(#[default(&[] as &[&str])] args: I) -> TestServer
where
    I: IntoIterator + Clone,
    I::Item: AsRef<std::ffi::OsStr>,
{
    server_on(port(), args)
}

/// Run qrserve on the given port, for arguments only known at runtime.
pub fn server_on<I>(port: u16, args: I) -> TestServer
where
    I: IntoIterator,
    I::Item: AsRef<std::ffi::OsStr>,
{
    let child = Command::cargo_bin("qrserve")
        .expect("Couldn't find test binary")
        .arg("-p")
        .arg(port.to_string())
        .args(args)
        .stdout(Stdio::null())
        .spawn()
        .expect("Couldn't run test binary");

    wait_for_port(port);
    TestServer::new(port, child)
}

/// Wait a max of 10s for the port to become available.
fn wait_for_port(port: u16) {
    let start_wait = Instant::now();

    while !port_check::is_port_reachable(format!("localhost:{port}")) {
        sleep(Duration::from_millis(100));

        if start_wait.elapsed().as_secs() > 10 {
            panic!("timeout waiting for port {port}");
        }
    }
}

pub struct TestServer {
    port: u16,
    child: Child,
}

impl TestServer {
    pub fn new(port: u16, child: Child) -> Self {
        Self { port, child }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://localhost:{}", self.port)).expect("Couldn't parse URL")
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Fetches `path` with the given query parameters
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> reqwest::Result<reqwest::blocking::Response> {
        let url = self.url().join(path).expect("Couldn't join URL");
        reqwest::blocking::Client::new().get(url).query(query).send()
    }

    /// Fetches the generator page and parses it
    pub fn page(&self, query: &[(&str, &str)]) -> Result<Document, Error> {
        let body = self.get("/", query)?.error_for_status()?;
        Ok(Document::from_read(body)?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.child.kill().expect("Couldn't kill test server");
        self.child.wait().unwrap();
    }
}
