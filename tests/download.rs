mod fixtures;

use std::ffi::OsStr;

use assert_fs::fixture::TempDir;
use assert_fs::prelude::*;
use fixtures::{Error, TEST_URL, TestServer, port, server};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use reqwest::blocking::Response;
use rstest::rstest;

static PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

static LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8"><rect width="8" height="8" fill="#455737"/></svg>"##;

fn header<'a>(resp: &'a Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|x| x.to_str().ok())
}

#[rstest]
fn png_download(server: TestServer) -> Result<(), Error> {
    let resp = server
        .get("/download", &[("url", TEST_URL), ("render_as", "canvas")])?
        .error_for_status()?;

    assert_eq!(header(&resp, "content-type"), Some("image/png"));
    assert_eq!(
        header(&resp, "content-disposition"),
        Some("attachment; filename=\"qrcode.png\"")
    );
    assert!(resp.bytes()?.starts_with(PNG_SIGNATURE));

    Ok(())
}

#[rstest]
fn svg_download(server: TestServer) -> Result<(), Error> {
    let resp = server
        .get(
            "/download",
            &[("url", TEST_URL), ("render_as", "svg"), ("size", "128")],
        )?
        .error_for_status()?;

    assert_eq!(header(&resp, "content-type"), Some("image/svg+xml"));
    assert_eq!(
        header(&resp, "content-disposition"),
        Some("attachment; filename=\"qrcode.svg\"")
    );
    let body = resp.text()?;
    assert!(body.starts_with("<svg"), "{body}");
    assert!(body.contains(r#"width="128""#));

    Ok(())
}

#[rstest]
fn download_uses_configured_filename(
    #[with(&["--filename", "bashta"])] server: TestServer,
) -> Result<(), Error> {
    let resp = server
        .get("/download", &[("url", TEST_URL), ("render_as", "svg")])?
        .error_for_status()?;

    assert_eq!(
        header(&resp, "content-disposition"),
        Some("attachment; filename=\"bashta.svg\"")
    );

    Ok(())
}

#[rstest]
fn download_follows_the_page_colors(server: TestServer) -> Result<(), Error> {
    let body = server
        .get(
            "/download",
            &[
                ("url", TEST_URL),
                ("render_as", "svg"),
                ("fg", "#455737"),
                ("bg", "#fafafa"),
            ],
        )?
        .error_for_status()?
        .text()?;

    assert!(body.contains("#455737"));
    assert!(body.contains("#fafafa"));

    Ok(())
}

#[rstest]
#[case(&[])]
#[case(&[("url", ""), ("render_as", "svg")])]
fn download_without_url_is_rejected(
    server: TestServer,
    #[case] query: &[(&str, &str)],
) -> Result<(), Error> {
    let resp = server.get("/download", query)?;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[rstest]
fn logo_is_embedded(port: u16) -> Result<(), Error> {
    let tmpdir = TempDir::new()?;
    let logo = tmpdir.child("logo.svg");
    logo.write_str(LOGO)?;

    let server = fixtures::server_on(port, [OsStr::new("--logo"), logo.path().as_os_str()]);
    let body = server
        .get(
            "/download",
            &[("url", TEST_URL), ("render_as", "svg"), ("level", "H")],
        )?
        .error_for_status()?
        .text()?;

    assert!(body.contains("data:image/svg+xml;base64,"));

    Ok(())
}
