use fast_qr::ECL;

/// The error correction level used for the terminal QR code of the server address.
pub const QR_EC_LEVEL: ECL = ECL::L;

/// Largest accepted rendering size in pixels.
pub const MAX_SIZE: u32 = 4096;

/// Largest accepted quiet zone, in modules.
pub const MAX_MARGIN: u32 = 64;

/// Shown in the display panel while no URL has been entered.
pub const PLACEHOLDER_TEXT: &str = "Enter a URL to generate a QR code";

/// Shown in the URL field while it is empty.
pub const URL_PLACEHOLDER: &str = "https://example.com";

/// Default download file name, without extension.
pub const DEFAULT_FILENAME: &str = "qrcode";

/// Default footer text, printed after the current year.
pub const DEFAULT_COPYRIGHT: &str = "QR Code Generator";

/// Default page title and heading.
pub const DEFAULT_TITLE: &str = "Bashta QR Code Generator";

pub const HEALTHCHECK_ROUTE: &str = "/__qrserve_internal/healthcheck";
pub const FAVICON_ROUTE: &str = "/__qrserve_internal/favicon.svg";
pub const CSS_ROUTE: &str = "/__qrserve_internal/style.css";
pub const DOWNLOAD_ROUTE: &str = "/download";
