//! # QR Code Image URL
//!
//! Unimed check-in shows a QR code rendered by a public image endpoint. The
//! kiosk only builds the request URL; it never fetches the image itself.

use super::provider::Rgb;
use url::Url;

/// Public QR image endpoint used when none is configured.
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Parameters of one QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    /// Text encoded in the QR code.
    pub data: String,
    /// Square size in pixels.
    pub size: u32,
    pub color: Rgb,
    pub background: Rgb,
}

impl QrRequest {
    pub fn new(data: impl Into<String>, size: u32, color: Rgb) -> Self {
        Self {
            data: data.into(),
            size,
            color,
            background: Rgb(0xff, 0xff, 0xff),
        }
    }

    /// Build the image URL against `endpoint`.
    pub fn url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        let size = format!("{0}x{0}", self.size);
        let color = self.color.hex();
        let background = self.background.hex();
        let url = Url::parse_with_params(
            endpoint,
            &[
                ("size", size.as_str()),
                ("data", self.data.as_str()),
                ("color", color.as_str()),
                ("bgcolor", background.as_str()),
            ],
        )?;
        Ok(url)
    }
}
