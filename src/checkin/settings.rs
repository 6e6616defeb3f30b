//! Tunables shared by every attempt.

use super::qr::DEFAULT_QR_ENDPOINT;
use super::token::DEFAULT_MAX_TOKEN_BYTES;

/// Lifetime of a generated Clinipam code, in seconds.
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 300;
/// Minimum interval between two Unimed token collections, in minutes.
pub const DEFAULT_COLLECTION_INTERVAL_MINUTES: u64 = 40;
/// Delay before an accepted modal closes itself, in seconds.
pub const DEFAULT_AUTO_CLOSE_SECONDS: u64 = 3;
/// Side of the QR image, in pixels.
pub const DEFAULT_QR_SIZE: u32 = 220;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub code_ttl_seconds: u64,
    pub collection_interval_seconds: u64,
    pub auto_close_seconds: u64,
    pub max_token_bytes: u64,
    pub qr_endpoint: String,
    pub qr_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            collection_interval_seconds: DEFAULT_COLLECTION_INTERVAL_MINUTES * 60,
            auto_close_seconds: DEFAULT_AUTO_CLOSE_SECONDS,
            max_token_bytes: DEFAULT_MAX_TOKEN_BYTES,
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
            qr_size: DEFAULT_QR_SIZE,
        }
    }
}
