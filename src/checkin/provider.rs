//! # Provider Catalogue
//!
//! Static configuration for the convênios shown on the landing grid. The
//! list is fixed at compile time; the order of [`PROVIDERS`] is the order of
//! the cards on screen.

use super::error::CheckinError;
use std::fmt;
use std::str::FromStr;

/// Identifies one of the supported convênios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKey {
    Unimed,
    Clinipam,
    Hapvida,
    Outros,
}

impl ProviderKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKey::Unimed => "unimed",
            ProviderKey::Clinipam => "clinipam",
            ProviderKey::Hapvida => "hapvida",
            ProviderKey::Outros => "outros",
        }
    }

    /// The static configuration for this provider.
    pub fn config(self) -> &'static ProviderConfig {
        // Every key has exactly one entry in PROVIDERS.
        match self {
            ProviderKey::Unimed => &PROVIDERS[0],
            ProviderKey::Clinipam => &PROVIDERS[1],
            ProviderKey::Hapvida => &PROVIDERS[2],
            ProviderKey::Outros => &PROVIDERS[3],
        }
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKey {
    type Err = CheckinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unimed" => Ok(ProviderKey::Unimed),
            "clinipam" => Ok(ProviderKey::Clinipam),
            "hapvida" => Ok(ProviderKey::Hapvida),
            "outros" => Ok(ProviderKey::Outros),
            other => Err(CheckinError::UnknownProvider(other.to_string())),
        }
    }
}

/// An RGB color, stored as the hex triplet the QR endpoint also accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lowercase hex without the leading `#`, e.g. `00a651`.
    pub fn hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A card on the landing grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub key: ProviderKey,
    pub name: &'static str,
    /// Single glyph drawn inside the card badge.
    pub icon: &'static str,
    pub description: &'static str,
    /// Gradient start; used as the provider accent.
    pub color: Rgb,
    /// Gradient end.
    pub color_end: Rgb,
}

pub static PROVIDERS: [ProviderConfig; 4] = [
    ProviderConfig {
        key: ProviderKey::Unimed,
        name: "Unimed",
        icon: "U",
        description: "Autenticação por QR Code",
        color: Rgb(0x00, 0xa6, 0x51),
        color_end: Rgb(0x4c, 0xaf, 0x50),
    },
    ProviderConfig {
        key: ProviderKey::Clinipam,
        name: "Clinipam",
        icon: "C",
        description: "Autenticação por CPF",
        color: Rgb(0xff, 0x6b, 0x35),
        color_end: Rgb(0xf3, 0x9c, 0x12),
    },
    ProviderConfig {
        key: ProviderKey::Hapvida,
        name: "HapVida",
        icon: "H",
        description: "CPF ou Biometria Digital",
        color: Rgb(0x00, 0x5b, 0xaa),
        color_end: Rgb(0x00, 0x66, 0xcc),
    },
    ProviderConfig {
        key: ProviderKey::Outros,
        name: "Outros",
        icon: "+",
        description: "Autenticação via CPF",
        color: Rgb(0x6c, 0x5c, 0xe7),
        color_end: Rgb(0xa2, 0x9b, 0xfe),
    },
];
