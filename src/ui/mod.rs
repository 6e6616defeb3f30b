//! # UI Module
//!
//! This module provides the terminal user interface of the kiosk.
//!
//! ## Components
//!
//! - [`App`] - Application state (selection, open modal, notice, timers)
//! - [`mod@keys`] - Maps key events onto [`App`] actions
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`config`] - Persisted configuration
//! - [`theme`] - Built-in color themes
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            Autenticador de Convênio             │
//! ├────────────────────────┬────────────────────────┤
//! │        Unimed          │        Clinipam        │
//! ├────────────────────────┼────────────────────────┤
//! │        HapVida         │   Outros Convênios     │
//! ├────────────────────────┴────────────────────────┤
//! │  Notice                                         │
//! │  Footer                                         │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Selecting a card opens that provider's modal on top of the grid. Only one
//! modal is open at a time.

pub mod app;
pub mod config;
pub mod keys;
pub mod render;
pub mod theme;

pub use app::App;
pub use keys::handle_key;
pub use render::render;
