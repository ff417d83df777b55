#![forbid(unsafe_code)]

//! Browser adapter for `landing-core`.
//!
//! # Role in the workspace
//! `landing-web` owns everything that touches the DOM: it looks up the page's
//! elements, implements the core's surface traits against `web-sys`, installs
//! event listeners and intersection observers, and forwards each browser event
//! to the matching core operation. The core decides; this crate applies.
//!
//! The wiring itself only builds for `wasm32`, where `bind_page` binds a
//! document and the `start` export binds the host page. The page contract in
//! [`markup`], configuration loading and [`BindError`] are plain Rust and are
//! tested natively.

pub mod error;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod console_log;
#[cfg(target_arch = "wasm32")]
mod surfaces;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::BindError;
#[cfg(target_arch = "wasm32")]
pub use wasm::{BoundPage, bind_page};

use landing_core::{ConfigError, LandingConfig};

/// Parse the page configuration block.
///
/// An absent or blank block yields the defaults; a malformed one is an error
/// the caller reports before falling back.
pub fn load_config(raw: Option<&str>) -> Result<LandingConfig, ConfigError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => LandingConfig::from_json_str(raw),
        None => Ok(LandingConfig::default()),
    }
}
