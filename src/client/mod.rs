//! Preset lookup.
//!
//! - [`PresetSource`] is the seam the runner fetches through
//! - [`HttpPresetClient`] talks to the preset server over HTTP

pub mod http;

pub use http::HttpPresetClient;

use crate::error::Result;
use crate::preset::Preset;

/// Something that can produce a preset for a keyword.
///
/// Implementations return [`ThamilError::PresetNotFound`] for an
/// unknown keyword; any other error counts as a fetch failure.
///
/// [`ThamilError::PresetNotFound`]: crate::error::ThamilError::PresetNotFound
pub trait PresetSource {
    /// Where the preset for `keyword` is fetched from, for narration.
    fn location(&self, keyword: &str) -> String;

    /// Fetch and validate the preset.
    fn fetch(&self, keyword: &str) -> Result<Preset>;
}
