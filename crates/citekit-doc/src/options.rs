//! Session configuration.
//!
//! Options are an explicitly enumerated set. The processing mode arrives as
//! a dash-separated string (`"bibliography-header-nosort"`): the leading
//! segment selects the [`Mode`], the rest toggle submode flags. Boolean
//! options can also be set individually by name; unrecognized names are a
//! validation error, never silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What the session produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Rendered citation clusters only.
    Citation,
    /// A bibliography.
    Bibliography,
    /// Every supported rendering of the input.
    #[default]
    All,
}

/// Output markup produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Html,
    Rtf,
    Plain,
    Asciidoc,
    XslFo,
}

/// Development-extension toggles forwarded to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentExtensions {
    pub static_statute_locator: bool,
    pub clobber_locator_if_no_statute_section: bool,
    pub handle_parallel_articles: bool,
}

/// Configuration for one formatting session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub mode: Mode,
    pub output_format: OutputFormat,
    /// Suppress trailing punctuation on rendered clusters.
    pub suppress_trailing_punctuation: bool,
    /// Skip loading jurisdiction style modules.
    pub skip_jurisdiction_modules: bool,
    /// Keep bibliography entries in registration order instead of sorting.
    pub skip_sort: bool,
    /// Emit the bibliography parameter header instead of the entries.
    pub bibliography_header: bool,
    pub development_extensions: DevelopmentExtensions,
}

impl SessionOptions {
    /// Parse a dash-separated mode string.
    pub fn from_mode_str(mode: &str) -> Result<Self> {
        let mut segments = mode.split('-');
        let lead = segments.next().unwrap_or_default();
        let mode = match lead {
            "citation" => Mode::Citation,
            "bibliography" => Mode::Bibliography,
            "all" => Mode::All,
            other => {
                return Err(Error::InvalidMode {
                    mode: other.to_string(),
                });
            }
        };
        let mut options = SessionOptions {
            mode,
            ..Default::default()
        };
        for submode in segments {
            options.set_option(submode, true)?;
        }
        Ok(options)
    }

    /// Set one boolean option by name.
    ///
    /// Covers the submode flags and the development extensions. Output
    /// format names select that format when enabled.
    pub fn set_option(&mut self, name: &str, value: bool) -> Result<()> {
        match name {
            "rtf" | "plain" | "asciidoc" | "xslfo" => {
                let format = match name {
                    "rtf" => OutputFormat::Rtf,
                    "plain" => OutputFormat::Plain,
                    "asciidoc" => OutputFormat::Asciidoc,
                    _ => OutputFormat::XslFo,
                };
                if value {
                    self.output_format = format;
                } else if self.output_format == format {
                    self.output_format = OutputFormat::Html;
                }
            }
            "suppress_trailing_punctuation" => self.suppress_trailing_punctuation = value,
            "nojuris" => self.skip_jurisdiction_modules = value,
            "nosort" => self.skip_sort = value,
            "header" => self.bibliography_header = value,
            "static_statute_locator" => {
                self.development_extensions.static_statute_locator = value;
            }
            "clobber_locator_if_no_statute_section" => {
                self.development_extensions
                    .clobber_locator_if_no_statute_section = value;
            }
            "handle_parallel_articles" => {
                self.development_extensions.handle_parallel_articles = value;
            }
            unknown => {
                return Err(Error::UnknownOption {
                    name: unknown.to_string(),
                });
            }
        }
        Ok(())
    }
}
