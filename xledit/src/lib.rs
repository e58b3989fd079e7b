#![forbid(unsafe_code)]
//! Document core of a localization editor: XLIFF 1.2 and flat JSON language files.
//!
//! Files are parsed into one format-agnostic tree ([`types::TranslationFile`] →
//! [`types::Group`] → [`types::Unit`]), edited through the path-based helpers in
//! [`tree`], and written back with any registered format.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xledit::{Codec, ExportOptions, FormatType};
//!
//! let mut codec = Codec::new();
//! // The format is detected from the content.
//! codec.read_file("messages.xlf")?;
//! for warning in codec.take_warnings() {
//!     eprintln!("warning: {}", warning);
//! }
//! codec.write_file("messages.out.xlf", FormatType::Xliff12, &ExportOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Formats
//!
//! - **XLIFF 1.2** (`.xlf`, `.xliff`): files, headers, nested groups, notes, context
//!   groups and alternate translations; unknown attributes are carried through.
//! - **Flat JSON** (`en_us.json`): one locale per file, `en_us` being the baseline
//!   that holds the source texts.

pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod options;
pub mod registry;
pub mod sync;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, infer_format_from_extension},
    diagnostics::Warning,
    error::Error,
    formats::FormatType,
    options::ExportOptions,
    registry::{FormatRegistry, Imported},
    sync::{SyncReport, sync_structure},
    traits::{ImportContext, TranslationFormat},
    types::{Group, TranslationFile, TranslationStatus, Unit},
};
