//! A library for turning one image into a set of web icons: favicons, an
//! Apple touch icon, PWA icons, and a multi-resolution `favicon.ico`.
//!
//! # Example
//!
//! ```no_run
//! let generator = webicons::IconGenerator::new("logo.jpg", "public/icons");
//! let report = generator.run().unwrap();
//! for file in report.files() {
//!     println!("{} ({})", file.path().display(), file.describe_sizes());
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod container;
mod frame;
mod generator;
mod sizes;
mod source;

pub use crate::container::{ContainerEntry, IconContainer};
pub use crate::frame::IconFrame;
pub use crate::generator::{
    build_favicon, GeneratedFile, GenerationReport, IconGenerator,
    DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE,
};
pub use crate::sizes::{IconSpec, FAVICON_FILE_NAME, FAVICON_SIZES, ICON_SPECS};
pub use crate::source::SourceImage;
