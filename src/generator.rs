use crate::container::{ContainerEntry, IconContainer};
use crate::sizes::{FAVICON_FILE_NAME, FAVICON_SIZES, ICON_SPECS};
use crate::source::SourceImage;
use image::ColorType;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

//===========================================================================//

/// Where the binary reads its source image from.
pub const DEFAULT_SOURCE: &str = "icons/IMG-20251112-WA0074.jpg";

/// Where the binary writes its icons.
pub const DEFAULT_OUTPUT_DIR: &str = "icons";

//===========================================================================//

/// Turns one source image into the full set of web icons.
#[derive(Clone, Debug)]
pub struct IconGenerator {
    source: PathBuf,
    output_dir: PathBuf,
}

impl Default for IconGenerator {
    fn default() -> IconGenerator {
        IconGenerator::new(DEFAULT_SOURCE, DEFAULT_OUTPUT_DIR)
    }
}

impl IconGenerator {
    /// Creates a generator reading `source` and writing into `output_dir`.
    pub fn new<S, O>(source: S, output_dir: O) -> IconGenerator
    where
        S: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        IconGenerator { source: source.into(), output_dir: output_dir.into() }
    }

    /// Returns the path of the source image.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the directory icons are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Loads the source, then writes every PNG icon followed by the
    /// multi-resolution icon.  Stops at the first error; files written
    /// before it are left in place.  If the source can't be loaded, nothing
    /// is created.
    pub fn run(&self) -> io::Result<GenerationReport> {
        self.run_with(|_| {})
    }

    /// Like `run`, but calls `on_file` as soon as each file is written.
    pub fn run_with<F>(&self, on_file: F) -> io::Result<GenerationReport>
    where
        F: FnMut(&GeneratedFile),
    {
        info!("Opening source image {}", self.source.display());
        let source = SourceImage::open(&self.source)?;
        self.generate(&source, on_file)
    }

    /// Writes every icon for an already-loaded source, calling `on_file`
    /// after each file lands.  Creates the output directory if needed.
    pub fn generate<F>(
        &self,
        source: &SourceImage,
        mut on_file: F,
    ) -> io::Result<GenerationReport>
    where
        F: FnMut(&GeneratedFile),
    {
        info!(
            "Source image is {}x{} ({:?})",
            source.width(),
            source.height(),
            source.original_color()
        );
        fs::create_dir_all(&self.output_dir)?;

        let mut report = GenerationReport {
            source_size: source.size(),
            source_color: source.original_color(),
            files: Vec::with_capacity(ICON_SPECS.len() + 1),
        };
        for spec in ICON_SPECS.iter() {
            let path = self.output_dir.join(spec.file_name);
            source.resize(spec.width, spec.height).save(&path)?;
            info!("Wrote {} ({}x{})", path.display(), spec.width, spec.height);
            let file = GeneratedFile { path, sizes: vec![spec.size()] };
            on_file(&file);
            report.files.push(file);
        }

        let path = self.output_dir.join(FAVICON_FILE_NAME);
        let container = build_favicon(source)?;
        container.save(&path)?;
        info!(
            "Wrote {} with {} frames",
            path.display(),
            container.entries().len()
        );
        let file = GeneratedFile { path, sizes: container.sizes() };
        on_file(&file);
        report.files.push(file);
        Ok(report)
    }
}

/// Resamples the source independently at each of `FAVICON_SIZES` and packs
/// the frames, in that order, into one icon.
pub fn build_favicon(source: &SourceImage) -> io::Result<IconContainer> {
    let mut container = IconContainer::new();
    for &(width, height) in FAVICON_SIZES.iter() {
        let frame = source.resize(width, height);
        container.add_entry(ContainerEntry::encode(&frame)?);
        debug!("Added {}x{} frame to favicon", width, height);
    }
    Ok(container)
}

//===========================================================================//

/// What a successful run produced.
#[derive(Clone, Debug)]
pub struct GenerationReport {
    source_size: (u32, u32),
    source_color: ColorType,
    files: Vec<GeneratedFile>,
}

impl GenerationReport {
    /// Returns the source's `(width, height)`.  This is the declared size of
    /// the icon set; the ICO directory itself can only record frame sizes up
    /// to 256.
    pub fn source_size(&self) -> (u32, u32) {
        self.source_size
    }

    /// Returns the color type the source was decoded with.
    pub fn source_color(&self) -> ColorType {
        self.source_color
    }

    /// Returns every written file, in write order.  The multi-resolution
    /// icon is last.
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }
}

/// One file written by a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    path: PathBuf,
    sizes: Vec<(u32, u32)>,
}

impl GeneratedFile {
    /// Returns the path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the size of each image in the file; PNGs have exactly one.
    pub fn sizes(&self) -> &[(u32, u32)] {
        &self.sizes
    }

    /// Formats the sizes as `16x16, 32x32`.
    pub fn describe_sizes(&self) -> String {
        let sizes: Vec<String> = self
            .sizes
            .iter()
            .map(|&(width, height)| format!("{}x{}", width, height))
            .collect();
        sizes.join(", ")
    }
}

//===========================================================================//


//===========================================================================//
