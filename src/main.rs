//! Generates the web icon set from the image at `icons/`, with no arguments.

use std::io;
use webicons::{IconGenerator, SourceImage};

//===========================================================================//

fn main() -> io::Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let generator = IconGenerator::default();
    println!("Opening source image: {}", generator.source().display());
    let source = SourceImage::open(generator.source())?;
    let (width, height) = source.size();
    let color = source.original_color();
    println!("Source image: {}x{} ({:?})", width, height, color);
    println!();
    println!("Generated icons:");
    generator.generate(&source, |file| {
        println!("  {} ({})", file.path().display(), file.describe_sizes());
    })?;
    println!();
    println!("All icons were generated successfully.");
    Ok(())
}

//===========================================================================//
