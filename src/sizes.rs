//===========================================================================//

/// One standalone PNG icon: its file name and pixel dimensions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IconSpec {
    /// File name inside the output directory.
    pub file_name: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IconSpec {
    const fn square(file_name: &'static str, size: u32) -> IconSpec {
        IconSpec { file_name, width: size, height: size }
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// The PNG icons to generate, in generation order.
pub const ICON_SPECS: [IconSpec; 6] = [
    IconSpec::square("favicon-16.png", 16),
    IconSpec::square("favicon-32.png", 32),
    IconSpec::square("favicon-48.png", 48),
    IconSpec::square("apple-touch-icon.png", 180),
    IconSpec::square("icon-192.png", 192),
    IconSpec::square("icon-512.png", 512),
];

/// File name of the multi-resolution icon.
pub const FAVICON_FILE_NAME: &str = "favicon.ico";

/// Frame sizes stored in the multi-resolution icon; the first is primary.
pub const FAVICON_SIZES: [(u32, u32); 3] = [(16, 16), (32, 32), (48, 48)];

//===========================================================================//


//===========================================================================//
