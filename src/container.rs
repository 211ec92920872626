use crate::frame::IconFrame;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

// ICONDIR resource type for icons; 2 would be a cursor.
const ICON_RESOURCE_TYPE: u16 = 1;

// Sizes of the ICONDIR header and of each ICONDIRENTRY, in bytes.
const ICONDIR_LEN: u32 = 6;
const ICONDIRENTRY_LEN: u32 = 16;

//===========================================================================//

/// A multi-resolution icon; the contents of a single ICO file.  The first
/// entry is the primary image.
#[derive(Clone, Debug, Default)]
pub struct IconContainer {
    entries: Vec<ContainerEntry>,
}

impl IconContainer {
    /// Creates a new, empty icon.
    pub fn new() -> IconContainer {
        IconContainer { entries: Vec::new() }
    }

    /// Returns the entries in this icon, in file order.
    pub fn entries(&self) -> &[ContainerEntry] {
        &self.entries
    }

    /// Returns the primary entry, or `None` if the icon is empty.
    pub fn primary(&self) -> Option<&ContainerEntry> {
        self.entries.first()
    }

    /// Returns the `(width, height)` of every entry, in file order.
    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.entries.iter().map(|entry| entry.size()).collect()
    }

    /// Appends an entry after any existing ones.
    pub fn add_entry(&mut self, entry: ContainerEntry) {
        self.entries.push(entry);
    }

    /// Reads an ICO file into memory.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconContainer> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            invalid_data!(
                "Invalid resource type (was {}, but must be {})",
                restype,
                ICON_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::<ContainerEntry>::with_capacity(num_entries);
        let mut spans = Vec::<(u32, u32)>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width_byte = reader.read_u8()?;
            let height_byte = reader.read_u8()?;
            let _num_colors = reader.read_u8()?;
            let reserved = reader.read_u8()?;
            if reserved != 0 {
                invalid_data!(
                    "Invalid reserved field value in ICONDIRENTRY \
                     (was {}, but must be 0)",
                    reserved
                );
            }
            let _color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            // A width/height byte of zero means 256 or more; the real size is
            // taken from the PNG header below when it can be read.
            let width = if width_byte == 0 { 256 } else { width_byte as u32 };
            let height =
                if height_byte == 0 { 256 } else { height_byte as u32 };
            spans.push((data_offset, data_size));
            entries.push(ContainerEntry {
                width,
                height,
                bits_per_pixel,
                data: Vec::new(),
            });
        }
        for (index, &(data_offset, data_size)) in spans.iter().enumerate() {
            reader.seek(SeekFrom::Start(data_offset as u64))?;
            // Allocate only as much as the file actually holds.
            let mut data = Vec::new();
            reader.by_ref().take(data_size as u64).read_to_end(&mut data)?;
            if data.len() != data_size as usize {
                return Err(io_error!(
                    UnexpectedEof,
                    "Icon entry {} is truncated (has {} bytes, but should \
                     have {})",
                    index,
                    data.len(),
                    data_size
                ));
            }
            entries[index].data = data;
        }
        for entry in entries.iter_mut() {
            // Malformed image data is reported by decode(), not here.
            if let Ok((width, height)) = entry.decode_size() {
                entry.width = width;
                entry.height = height;
            }
        }
        Ok(IconContainer { entries })
    }

    /// Writes an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many entries in IconContainer (was {}, but max is {})",
                self.entries.len(),
                u16::MAX
            );
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset =
            ICONDIR_LEN + ICONDIRENTRY_LEN * (self.entries.len() as u32);
        for entry in self.entries.iter() {
            // A width/height byte of zero indicates a size of 256 or more.
            let width = if entry.width > 255 { 0 } else { entry.width as u8 };
            writer.write_u8(width)?;
            let height =
                if entry.height > 255 { 0 } else { entry.height as u8 };
            writer.write_u8(height)?;
            writer.write_u8(0)?; // num colors
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(0)?; // color planes
            writer.write_u16::<LittleEndian>(entry.bits_per_pixel)?;
            let data_size = entry.data.len() as u32;
            writer.write_u32::<LittleEndian>(data_size)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += data_size;
        }
        for entry in self.entries.iter() {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Writes the icon to `path` as an ICO file, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()
    }
}

//===========================================================================//

/// One image in an ICO file.
#[derive(Clone, Debug)]
pub struct ContainerEntry {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl ContainerEntry {
    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the bits-per-pixel (color depth) recorded for the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns true if the image is encoded as a PNG, or false if it is
    /// encoded as a BMP.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn decode_size(&self) -> io::Result<(u32, u32)> {
        if !self.is_png() {
            invalid_data!("BMP-encoded icon entries are not supported");
        }
        let png_reader = IconFrame::read_png_info(self.data.as_slice())?;
        Ok((png_reader.info().width, png_reader.info().height))
    }

    /// Decodes this entry into a frame.  Returns an error if the data is
    /// malformed, is not a PNG, or doesn't match the entry's dimensions.
    pub fn decode(&self) -> io::Result<IconFrame> {
        if !self.is_png() {
            invalid_data!("BMP-encoded icon entries are not supported");
        }
        let frame = IconFrame::read_png(self.data.as_slice())?;
        if frame.size() != self.size() {
            invalid_data!(
                "Encoded image has wrong dimensions \
                 (was {}x{}, but should be {}x{})",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
        }
        Ok(frame)
    }

    /// Encodes a frame as a PNG in a new entry.
    pub fn encode(frame: &IconFrame) -> io::Result<ContainerEntry> {
        let mut data = Vec::new();
        frame.write_png(&mut data)?;
        Ok(ContainerEntry {
            width: frame.width(),
            height: frame.height(),
            bits_per_pixel: frame.bits_per_pixel(),
            data,
        })
    }
}

//===========================================================================//


//===========================================================================//
