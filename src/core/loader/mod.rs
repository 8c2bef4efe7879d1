//! # Loader Module
//!
//! Reads file content for the passes.
//!
//! Two collaborators live here, both behind traits so the passes can be
//! driven from memory in tests:
//! - [`ContentReader`] returns raw bytes, or text for edit-distance scoring
//! - [`ImageDecoder`] returns an RGB pixel grid
//!
//! Decoded images are returned by value. The caller owns the buffer and it
//! is freed when the caller's binding goes out of scope, on every path.

use crate::error::ReadError;
use image::RgbImage;
use std::fs;
use std::path::Path;

/// Reads the full content of a file
pub trait ContentReader: Send + Sync {
    /// Read the raw bytes of a file
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, ReadError>;

    /// Read a file as text
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than
    /// rejected, so binary files still produce a comparable string.
    fn read_text(&self, path: &Path) -> Result<String, ReadError> {
        let bytes = self.read_bytes(path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// Decodes a file into a pixel grid
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<RgbImage, ReadError>;
}

/// Reader backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentReader;

impl ContentReader for FsContentReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, ReadError> {
        fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Decoder backed by the `image` crate
///
/// The format is sniffed from the file's leading bytes, so a file named by
/// a bare `bmp` suffix still decodes when its content is a real image.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageDecoder;

impl ImageDecoder for FsImageDecoder {
    fn decode(&self, path: &Path) -> Result<RgbImage, ReadError> {
        let bytes = fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let image = image::load_from_memory(&bytes).map_err(|e| ReadError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(ReadError::Decode {
                path: path.to_path_buf(),
                reason: "image has no pixels".to_string(),
            });
        }

        Ok(image.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn read_text_of_utf8_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hello.txt");
        fs::write(&path, "hello world").unwrap();

        let text = FsContentReader.read_text(&path).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn read_text_replaces_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");
        fs::write(&path, [b'a', 0xFF, b'b']).unwrap();

        let text = FsContentReader.read_text(&path).unwrap();
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let result = FsContentReader.read_bytes(Path::new("/nonexistent/file.txt"));
        assert!(matches!(result, Err(ReadError::Io { .. })));
    }

    #[test]
    fn decode_png_returns_pixels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("red.png");
        RgbImage::from_pixel(4, 3, Rgb([255, 0, 0])).save(&path).unwrap();

        let image = FsImageDecoder.decode(&path).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn decode_sniffs_format_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let png_path = temp_dir.path().join("source.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 255])).save(&png_path).unwrap();

        let odd_path = temp_dir.path().join("scanbmp");
        fs::copy(&png_path, &odd_path).unwrap();

        let image = FsImageDecoder.decode(&odd_path).unwrap();
        assert_eq!(image.dimensions(), (2, 2));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.jpg");
        fs::write(&path, b"this is not a valid image file").unwrap();

        let result = FsImageDecoder.decode(&path);
        assert!(matches!(result, Err(ReadError::Decode { .. })));
    }
}
