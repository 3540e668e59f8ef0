//! Image type detection from content bytes.
//!
//! The server's `Content-Type` and the URL's extension are both unreliable
//! for mirrored icons, so the format is decided from magic numbers alone.

use std::fmt;

/// Formats the mirror accepts. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

/// How far into a text document to look for the `<svg` root element.
const SVG_SNIFF_WINDOW: usize = 8 * 1024;

impl ImageFormat {
    /// Detect the format of `data`, or `None` when it is not a supported image.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ if is_svg(data) => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.extension()) }
}

/// An XML document whose first element is `<svg`, allowing a BOM, an XML
/// declaration, comments, processing instructions and a doctype before it.
fn is_svg(data: &[u8]) -> bool {
    let window = &data[..data.len().min(SVG_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(window);
    let mut rest = text.strip_prefix('\u{feff}').unwrap_or(&*text);

    loop {
        rest = rest.trim_start();
        let skip_to = if rest.starts_with("<?") {
            "?>"
        } else if rest.starts_with("<!--") {
            "-->"
        } else if rest.starts_with("<!DOCTYPE") || rest.starts_with("<!doctype") {
            ">"
        } else {
            break;
        };
        match rest.find(skip_to) {
            Some(end) => rest = &rest[end + skip_to.len()..],
            None => return false,
        }
    }

    let Some(after) = rest.strip_prefix("<svg") else {
        return false;
    };
    matches!(after.chars().next(), Some(c) if c.is_whitespace() || c == '>' || c == '/')
}
