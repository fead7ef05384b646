//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table
//!
//! Decoding is restricted to the one platform/encoding/language combination
//! that ubiquitous fonts carry: [`WINDOWS_ENGLISH`]. Records with any other
//! triple are consumed (the record array has a fixed 12-byte stride) but
//! their string payloads are never fetched.

use std::collections::BTreeMap;
use std::fmt;

use crate::font_data::FontData;
use crate::name_id::NameId;
use crate::read::{FontRead, ReadError};

/// The platform/encoding/language triple for Windows, Unicode BMP (UCS-2),
/// US English.
///
/// This is the only combination the decoder interprets.
pub const WINDOWS_ENGLISH: (u16, u16, u16) = (3, 1, 0x0409);

/// The platform/encoding/language triple for Macintosh, Roman, English.
pub const MACINTOSH_ENGLISH: (u16, u16, u16) = (1, 0, 0);

/// The decoded contents of a naming table.
///
/// Strings are keyed by [`NameKey`]: the semantic label of a registered
/// [`NameId`], or a numbered unknown entry for identifiers outside the
/// registered range. When the same identifier occurs in more than one
/// decoded record, the record later in the array wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    format: u16,
    lang_tag_count: Option<u16>,
    names: BTreeMap<NameKey, String>,
}

/// A key in the decoded name mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameKey {
    /// A registered identifier, rendered as its semantic label.
    Id(NameId),
    /// The n'th record (1-based, in record order) whose identifier has no
    /// registered label, rendered as `unknownN`.
    Unknown(u16),
}

impl Name {
    /// Parse the naming table starting at `offset` within `bytes`.
    pub fn parse(bytes: &[u8], offset: usize) -> Result<Name, ReadError> {
        let data = FontData::new(bytes)
            .split_off(offset)
            .ok_or(ReadError::OutOfBounds)?;
        Self::read(data)
    }

    /// The table format (0 or 1 have defined semantics).
    pub fn format(&self) -> u16 {
        self.format
    }

    /// The number of language-tag records declared by a format 1 table.
    ///
    /// The records themselves are not parsed.
    pub fn lang_tag_count(&self) -> Option<u16> {
        self.lang_tag_count
    }

    /// The string decoded for a registered identifier, if any.
    pub fn get(&self, id: NameId) -> Option<&str> {
        self.names.get(&NameKey::Id(id)).map(String::as_str)
    }

    /// The string decoded from the n'th unrecognized record (1-based).
    pub fn unknown(&self, n: u16) -> Option<&str> {
        self.names.get(&NameKey::Unknown(n)).map(String::as_str)
    }

    /// Iterate the decoded entries.
    pub fn iter(&self) -> impl Iterator<Item = (NameKey, &str)> {
        self.names.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// The number of decoded entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FontRead<'a> for Name {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset: u16 = cursor.read()?;
        // The storage area runs from the declared offset to the end of the
        // buffer. A wild offset only fails once a string is read through it.
        let storage = data.split_off(storage_offset as usize).unwrap_or_default();

        let mut names = BTreeMap::new();
        let mut unknown_count = 0u16;
        for _ in 0..count {
            let platform_id: u16 = cursor.read()?;
            let encoding_id: u16 = cursor.read()?;
            let language_id: u16 = cursor.read()?;
            let name_id: NameId = cursor.read()?;
            let length: u16 = cursor.read()?;
            let offset: u16 = cursor.read()?;
            if (platform_id, encoding_id, language_id) != WINDOWS_ENGLISH {
                continue;
            }
            let string = read_string(storage, offset, length)?;
            let key = if name_id.label().is_some() {
                NameKey::Id(name_id)
            } else {
                unknown_count += 1;
                NameKey::Unknown(unknown_count)
            };
            // last write wins when an identifier repeats
            names.insert(key, string);
        }
        // The language-tag count of a format 1 table sits after the record
        // array; the language-tag records themselves are not parsed.
        let lang_tag_count = if format == 1 { Some(cursor.read()?) } else { None };

        Ok(Name {
            format,
            lang_tag_count,
            names,
        })
    }
}

/// Decode `length / 2` big-endian code units starting at `offset` within the
/// storage area, one `char` per unit.
///
/// No surrogate-pair composition is performed: values outside the scalar
/// range become U+FFFD. An odd trailing byte is never read. A zero-length
/// string performs no reads at all, whatever its offset.
fn read_string(storage: FontData, offset: u16, length: u16) -> Result<String, ReadError> {
    let mut out = String::with_capacity(length as usize / 2);
    let mut pos = offset as usize;
    for _ in 0..length / 2 {
        let unit: u16 = storage.read_at(pos)?;
        out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
        pos += 2;
    }
    Ok(out)
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKey::Id(id) => write!(f, "{id}"),
            NameKey::Unknown(n) => write!(f, "unknown{n}"),
        }
    }
}

/// The encoding used by the name table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf16Be,
    MacRoman,
    Unknown,
}

impl Encoding {
    /// Determine the encoding from the platform and encoding id.
    pub fn new(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (0, _) => Encoding::Utf16Be,
            (1, 0) => Encoding::MacRoman,
            (3, 0) => Encoding::Utf16Be,
            (3, 1) => Encoding::Utf16Be,
            (3, 10) => Encoding::Utf16Be,
            _ => Encoding::Unknown,
        }
    }
}

/// A helper for encoding and decoding Mac OS Roman encoded strings.
pub struct MacRomanMapping;

impl MacRomanMapping {
    const START_REMAP: u8 = 128;

    /// Convert from a mac-roman encoded byte to a `char`
    pub fn decode(self, raw: u8) -> char {
        if raw < Self::START_REMAP {
            raw as char
        } else {
            let idx = raw - Self::START_REMAP;
            char::from_u32(MAC_ROMAN_DECODE[idx as usize] as u32).unwrap()
        }
    }

    /// convert from a char to a mac-roman encoded byte, if the char is in
    /// the mac-roman charset.
    pub fn encode(self, c: char) -> Option<u8> {
        let raw_c = c as u32;
        let raw_c: u16 = raw_c.try_into().ok()?;
        if raw_c < Self::START_REMAP as u16 {
            Some(raw_c as u8)
        } else {
            match MAC_ROMAN_ENCODE.binary_search_by_key(&raw_c, |(unic, _)| *unic) {
                Ok(idx) => Some(MAC_ROMAN_ENCODE[idx].1),
                Err(_) => None,
            }
        }
    }
}

/// a lookup table for the Mac Roman encoding. this matches the values
/// 128..=255 to specific unicode values.
#[rustfmt::skip]
static MAC_ROMAN_DECODE: [u16; 128] = [
    196, 197, 199, 201, 209, 214, 220, 225, 224, 226, 228, 227, 229, 231, 233,
    232, 234, 235, 237, 236, 238, 239, 241, 243, 242, 244, 246, 245, 250, 249,
    251, 252, 8224, 176, 162, 163, 167, 8226, 182, 223, 174, 169, 8482, 180,
    168, 8800, 198, 216, 8734, 177, 8804, 8805, 165, 181, 8706, 8721, 8719,
    960, 8747, 170, 186, 937, 230, 248, 191, 161, 172, 8730, 402, 8776, 8710,
    171, 187, 8230, 160, 192, 195, 213, 338, 339, 8211, 8212, 8220, 8221, 8216,
    8217, 247, 9674, 255, 376, 8260, 8364, 8249, 8250, 64257, 64258, 8225, 183,
    8218, 8222, 8240, 194, 202, 193, 203, 200, 205, 206, 207, 204, 211, 212,
    63743, 210, 218, 219, 217, 305, 710, 732, 175, 728, 729, 730, 184, 733,
    731, 711,
];

/// A lookup pairing (sorted) unicode values to Mac Roman values
#[rustfmt::skip]
static MAC_ROMAN_ENCODE: [(u16, u8); 128] = [
    (160, 202), (161, 193), (162, 162), (163, 163),
    (165, 180), (167, 164), (168, 172), (169, 169),
    (170, 187), (171, 199), (172, 194), (174, 168),
    (175, 248), (176, 161), (177, 177), (180, 171),
    (181, 181), (182, 166), (183, 225), (184, 252),
    (186, 188), (187, 200), (191, 192), (192, 203),
    (193, 231), (194, 229), (195, 204), (196, 128),
    (197, 129), (198, 174), (199, 130), (200, 233),
    (201, 131), (202, 230), (203, 232), (204, 237),
    (205, 234), (206, 235), (207, 236), (209, 132),
    (210, 241), (211, 238), (212, 239), (213, 205),
    (214, 133), (216, 175), (217, 244), (218, 242),
    (219, 243), (220, 134), (223, 167), (224, 136),
    (225, 135), (226, 137), (227, 139), (228, 138),
    (229, 140), (230, 190), (231, 141), (232, 143),
    (233, 142), (234, 144), (235, 145), (236, 147),
    (237, 146), (238, 148), (239, 149), (241, 150),
    (242, 152), (243, 151), (244, 153), (245, 155),
    (246, 154), (247, 214), (248, 191), (249, 157),
    (250, 156), (251, 158), (252, 159), (255, 216),
    (305, 245), (338, 206), (339, 207), (376, 217),
    (402, 196), (710, 246), (711, 255), (728, 249),
    (729, 250), (730, 251), (731, 254), (732, 247),
    (733, 253), (937, 189), (960, 185), (8211, 208),
    (8212, 209), (8216, 212), (8217, 213), (8218, 226),
    (8220, 210), (8221, 211), (8222, 227), (8224, 160),
    (8225, 224), (8226, 165), (8230, 201), (8240, 228),
    (8249, 220), (8250, 221), (8260, 218), (8364, 219),
    (8482, 170), (8706, 182), (8710, 198), (8719, 184),
    (8721, 183), (8730, 195), (8734, 176), (8747, 186),
    (8776, 197), (8800, 173), (8804, 178), (8805, 179),
    (9674, 215), (63743, 240), (64257, 222), (64258, 223),
];
