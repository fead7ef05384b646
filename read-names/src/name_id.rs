//! Name Identifiers
//!
//! Although these are treated as u16s on disk, we choose to represent them
//! as a distinct type.

use core::fmt;

use crate::raw::Scalar;

/// Identifier for an informational string (or name).
///
/// Identifiers 0 to 22, inclusive, are registered and carry a semantic
/// label; they are provided as associated constants on this type. Higher
/// values are either reserved for future standard names or font-specific.
///
/// For more detail, see <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NameId(u16);

/// The labels of the registered identifiers, in identifier order.
static LABELS: [&str; 23] = [
    "copyright",              // 0
    "fontFamily",             // 1
    "fontSubfamily",          // 2
    "uniqueID",               // 3
    "fullName",               // 4
    "version",                // 5
    "postScriptName",         // 6
    "trademark",              // 7
    "manufacturer",           // 8
    "designer",               // 9
    "description",            // 10
    "vendorURL",              // 11
    "designerURL",            // 12
    "licence",                // 13
    "licenceURL",             // 14
    "reserved",               // 15
    "preferredFamily",        // 16
    "preferredSubfamily",     // 17
    "compatibleFullName",     // 18
    "sampleText",             // 19
    "postScriptFindFontName", // 20
    "wwsFamily",              // 21
    "wwsSubfamily",           // 22
];

impl NameId {
    /// Copyright notice.
    pub const COPYRIGHT_NOTICE: Self = Self(0);

    /// Font family name.
    ///
    /// Used in combination with the subfamily name (ID 2), and shared among
    /// at most four fonts that differ only in weight or style.
    pub const FAMILY_NAME: Self = Self(1);

    /// Font subfamily name.
    ///
    /// Distinguishes the fonts in a group with the same family name; should
    /// be used for style and weight variants only.
    pub const SUBFAMILY_NAME: Self = Self(2);

    /// Unique font identifier.
    pub const UNIQUE_ID: Self = Self(3);

    /// Full font name that reflects all family and relevant subfamily
    /// descriptors.
    pub const FULL_NAME: Self = Self(4);

    /// Version string.
    ///
    /// Should begin with the syntax "Version number.number".
    pub const VERSION_STRING: Self = Self(5);

    /// PostScript name for the font.
    pub const POSTSCRIPT_NAME: Self = Self(6);

    /// Trademark notice/information for this font.
    pub const TRADEMARK: Self = Self(7);

    /// Manufacturer name.
    pub const MANUFACTURER: Self = Self(8);

    /// Name of the designer of the typeface.
    pub const DESIGNER: Self = Self(9);

    /// Description of the typeface.
    pub const DESCRIPTION: Self = Self(10);

    /// URL of the font vendor.
    pub const VENDOR_URL: Self = Self(11);

    /// URL of the typeface designer.
    pub const DESIGNER_URL: Self = Self(12);

    /// Licence description.
    ///
    /// A plain-language description of how the font may be legally used.
    pub const LICENCE_DESCRIPTION: Self = Self(13);

    /// URL where additional licensing information can be found.
    pub const LICENCE_URL: Self = Self(14);

    /// Reserved.
    pub const RESERVED: Self = Self(15);

    /// Preferred (typographic) family name.
    ///
    /// The typographic family grouping doesn't impose any constraints on the
    /// number of faces within it, in contrast with the 4-style family
    /// grouping (ID 1).
    pub const PREFERRED_FAMILY: Self = Self(16);

    /// Preferred (typographic) subfamily name.
    ///
    /// Must be unique within a particular typographic family.
    pub const PREFERRED_SUBFAMILY: Self = Self(17);

    /// Compatible full name (Macintosh only).
    pub const COMPATIBLE_FULL_NAME: Self = Self(18);

    /// Sample text.
    ///
    /// This can be the font name, or any other text that the designer thinks
    /// is the best sample to display the font in.
    pub const SAMPLE_TEXT: Self = Self(19);

    /// PostScript CID findfont name.
    pub const POSTSCRIPT_FINDFONT_NAME: Self = Self(20);

    /// WWS family name.
    pub const WWS_FAMILY_NAME: Self = Self(21);

    /// WWS subfamily name.
    pub const WWS_SUBFAMILY_NAME: Self = Self(22);
}

impl NameId {
    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns an iterator over the registered identifiers, in identifier
    /// order.
    pub fn registered() -> impl Iterator<Item = Self> + Clone {
        (0..LABELS.len() as u16).map(Self)
    }

    /// The semantic label of this identifier, if it is registered.
    pub fn label(self) -> Option<&'static str> {
        LABELS.get(self.0 as usize).copied()
    }

    /// Look up the identifier carrying the given label.
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .position(|l| *l == label)
            .map(|idx| Self(idx as u16))
    }

    /// Return the identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Return the memory representation of this identifier as a byte array
    /// in big-endian (network) byte order.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for NameId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl Scalar for NameId {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN;

    fn read(bytes: &[u8]) -> Option<Self> {
        u16::read(bytes).map(Self)
    }
}

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_covers_the_whole_table() {
        let all: Vec<_> = NameId::registered().collect();
        assert_eq!(all.len(), 23);
        assert_eq!(all.first(), Some(&NameId::COPYRIGHT_NOTICE));
        assert_eq!(all.last(), Some(&NameId::WWS_SUBFAMILY_NAME));
        assert!(all.iter().all(|id| id.label().is_some()));
    }

    #[test]
    fn labels() {
        assert_eq!(NameId::FAMILY_NAME.label(), Some("fontFamily"));
        assert_eq!(NameId::LICENCE_DESCRIPTION.label(), Some("licence"));
        assert_eq!(NameId::new(23).label(), None);
        assert_eq!(NameId::from_label("sampleText"), Some(NameId::SAMPLE_TEXT));
        assert_eq!(NameId::from_label("noSuchName"), None);
    }

    #[test]
    fn debug_uses_label() {
        assert_eq!(format!("{:?}", NameId::VERSION_STRING), "version");
        assert_eq!(format!("{:?}", NameId::new(0x103)), "259");
    }
}
