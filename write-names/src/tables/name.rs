//! The name table

use std::collections::BTreeMap;

use read_names::tables::name::{Encoding, MacRomanMapping, MACINTOSH_ENGLISH, WINDOWS_ENGLISH};
use read_names::NameId;

use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The naming table, ready for serialization.
///
/// Records are written in the order they appear in `name_record`, and each
/// record's string bytes are appended to the storage area in that same
/// order. The layout fields (record count, storage offset, and per-record
/// string offsets) are computed or resolved during serialization and are
/// never supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    /// The name records, in emission order.
    pub name_record: Vec<NameRecord>,
}

/// One record of the naming table, paired with its encoded string bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    string: Vec<u8>,
}

impl Name {
    /// Build a naming table from labelled strings.
    ///
    /// Registered identifiers are visited in identifier order (0..=22);
    /// each one present in `names` contributes a record pair via
    /// [`push_name`][Self::push_name]. Absent identifiers contribute
    /// nothing, and an empty map produces a table with no records.
    pub fn from_names(names: &BTreeMap<NameId, String>) -> Self {
        let mut table = Name::default();
        for id in NameId::registered() {
            if let Some(string) = names.get(&id) {
                table.push_name(id, string);
            }
        }
        table
    }

    /// Append the record pair for one name.
    ///
    /// Every name is stored twice: a Macintosh/Roman/English record holding
    /// the Mac OS Roman encoding of the string, then a
    /// Windows/Unicode-BMP/US-English record holding the UTF-16BE encoding.
    /// The Macintosh variant always precedes the Windows variant, and their
    /// string blobs land in the storage area in the same order.
    pub fn push_name(&mut self, name_id: NameId, string: &str) {
        let (platform_id, encoding_id, language_id) = MACINTOSH_ENGLISH;
        self.name_record.push(NameRecord::new(
            platform_id,
            encoding_id,
            language_id,
            name_id,
            encode_string(Encoding::MacRoman, string),
        ));
        let (platform_id, encoding_id, language_id) = WINDOWS_ENGLISH;
        self.name_record.push(NameRecord::new(
            platform_id,
            encoding_id,
            language_id,
            name_id,
            encode_string(Encoding::Utf16Be, string),
        ));
    }

    fn compute_storage_offset(&self) -> u16 {
        // version, count, storage offset, then the record array
        (6 + self.name_record.len() * 12).try_into().unwrap()
    }
}

impl NameRecord {
    /// Create a record from its identifiers and already-encoded string bytes.
    ///
    /// The record's on-disk `length` field is always the byte length of
    /// `string`, and its on-disk string offset is written as a placeholder,
    /// resolved when the table is dumped.
    pub fn new(
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        name_id: NameId,
        string: Vec<u8>,
    ) -> Self {
        NameRecord {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            string,
        }
    }

    /// The encoded string bytes.
    pub fn string(&self) -> &[u8] {
        &self.string
    }
}

/// Encode `string` for a record with the given encoding.
///
/// Mac OS Roman output substitutes `?` for characters outside its character
/// set: the single-byte encoding is lossy rather than fallible. UTF-16BE
/// output is exact for any input. Unknown encodings produce no bytes.
pub fn encode_string(encoding: Encoding, string: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for c in string.chars() {
        match encoding {
            Encoding::Utf16Be => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf).iter() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
            Encoding::MacRoman => out.push(MacRomanMapping.encode(c).unwrap_or(b'?')),
            Encoding::Unknown => (),
        }
    }
    out
}

/// A storage-area blob holding one record's encoded string.
struct StringData<'a>(&'a [u8]);

impl FontWrite for StringData<'_> {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(self.0)
    }
}

impl FontWrite for Name {
    fn write_into(&self, writer: &mut TableWriter) {
        // version 0: language-tag records are never written
        0u16.write_into(writer);
        (self.name_record.len() as u16).write_into(writer);
        self.compute_storage_offset().write_into(writer);
        self.name_record.write_into(writer);
    }
}

impl FontWrite for NameRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.platform_id.write_into(writer);
        self.encoding_id.write_into(writer);
        self.language_id.write_into(writer);
        self.name_id.write_into(writer);
        (self.string.len() as u16).write_into(writer);
        writer.write_offset(&StringData(&self.string));
    }
}

impl Validate for Name {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Name", |ctx| {
            ctx.in_field("name_record", |ctx| {
                if self.name_record.len() > MAX_RECORD_COUNT {
                    ctx.report("array exceeds what a 16-bit storage offset can span");
                }
                for (i, record) in self.name_record.iter().enumerate() {
                    if record.string.len() > u16::MAX as usize {
                        ctx.in_array_item(i, |ctx| {
                            ctx.report("string data exceeds 16-bit length field")
                        });
                    }
                }
            })
        })
    }
}

/// The most records a table can hold while `6 + count * 12` still fits the
/// 16-bit storage-offset field.
const MAX_RECORD_COUNT: usize = (u16::MAX as usize - 6) / 12;

#[cfg(test)]
mod tests {
    use super::*;
    use log::debug;
    use pretty_assertions::assert_eq;
    use read_names::FontData;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(entries: &[(NameId, &str)]) -> BTreeMap<NameId, String> {
        entries
            .iter()
            .map(|(id, value)| (*id, value.to_string()))
            .collect()
    }

    #[test]
    fn empty_input_is_header_only() {
        let table = Name::from_names(&BTreeMap::new());
        assert!(table.name_record.is_empty());
        let bytes = crate::dump_table(&table).unwrap();
        assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00, 0x06]);

        let loaded = read_names::tables::name::Name::parse(&bytes, 0).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.format(), 0);
    }

    #[test]
    fn records_come_in_ordered_pairs() {
        let table = Name::from_names(&names(&[
            (NameId::SAMPLE_TEXT, "Handgloves"),
            (NameId::COPYRIGHT_NOTICE, "(c) 2024"),
            (NameId::VERSION_STRING, "Version 2.1"),
        ]));
        let ids: Vec<u16> = table.name_record.iter().map(|r| r.name_id.to_u16()).collect();
        assert_eq!(ids, [0, 0, 5, 5, 19, 19]);
        let platforms: Vec<(u16, u16, u16)> = table
            .name_record
            .iter()
            .map(|r| (r.platform_id, r.encoding_id, r.language_id))
            .collect();
        for pair in platforms.chunks(2) {
            assert_eq!(pair, [MACINTOSH_ENGLISH, WINDOWS_ENGLISH]);
        }
    }

    #[test]
    fn roundtrip() {
        init();

        let input = names(&[
            (NameId::FAMILY_NAME, "Ordinær"),
            (NameId::SUBFAMILY_NAME, "Regular"),
            (NameId::LICENCE_DESCRIPTION, "Free as in façade"),
            (NameId::WWS_SUBFAMILY_NAME, "Text"),
        ]);
        let bytes = crate::dump_table(&Name::from_names(&input)).unwrap();
        let loaded = read_names::tables::name::Name::parse(&bytes, 0).unwrap();

        for (key, value) in loaded.iter() {
            debug!("{key}: {value:?}");
        }
        assert_eq!(loaded.len(), input.len());
        for (id, value) in &input {
            assert_eq!(loaded.get(*id), Some(value.as_str()));
        }
    }

    #[test]
    fn windows_record_survives_lossy_macintosh() {
        let table = Name::from_names(&names(&[(NameId::SAMPLE_TEXT, "snow ☃ cone")]));
        // the Macintosh blob degrades to '?', the Windows blob is exact
        assert_eq!(table.name_record[0].string(), b"snow ? cone");
        let bytes = crate::dump_table(&table).unwrap();
        let loaded = read_names::tables::name::Name::parse(&bytes, 0).unwrap();
        assert_eq!(loaded.get(NameId::SAMPLE_TEXT), Some("snow ☃ cone"));
    }

    #[test]
    fn length_is_byte_length_not_char_count() {
        let table = Name::from_names(&names(&[(NameId::DESIGNER, "cé")]));
        assert_eq!(table.name_record[0].string().len(), 2); // Mac OS Roman
        assert_eq!(table.name_record[1].string().len(), 4); // UTF-16BE

        let bytes = crate::dump_table(&table).unwrap();
        let data = FontData::new(&bytes);
        // length fields of the two records
        assert_eq!(data.read_at::<u16>(6 + 8), Ok(2));
        assert_eq!(data.read_at::<u16>(6 + 12 + 8), Ok(4));
    }

    #[test]
    fn offsets_resolve_to_blobs_in_emission_order() {
        let table = Name::from_names(&names(&[
            (NameId::FAMILY_NAME, "Abc"),
            (NameId::FULL_NAME, "Abc Regular"),
        ]));
        let bytes = crate::dump_table(&table).unwrap();
        let data = FontData::new(&bytes);

        let storage_offset = data.read_at::<u16>(4).unwrap();
        assert_eq!(storage_offset as usize, 6 + 4 * 12);

        let mut expected = 0u16;
        for (i, record) in table.name_record.iter().enumerate() {
            let record_start = 6 + i * 12;
            assert_eq!(data.read_at::<u16>(record_start + 10), Ok(expected));
            expected += record.string().len() as u16;
        }
        assert_eq!(bytes.len(), storage_offset as usize + expected as usize);
    }

    #[test]
    fn unregistered_identifiers_in_input_are_ignored() {
        let mut input = names(&[(NameId::FAMILY_NAME, "Kept")]);
        input.insert(NameId::new(30), "Dropped".to_string());
        let table = Name::from_names(&input);
        assert_eq!(table.name_record.len(), 2);
        assert!(table.name_record.iter().all(|r| r.name_id == NameId::FAMILY_NAME));
    }

    #[test]
    fn validation_rejects_oversized_string() {
        let mut table = Name::default();
        table.name_record.push(NameRecord::new(
            3,
            1,
            0x409,
            NameId::DESCRIPTION,
            vec![0; u16::MAX as usize + 1],
        ));
        let err = crate::dump_table(&table).unwrap_err();
        assert!(err
            .to_string()
            .contains("Name/name_record[0]: string data exceeds 16-bit length field"));
    }

    #[test]
    fn overflowing_storage_area_is_an_error() {
        let mut table = Name::default();
        for _ in 0..3 {
            table.name_record.push(NameRecord::new(
                3,
                1,
                0x409,
                NameId::DESCRIPTION,
                vec![0x20; 40_000],
            ));
        }
        assert!(matches!(
            crate::dump_table(&table),
            Err(crate::Error::OffsetOverflow)
        ));
    }

    #[test]
    fn empty_string_values_still_emit_records() {
        let table = Name::from_names(&names(&[(NameId::TRADEMARK, "")]));
        assert_eq!(table.name_record.len(), 2);
        let bytes = crate::dump_table(&table).unwrap();
        let loaded = read_names::tables::name::Name::parse(&bytes, 0).unwrap();
        assert_eq!(loaded.get(NameId::TRADEMARK), Some(""));
    }
}
