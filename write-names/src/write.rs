//! Serializing tables and resolving offsets

use crate::error::Error;
use crate::validate::Validate;

/// A type that can be written out as part of a font file.
///
/// This both handles writing big-endian bytes as well as describing the
/// relationship between a table and the objects in its storage area.
pub trait FontWrite {
    /// Write our data and information about offsets into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// Attempt to serialize a table.
///
/// If the table is malformed this will return the validation report;
/// otherwise it returns the bytes encoding the table, with every recorded
/// offset resolved. Resolution can itself fail, if an object ends up further
/// into the storage area than a 16-bit offset can express.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, Error> {
    table.validate().map_err(Error::ValidationFailed)?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    writer.dump()
}

/// An object that accumulates a serialized table and its storage area.
///
/// Fixed-width fields are written directly, in order. Offsets are written as
/// 2-byte placeholders via [`write_offset`][Self::write_offset] and
/// overwritten once the full byte layout of the table is known: the storage
/// area starts immediately after the table's own fields, and offsets are
/// resolved relative to its start.
#[derive(Debug)]
pub struct TableWriter {
    /// Storage-area objects, in the order they were added.
    storage: Vec<TableData>,
    /// Tables currently being written.
    ///
    /// Objects are processed as they are encountered.
    stack: Vec<TableData>,
}

/// Identifies an object in the storage area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ObjectId(usize);

impl TableWriter {
    /// Write raw bytes into the current table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.stack.last_mut().unwrap().write(bytes)
    }

    /// Create an offset to an object in the storage area.
    ///
    /// The provided object is serialized immediately and appended to the
    /// storage area; the position of the offset within the current table is
    /// recorded, and a 2-byte placeholder written there. Offsets are
    /// resolved when the table is dumped.
    pub fn write_offset(&mut self, obj: &dyn FontWrite) {
        let object = self.add_object(obj);
        self.stack.last_mut().unwrap().add_offset(object);
    }

    fn add_object(&mut self, obj: &dyn FontWrite) -> ObjectId {
        self.stack.push(TableData::default());
        obj.write_into(self);
        let data = self.stack.pop().unwrap();
        self.storage.push(data);
        ObjectId(self.storage.len() - 1)
    }

    pub(crate) fn dump(mut self) -> Result<Vec<u8>, Error> {
        let root = self.stack.pop().unwrap();
        assert!(self.stack.is_empty(), "dump with unfinished tables");

        // first pass: position of each object, relative to the start of the
        // storage area
        let mut positions = Vec::with_capacity(self.storage.len());
        let mut storage_len = 0usize;
        for object in &self.storage {
            positions.push(storage_len);
            storage_len += object.bytes.len();
        }
        log::trace!(
            "dumping table: {} bytes, {} storage objects ({} bytes)",
            root.bytes.len(),
            self.storage.len(),
            storage_len
        );

        // second pass: write out bytes, recording where offsets live
        let mut out = Vec::with_capacity(root.bytes.len() + storage_len);
        let mut patches = Vec::new();
        for data in std::iter::once(&root).chain(self.storage.iter()) {
            let start = out.len();
            out.extend_from_slice(&data.bytes);
            patches.extend(
                data.offsets
                    .iter()
                    .map(|offset| (start + offset.pos as usize, offset.object)),
            );
        }

        // final pass: resolve offsets
        for (at, object) in patches {
            let resolved =
                u16::try_from(positions[object.0]).map_err(|_| Error::OffsetOverflow)?;
            out[at..at + 2].copy_from_slice(&resolved.to_be_bytes());
        }
        Ok(out)
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        TableWriter {
            storage: Vec::new(),
            stack: vec![TableData::default()],
        }
    }
}

/// The encoded data for a given table, along with info on included offsets
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TableData {
    bytes: Vec<u8>,
    offsets: Vec<OffsetRecord>,
}

/// The position of an unresolved offset, and the object it points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OffsetRecord {
    /// the position of the offset within the parent table
    pos: u32,
    /// The object pointed to by the offset
    object: ObjectId,
}

impl TableData {
    fn add_offset(&mut self, object: ObjectId) {
        self.offsets.push(OffsetRecord {
            pos: self.bytes.len() as u32,
            object,
        });
        self.write(&[0u8, 0]);
    }

    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes)
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

//NOTE: not implemented for usize! it would be too easy to write a length
//field at the platform's width by accident.
write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(read_names::NameId);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blob(Vec<u8>);

    impl FontWrite for Blob {
        fn write_into(&self, writer: &mut TableWriter) {
            writer.write_slice(&self.0)
        }
    }

    #[test]
    fn storage_relative_offsets() {
        let mut writer = TableWriter::default();
        0xFFFFu16.write_into(&mut writer);
        writer.write_offset(&Blob(vec![0xAA; 4]));
        writer.write_offset(&Blob(vec![0xBB; 2]));
        let out = writer.dump().unwrap();
        // header field, two resolved offsets, then the storage area
        assert_eq!(
            out,
            [
                0xFF, 0xFF, // field
                0x00, 0x00, // offset of first blob
                0x00, 0x04, // offset of second blob
                0xAA, 0xAA, 0xAA, 0xAA, 0xBB, 0xBB,
            ]
        );
    }

    #[test]
    fn identical_objects_are_not_shared() {
        let mut writer = TableWriter::default();
        writer.write_offset(&Blob(vec![0x11]));
        writer.write_offset(&Blob(vec![0x11]));
        let out = writer.dump().unwrap();
        assert_eq!(out, [0x00, 0x00, 0x00, 0x01, 0x11, 0x11]);
    }

    #[test]
    fn offset_overflow_reported() {
        let mut writer = TableWriter::default();
        writer.write_offset(&Blob(vec![0; u16::MAX as usize + 1]));
        writer.write_offset(&Blob(vec![1]));
        assert!(matches!(writer.dump(), Err(Error::OffsetOverflow)));
    }

    #[test]
    fn empty_writer_dumps_nothing() {
        let writer = TableWriter::default();
        assert_eq!(writer.dump().unwrap(), Vec::<u8>::new());
    }
}
