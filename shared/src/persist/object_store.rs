use facet_serde::{read_chunk, write_chunk, ByteBuffer, Chunk, ChunkTag};
use log::{debug, warn};

use crate::{
    constants::PERSIST_FORMAT_VERSION,
    persist::error::PersistError,
    world::{
        object::{object_record::ObjectRecord, object_table::ObjectTable},
        stat::template_registry::TemplateRegistry,
    },
};

/// Header chunk: `format version: u16 | object count: u32`
pub const HEADER_TAG: ChunkTag = ChunkTag::new(*b"FCET");
/// One per Object, holding its [`ObjectRecord`]
pub const OBJECT_TAG: ChunkTag = ChunkTag::new(*b"OBJT");

/// Writes every Object in the table, in id order
pub fn save_objects(table: &ObjectTable) -> Result<Vec<u8>, PersistError> {
    let mut buffer = ByteBuffer::new();

    let mut header = ByteBuffer::new();
    header.write(PERSIST_FORMAT_VERSION);
    header.write(table.len() as u32);
    write_chunk(&mut buffer, HEADER_TAG, header.as_bytes())?;

    let mut payload = ByteBuffer::new();
    for object in table.iter() {
        payload.clear();
        ObjectRecord::capture(object).write(&mut payload)?;
        write_chunk(&mut buffer, OBJECT_TAG, payload.as_bytes())?;
    }

    debug!("Saved {} objects ({} bytes)", table.len(), buffer.len());
    Ok(buffer.into_bytes())
}

/// Rebuilds a table written by [`save_objects`]. Chunks with unknown tags
/// are skipped.
pub fn load_objects(bytes: &[u8], registry: &TemplateRegistry) -> Result<ObjectTable, PersistError> {
    let mut buffer = ByteBuffer::from_slice(bytes);

    let mut header = read_chunk(&mut buffer)?;
    if header.tag != HEADER_TAG {
        return Err(PersistError::MissingHeader);
    }
    let version = header.payload.read::<u16>()?;
    if version != PERSIST_FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            version,
            supported: PERSIST_FORMAT_VERSION,
        });
    }
    let expected = header.payload.read::<u32>()?;
    check_consumed(&header)?;

    let mut table = ObjectTable::new();
    while !buffer.is_exhausted() {
        let mut chunk = read_chunk(&mut buffer)?;
        if chunk.tag != OBJECT_TAG {
            warn!("Skipping unknown chunk {}", chunk.tag);
            continue;
        }

        let record = ObjectRecord::read(&mut chunk.payload)?;
        check_consumed(&chunk)?;
        table.insert(record.build(registry)?)?;
    }

    let found = table.len() as u32;
    if found != expected {
        return Err(PersistError::ObjectCountMismatch { expected, found });
    }

    debug!("Loaded {} objects", found);
    Ok(table)
}

fn check_consumed(chunk: &Chunk) -> Result<(), PersistError> {
    if !chunk.payload.is_exhausted() {
        return Err(PersistError::TrailingBytes {
            tag: chunk.tag.to_string(),
            remaining: chunk.payload.remaining(),
        });
    }
    Ok(())
}
