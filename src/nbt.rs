use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use num_enum::TryFromPrimitive;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Clone, Copy, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum TagId {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

/// A parsed NBT value. Byte array contents are exposed unsigned (0..255),
/// which is what the map color indices need.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn get(&self, key: &str) -> Option<&Tag> {
        match self {
            Tag::Compound(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn get_path(&self, path: &[&str]) -> Result<&Tag> {
        let mut tag = self;
        for key in path {
            tag = tag
                .get(key)
                .ok_or_else(|| anyhow!("container has no '{}' entry", key))?;
        }
        Ok(tag)
    }

    pub fn as_byte_array(&self) -> Result<&[u8]> {
        match self {
            Tag::ByteArray(bytes) => Ok(bytes),
            _ => Err(anyhow!("tag is not a byte array")),
        }
    }
}

fn read_tag_id<T: Read>(rdr: &mut T) -> Result<TagId> {
    let raw = rdr.read_u8()?;
    TagId::try_from(raw).map_err(|_| anyhow!("unrecognized tag id {}", raw))
}

fn read_string<T: Read>(rdr: &mut T) -> Result<String> {
    let length = rdr.read_u16::<BigEndian>()?;
    let mut buf = vec![0u8; length as usize];
    rdr.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| anyhow!("string is not valid utf-8"))
}

fn read_payload<T: Read>(rdr: &mut T, id: TagId) -> Result<Tag> {
    match id {
        TagId::End => {
            bail!("unexpected end tag");
        }
        TagId::Byte => Ok(Tag::Byte(rdr.read_i8()?)),
        TagId::Short => Ok(Tag::Short(rdr.read_i16::<BigEndian>()?)),
        TagId::Int => Ok(Tag::Int(rdr.read_i32::<BigEndian>()?)),
        TagId::Long => Ok(Tag::Long(rdr.read_i64::<BigEndian>()?)),
        TagId::Float => Ok(Tag::Float(rdr.read_f32::<BigEndian>()?)),
        TagId::Double => Ok(Tag::Double(rdr.read_f64::<BigEndian>()?)),
        TagId::ByteArray => {
            let length = rdr.read_i32::<BigEndian>()?;
            if length < 0 {
                bail!("byte array has negative length {}", length);
            }
            let mut bytes = vec![0u8; length as usize];
            rdr.read_exact(&mut bytes)?;
            Ok(Tag::ByteArray(bytes))
        }
        TagId::String => Ok(Tag::String(read_string(rdr)?)),
        TagId::List => {
            let element_id = read_tag_id(rdr)?;
            let length = rdr.read_i32::<BigEndian>()?;
            let mut items = Vec::new();
            for _ in 0..length {
                items.push(read_payload(rdr, element_id)?);
            }
            Ok(Tag::List(items))
        }
        TagId::Compound => {
            let mut entries = HashMap::new();
            loop {
                let entry_id = read_tag_id(rdr)?;
                if entry_id == TagId::End {
                    break;
                }
                let name = read_string(rdr)?;
                let value = read_payload(rdr, entry_id)?;
                entries.insert(name, value);
            }
            Ok(Tag::Compound(entries))
        }
        TagId::IntArray => {
            let length = rdr.read_i32::<BigEndian>()?;
            if length < 0 {
                bail!("int array has negative length {}", length);
            }
            let mut values = vec![0i32; length as usize];
            for value in values.iter_mut() {
                *value = rdr.read_i32::<BigEndian>()?;
            }
            Ok(Tag::IntArray(values))
        }
        TagId::LongArray => {
            let length = rdr.read_i32::<BigEndian>()?;
            if length < 0 {
                bail!("long array has negative length {}", length);
            }
            let mut values = vec![0i64; length as usize];
            for value in values.iter_mut() {
                *value = rdr.read_i64::<BigEndian>()?;
            }
            Ok(Tag::LongArray(values))
        }
    }
}

/// Parses an NBT container. Gzip-compressed containers (which is how
/// Minecraft stores its .dat files) are decompressed transparently.
/// Returns the payload of the root tag; its name is discarded.
pub fn parse(data: &[u8]) -> Result<Tag> {
    if data.starts_with(&GZIP_MAGIC) {
        let mut decompressed = Vec::new();
        GzDecoder::new(data)
            .read_to_end(&mut decompressed)
            .context("cannot decompress container")?;
        return parse_uncompressed(&decompressed);
    }
    parse_uncompressed(data)
}

fn parse_uncompressed(data: &[u8]) -> Result<Tag> {
    let mut rdr = Cursor::new(data);
    let root_id = read_tag_id(&mut rdr)?;
    if root_id == TagId::End {
        bail!("container is empty");
    }
    let _root_name = read_string(&mut rdr)?;
    read_payload(&mut rdr, root_id)
}

pub fn load(path: &Path) -> Result<Tag> {
    let data = std::fs::read(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse(&data).with_context(|| format!("cannot decode {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    // Root compound { "data": { "colors": <bytes>, "scale": 0u8 } }
    fn map_container(colors: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(10); // compound, root
        out.extend_from_slice(&0u16.to_be_bytes()); // empty name
        out.push(10); // compound "data"
        out.extend_from_slice(&4u16.to_be_bytes());
        out.extend_from_slice(b"data");
        out.push(1); // byte "scale"
        out.extend_from_slice(&5u16.to_be_bytes());
        out.extend_from_slice(b"scale");
        out.push(0);
        out.push(7); // byte array "colors"
        out.extend_from_slice(&6u16.to_be_bytes());
        out.extend_from_slice(b"colors");
        out.extend_from_slice(&(colors.len() as i32).to_be_bytes());
        out.extend_from_slice(colors);
        out.push(0); // end of "data"
        out.push(0); // end of root
        out
    }

    #[test]
    fn parse_and_navigate_compound() {
        let data = map_container(&[0, 4, 6, 255]);
        let root = parse(&data).unwrap();

        let colors = root.get_path(&["data", "colors"]).unwrap();
        assert_eq!(colors.as_byte_array().unwrap(), &[0, 4, 6, 255]);
        assert_eq!(root.get_path(&["data", "scale"]).unwrap(), &Tag::Byte(0));
    }

    #[test]
    fn byte_array_contents_are_unsigned() {
        // 0xff must come back as 255, not -1
        let data = map_container(&[0xff]);
        let root = parse(&data).unwrap();
        let colors = root.get_path(&["data", "colors"]).unwrap();
        assert_eq!(colors.as_byte_array().unwrap(), &[255]);
    }

    #[test]
    fn parse_gzip_container() {
        let plain = map_container(&[1, 2, 3]);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&plain).unwrap();
        let compressed = encoder.finish().unwrap();

        let root = parse(&compressed).unwrap();
        let colors = root.get_path(&["data", "colors"]).unwrap();
        assert_eq!(colors.as_byte_array().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn missing_key_is_an_error() {
        let data = map_container(&[0]);
        let root = parse(&data).unwrap();
        assert!(root.get_path(&["data", "banners"]).is_err());
        assert!(root.get_path(&["Data"]).is_err());
    }

    #[test]
    fn wrong_leaf_type_is_an_error() {
        let data = map_container(&[0]);
        let root = parse(&data).unwrap();
        let scale = root.get_path(&["data", "scale"]).unwrap();
        assert!(scale.as_byte_array().is_err());
    }

    #[test]
    fn truncated_container_is_an_error() {
        let data = map_container(&[1, 2, 3]);
        assert!(parse(&data[..data.len() - 4]).is_err());
    }

    #[test]
    fn unrecognized_tag_id_is_an_error() {
        let mut data = Vec::new();
        data.push(13); // not an NBT tag id
        data.extend_from_slice(&0u16.to_be_bytes());
        assert!(parse(&data).is_err());
    }

    #[test]
    fn empty_container_is_an_error() {
        assert!(parse(&[0]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn parse_list_payload() {
        let mut data = Vec::new();
        data.push(10);
        data.extend_from_slice(&0u16.to_be_bytes());
        data.push(9); // list "xs"
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(b"xs");
        data.push(3); // of ints
        data.extend_from_slice(&2i32.to_be_bytes());
        data.extend_from_slice(&7i32.to_be_bytes());
        data.extend_from_slice(&(-1i32).to_be_bytes());
        data.push(0);

        let root = parse(&data).unwrap();
        let xs = root.get("xs").unwrap();
        assert_eq!(xs, &Tag::List(vec![Tag::Int(7), Tag::Int(-1)]));
    }
}
