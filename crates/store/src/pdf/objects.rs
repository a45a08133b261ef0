//! PDF Object Model
//!
//! The handful of object types the raster exporter needs, plus a
//! serializer that writes them in PDF syntax.

use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string, written in parentheses
    String(Vec<u8>),
    /// Name object, written with a leading `/`
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    /// Indirect reference to an object number (generation 0)
    Reference(u32),
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        PdfObject::String(s.into())
    }

    /// Array of numbers, integers where the value has no fractional part
    pub fn numbers(values: &[f64]) -> Self {
        PdfObject::Array(
            values
                .iter()
                .map(|&v| {
                    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                        PdfObject::Integer(v as i64)
                    } else {
                        PdfObject::Real(v)
                    }
                })
                .collect(),
        )
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<Vec<PdfObject>> for PdfObject {
    fn from(arr: Vec<PdfObject>) -> Self {
        PdfObject::Array(arr)
    }
}

/// PDF dictionary, keys kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: Vec<(String, PdfObject)>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary with `/Type` set
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    /// Insert a key, replacing any existing value
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: PdfObject) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

/// Stream payload with its dictionary. `/Length` is added when written.
#[derive(Debug, Clone)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Whether `data` is already encoded and needs no further compression
    pub encoded: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            encoded: false,
        }
    }

    pub fn with_dict(mut self, dict: PdfDictionary) -> Self {
        self.dict = dict;
        self
    }
}

/// Serializes PDF objects to a byte sink
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(data) => self.write_string(data),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(items) => {
                write!(self.writer, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(self.writer, " ")?;
                    }
                    self.write_object(item)?;
                }
                write!(self.writer, "]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Reference(obj_num) => write!(self.writer, "{} 0 R", obj_num),
        }
    }

    pub fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_string(&mut self, data: &[u8]) -> io::Result<()> {
        write!(self.writer, "(")?;
        for &byte in data {
            match byte {
                b'(' | b')' | b'\\' => write!(self.writer, "\\{}", byte as char)?,
                b'\n' => write!(self.writer, "\\n")?,
                b'\r' => write!(self.writer, "\\r")?,
                0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "\\{:03o}", byte)?,
            }
        }
        write!(self.writer, ")")
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }
}

/// Format a real number without trailing zeros
pub(crate) fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{:.1}", n);
    }
    let s = format!("{:.4}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
impl PdfDictionary {
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut out = Vec::new();
        PdfSerializer::new(&mut out).write_object(obj).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(3.0)), "3.0");
        assert_eq!(serialize(&PdfObject::Real(595.2756)), "595.2756");
        assert_eq!(serialize(&PdfObject::numbers(&[0.0, 0.0, 595.5, 842.0])), "[0 0 595.5 842]");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(serialize(&PdfObject::string("a(b)\\")), "(a\\(b\\)\\\\)");
        assert_eq!(serialize(&PdfObject::string(vec![0xE9])), "(\\351)");
    }

    #[test]
    fn test_serialize_name_escapes() {
        assert_eq!(serialize(&PdfObject::name("Im1")), "/Im1");
        assert_eq!(serialize(&PdfObject::name("A B")), "/A#20B");
    }

    #[test]
    fn test_dictionary_keeps_insertion_order() {
        let dict = PdfDictionary::typed("Page")
            .with("Parent", PdfObject::Reference(2))
            .with("Type", PdfObject::name("Page"));
        assert_eq!(serialize(&dict.into()), "<< /Type /Page /Parent 2 0 R >>");
    }
}
