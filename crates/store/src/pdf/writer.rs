//! PDF Writer
//!
//! Handles the file structure of a PDF: header, numbered indirect objects,
//! the cross-reference table and the trailer. Streams are Flate-compressed
//! unless they arrive already encoded.

use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF version written in the header
pub const PDF_VERSION: &str = "1.4";

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    /// (object number, byte offset) of every written object
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Reserve the next object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.begin_object(obj_num)?;
        let mut body = Vec::new();
        PdfSerializer::new(&mut body).write_object(object)?;
        self.write_bytes(&body)?;
        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it first when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.encoded {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        self.begin_object(obj_num)?;
        let mut dict = Vec::new();
        PdfSerializer::new(&mut dict).write_dictionary(&stream.dict)?;
        self.write_bytes(&dict)?;
        self.write_str("\nstream\n")?;
        self.write_bytes(&stream.data)?;
        self.write_str("\nendstream\nendobj\n")
    }

    fn begin_object(&mut self, obj_num: u32) -> Result<()> {
        if obj_num == 0 || obj_num >= self.next_obj_num {
            return Err(PdfError::InvalidDocument(format!(
                "object {} was never allocated",
                obj_num
            )));
        }
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{} 0 obj\n", obj_num))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(num, _)| *num);

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", self.next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected = 1u32;
        for (obj_num, offset) in entries {
            // Allocated but unwritten numbers are listed as free
            while expected < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
            expected = obj_num + 1;
        }
        while expected < self.next_obj_num {
            self.write_str("0000000000 65535 f \n")?;
            expected += 1;
        }

        let mut trailer = PdfDictionary::new()
            .with("Size", PdfObject::Integer(i64::from(self.next_obj_num)))
            .with("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }

        self.write_str("trailer\n")?;
        let mut body = Vec::new();
        PdfSerializer::new(&mut body).write_dictionary(&trailer)?;
        self.write_bytes(&body)?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.encoded = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_object() {
        let mut writer = PdfWriter::new(Vec::new());
        writer.write_header().unwrap();
        let num = writer.allocate_object();
        writer.write_object(num, &PdfObject::Integer(7)).unwrap();
        writer.write_xref_and_trailer(num, None).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.contains("1 0 obj\n7\nendobj\n"));
        assert!(text.contains("trailer\n<< /Size 2 /Root 1 0 R >>"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_uncompressed_stream_has_length() {
        let mut writer = PdfWriter::new(Vec::new());
        writer.set_compression(false);
        let num = writer.allocate_object();
        writer.write_stream_object(num, PdfStream::new(b"q Q".to_vec())).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, "1 0 obj\n<< /Length 3 >>\nstream\nq Q\nendstream\nendobj\n");
    }

    #[test]
    fn test_compressed_stream_has_filter() {
        let mut writer = PdfWriter::new(Vec::new());
        let num = writer.allocate_object();
        writer.write_stream_object(num, PdfStream::new(vec![b'a'; 500])).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_unallocated_object_is_rejected() {
        let mut writer = PdfWriter::new(Vec::new());
        let result = writer.write_object(3, &PdfObject::Integer(1));
        assert!(matches!(result, Err(PdfError::InvalidDocument(_))));
    }

    #[test]
    fn test_xref_lists_every_allocated_object() {
        let mut writer = PdfWriter::new(Vec::new());
        let a = writer.allocate_object();
        let _skipped = writer.allocate_object();
        writer.write_object(a, &PdfObject::Integer(1)).unwrap();
        writer.write_xref_and_trailer(a, None).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let xref = text.split("xref\n").nth(1).unwrap();
        assert!(xref.starts_with("0 3\n"));
        assert_eq!(xref.matches(" f \n").count(), 2);
        assert_eq!(xref.matches(" n \n").count(), 1);
    }
}
