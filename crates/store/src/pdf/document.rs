//! PDF Document Structure
//!
//! Catalog, page tree and document information dictionaries.

use super::objects::{PdfDictionary, PdfObject};
use chrono::{DateTime, Utc};

/// Producer string recorded in exported files
pub const PRODUCER: &str = "Markdown Preview PDF Export";

/// Document information dictionary contents
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self {
            producer: Some(PRODUCER.to_string()),
            creation_date: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::string(title.as_bytes()));
        }
        if let Some(ref producer) = self.producer {
            dict.insert("Producer", PdfObject::string(producer.as_bytes()));
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::string(pdf_date(&date)));
        }
        dict
    }
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`)
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    PdfDictionary::typed("Catalog").with("Pages", PdfObject::Reference(pages_ref))
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let kids = page_refs.iter().map(|&r| PdfObject::Reference(r)).collect();
    PdfDictionary::typed("Pages")
        .with("Kids", PdfObject::Array(kids))
        .with("Count", PdfObject::Integer(page_refs.len() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date_format() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(pdf_date(&date), "D:20240309070501Z");
    }

    #[test]
    fn test_info_dictionary() {
        let info = DocumentInfo {
            creation_date: None,
            ..DocumentInfo::new().with_title("Notes")
        };
        let dict = info.to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::string("Notes")));
        assert_eq!(dict.get("Producer"), Some(&PdfObject::string(PRODUCER)));
        assert!(dict.get("CreationDate").is_none());
    }

    #[test]
    fn test_page_tree() {
        let pages = create_pages(&[4, 7]);
        assert_eq!(pages.get("Count"), Some(&PdfObject::Integer(2)));
        assert_eq!(
            pages.get("Kids"),
            Some(&PdfObject::Array(vec![PdfObject::Reference(4), PdfObject::Reference(7)]))
        );
    }
}
