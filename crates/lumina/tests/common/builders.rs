//! Builders for document fixtures and source-file batches.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use lopdf::{dictionary, Document, Object, Stream};

use lumina::SourceFile;

/// A PDF with one page per entry, each showing that entry's text.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|text| {
            let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize PDF");
    bytes
}

/// A DOCX whose body has one paragraph per entry.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(xml.as_bytes()).expect("Failed to write zip entry");
        writer.finish().expect("Failed to finish zip");
    }
    buffer.into_inner()
}

/// `len` characters cycling through the lowercase alphabet.
pub fn alphabet_text(len: usize) -> String {
    (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}

/// Builder for a batch of `SourceFile`s.
#[derive(Default)]
pub struct BatchBuilder {
    files: Vec<SourceFile>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, content: &str) -> Self {
        self.files
            .push(SourceFile::with_type(name, "text/plain", content.as_bytes().to_vec()));
        self
    }

    pub fn pdf(mut self, name: &str, pages: &[&str]) -> Self {
        self.files.push(SourceFile::new(name, pdf_with_pages(pages)));
        self
    }

    pub fn docx(mut self, name: &str, paragraphs: &[&str]) -> Self {
        self.files
            .push(SourceFile::new(name, docx_with_paragraphs(paragraphs)));
        self
    }

    pub fn raw(mut self, name: &str, declared_type: &str, bytes: &[u8]) -> Self {
        self.files
            .push(SourceFile::with_type(name, declared_type, bytes.to_vec()));
        self
    }

    /// `count` small text files named `note-000.txt`, `note-001.txt`, ...
    pub fn numbered_texts(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.text(&format!("note-{:03}.txt", i), &format!("note number {}", i));
        }
        self
    }

    pub fn build(self) -> Vec<SourceFile> {
        self.files
    }
}

/// A batch with one file of every kind the pipeline distinguishes.
pub fn mixed_batch() -> Vec<SourceFile> {
    BatchBuilder::new()
        .text("hello.txt", "hello world")
        .pdf("invoice.pdf", &["Invoice 2024-001", "Total due 120 EUR"])
        .docx("letter.docx", &["Dear team", "Thanks for the update"])
        .raw("photo.png", "image/png", &[0x89, b'P', b'N', b'G'])
        .raw("blob.bin", "application/octet-stream", &[0, 1, 2, 3])
        .text("long.md", &alphabet_text(3000))
        .raw("broken.pdf", "application/pdf", b"%PDF-1.4 truncated")
        .build()
}
