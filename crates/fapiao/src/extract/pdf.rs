//! PDF token extraction.
//!
//! `lopdf` validates the document and provides the plain-text fallback;
//! positioned words come from poppler's `pdftotext -bbox`, which handles more
//! PDF variants than pure-Rust text positioning. Only the first page is
//! extracted; multi-page invoices are out of scope.

use std::path::Path;
use std::process::Command;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

use crate::error::ExtractError;
use crate::extract::{PageContent, PageToken, TokenSource};

pub struct PdfTokenSource;

impl PdfTokenSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for PdfTokenSource {
    fn first_page(&self, path: &Path) -> Result<PageContent, ExtractError> {
        let _span = tracing::info_span!("extract.pdf").entered();

        let pdf_bytes = std::fs::read(path).map_err(|e| ExtractError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

        let doc = lopdf::Document::load_mem(&pdf_bytes).map_err(|e| {
            ExtractError::InvalidDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        if doc.get_pages().is_empty() {
            return Err(ExtractError::EmptyDocument(path.to_path_buf()));
        }

        // The plain text is a fallback rendering only; an extraction failure
        // here must not fail the page as long as positioned words exist.
        let plain_text = match doc.extract_text(&[1]) {
            Ok(text) => text,
            Err(e) => {
                warn!("lopdf text extraction failed for {}: {}", path.display(), e);
                String::new()
            }
        };

        let tokens = positioned_words(path)?;

        Ok(PageContent { tokens, plain_text })
    }
}

/// Runs `pdftotext -bbox` restricted to page 1 and parses the resulting
/// XHTML word list.
fn positioned_words(path: &Path) -> Result<Vec<PageToken>, ExtractError> {
    let output = Command::new("pdftotext")
        .args(["-bbox", "-f", "1", "-l", "1", "-q"])
        .arg(path)
        .arg("-")
        .output()
        .map_err(ExtractError::PdfToText)?;

    if !output.status.success() {
        return Err(ExtractError::PdfToTextFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let xml = String::from_utf8_lossy(&output.stdout);
    parse_bbox_words(&xml)
}

/// Parses poppler's bbox XHTML: `<word xMin=".." yMin=".." xMax=".." yMax="..">text</word>`,
/// first `<page>` element only. Coordinates are truncated to integers.
fn parse_bbox_words(xml: &str) -> Result<Vec<PageToken>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tokens = Vec::new();
    let mut in_word = false;
    let mut current = PageToken {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
        text: String::new(),
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"word" => {
                    in_word = true;
                    current = PageToken {
                        left: 0,
                        top: 0,
                        right: 0,
                        bottom: 0,
                        text: String::new(),
                    };
                    for attr in e.attributes().flatten() {
                        let value = attr
                            .unescape_value()
                            .map_err(|e| ExtractError::LayoutParse(e.to_string()))?;
                        let coord = value.parse::<f64>().unwrap_or(0.0) as i64;
                        match attr.key.local_name().as_ref() {
                            b"xMin" => current.left = coord,
                            b"yMin" => current.top = coord,
                            b"xMax" => current.right = coord,
                            b"yMax" => current.bottom = coord,
                            _ => {}
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_word => {
                let text = t
                    .decode()
                    .map_err(|e| ExtractError::LayoutParse(e.to_string()))?;
                current.text.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"word" => {
                    in_word = false;
                    if !current.text.is_empty() {
                        tokens.push(current.clone());
                    }
                }
                // -f/-l already restrict the range; the guard keeps a
                // multi-page bbox document honest.
                b"page" => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::LayoutParse(e.to_string())),
            _ => {}
        }
    }

    Ok(tokens)
}
