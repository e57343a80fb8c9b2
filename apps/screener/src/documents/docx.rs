use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::DocumentError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Joins the text of every body paragraph with `\n`.
pub(super) fn extract_text(path: &Path, bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::extraction(path, format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| DocumentError::extraction(path, format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::extraction(path, format!("unreadable {DOCUMENT_XML}: {e}")))?;

    let paragraphs = body_paragraphs(&xml)
        .map_err(|e| DocumentError::extraction(path, format!("XML parsing error: {e}")))?;
    Ok(paragraphs.join("\n"))
}

/// Elements whose subtree never contributes to body paragraph text: tables,
/// text boxes and the legacy fallback copy of drawings.
const SKIPPED_SUBTREES: [&[u8]; 3] = [b"tbl", b"txbxContent", b"Fallback"];

/// Collects the text of every body-level paragraph in `document.xml`.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut skip_depth = 0usize;
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;

        if skip_depth > 0 {
            match &event {
                Event::Start(e) if SKIPPED_SUBTREES.contains(&e.local_name().as_ref()) => {
                    skip_depth += 1
                }
                Event::End(e) if SKIPPED_SUBTREES.contains(&e.local_name().as_ref()) => {
                    skip_depth -= 1
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                name if SKIPPED_SUBTREES.contains(&name) => skip_depth += 1,
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if in_paragraph && in_run => current.push('\t'),
                b"br" | b"cr" if in_paragraph && in_run => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" if in_paragraph => {
                    paragraphs.push(std::mem::take(&mut current));
                    in_paragraph = false;
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_paragraph && in_text => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(r) if in_paragraph && in_text => {
                if let Some(c) = resolve_entity(&r) {
                    current.push(c);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn resolve_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => {
            let name = std::str::from_utf8(name).ok()?.strip_prefix('#')?;
            let code = match name.strip_prefix('x').or_else(|| name.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
