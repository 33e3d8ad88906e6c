//! Script document reading.
//!
//! Screenplays arrive as plain text, Word or PDF files. Everything is reduced
//! to UTF-8 text before parsing; plain text also has its typographic
//! punctuation flattened to ASCII.
use anyhow::{anyhow, Context, Result};
use encoding_rs::{Encoding, WINDOWS_1252};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions accepted as screenplay inputs (matched case-insensitively).
pub const SUPPORTED_FORMATS: [&str; 4] = [".txt", ".pdf", ".doc", ".docx"];

static DOCX_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>|<w:p/>").expect("paragraph regex"));
static DOCX_TEXT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br/>").expect("text run regex")
});

/// Lower-cased extension with a leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

pub fn is_supported(path: &Path) -> bool {
    let ext = extension_of(path);
    SUPPORTED_FORMATS.contains(&ext.as_str())
}

/// Check that a script path exists and has a supported extension.
pub fn validate_input(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("script not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("script is not a file: {}", path.display()));
    }
    if !is_supported(path) {
        return Err(anyhow!(
            "unsupported file format: {} (supported formats: {})",
            extension_of(path),
            SUPPORTED_FORMATS.join(", ")
        ));
    }
    Ok(())
}

/// Read a screenplay as UTF-8 text.
pub fn read_script(path: &Path) -> Result<String> {
    let ext = extension_of(path);
    let text = match ext.as_str() {
        ".txt" => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            normalize_punctuation(&decode_text(&bytes))
        }
        ".docx" => read_docx(path)?,
        ".pdf" => pdf_extract::extract_text(path)
            .map_err(|err| anyhow!("extract PDF text from {}: {err}", path.display()))?
            .replace("\r\n", "\n"),
        ".doc" => {
            return Err(anyhow!(
                "legacy Word documents are not supported: {} (save it as .docx or .txt)",
                path.display()
            ))
        }
        other => return Err(anyhow!("unsupported file format: {other}")),
    };
    tracing::debug!(path = %path.display(), chars = text.len(), "script read");
    Ok(text)
}

/// Decode text bytes, honoring a BOM and falling back to Windows-1252.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

/// Replace typographic punctuation with plain ASCII equivalents.
pub fn normalize_punctuation(text: &str) -> String {
    text.replace('\u{2019}', "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace('\u{2013}', "-")
        .replace('\u{2014}', "--")
        .replace('\u{2026}', "...")
        .replace("\r\n", "\n")
}

fn read_docx(path: &Path) -> Result<String> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut archive =
        zip::ZipArchive::new(file).with_context(|| format!("open docx archive {}", path.display()))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .with_context(|| format!("{} has no word/document.xml", path.display()))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .with_context(|| format!("read document body of {}", path.display()))?;
    Ok(docx_xml_to_text(&xml))
}

/// Flatten WordprocessingML into one line per paragraph.
pub fn docx_xml_to_text(xml: &str) -> String {
    let mut out = String::new();
    for paragraph in DOCX_PARAGRAPH.find_iter(xml) {
        for run in DOCX_TEXT_RUN.captures_iter(paragraph.as_str()) {
            match run.get(1) {
                Some(text) => out.push_str(&unescape_xml(text.as_str())),
                None if run[0].starts_with("<w:tab") => out.push('\t'),
                None => out.push('\n'),
            }
        }
        out.push('\n');
    }
    out
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
