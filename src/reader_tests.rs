use super::{decode_text, docx_xml_to_text, read_script, validate_input};
use std::io::Write;

#[test]
fn decode_text_handles_bom_and_windows_1252() {
    let mut with_bom = vec![0xEF, 0xBB, 0xBF];
    with_bom.extend_from_slice("INT. KITCHEN - DAY".as_bytes());
    assert_eq!(decode_text(&with_bom), "INT. KITCHEN - DAY");

    // 0x92 is a right single quote in Windows-1252 and invalid UTF-8.
    let cp1252 = b"SARAH\nIt\x92s late.";
    assert_eq!(decode_text(cp1252), "SARAH\nIt\u{2019}s late.");
}

#[test]
fn read_script_normalizes_typographic_punctuation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("draft.TXT");
    std::fs::write(
        &path,
        "JOHN\r\n\u{201c}Wait\u{2026}\u{201d} he says \u{2014} it\u{2019}s 9\u{2013}5.\r\n",
    )
    .expect("write script");

    let text = read_script(&path).expect("read script");
    assert_eq!(text, "JOHN\n\"Wait...\" he says -- it's 9-5.\n");
}

#[test]
fn read_script_extracts_docx_paragraphs_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pilot.docx");
    let file = std::fs::File::create(&path).expect("create docx");
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file(
        "word/document.xml",
        zip::write::SimpleFileOptions::default(),
    )
    .expect("start entry");
    zip.write_all(
        "<w:document><w:body><w:p><w:r><w:t>INT. BARN \u{2014} NIGHT</w:t></w:r></w:p><w:p/><w:p><w:r><w:t xml:space=\"preserve\">Rain &amp; </w:t></w:r><w:r><w:t>thunder.</w:t></w:r></w:p></w:body></w:document>"
            .as_bytes(),
    )
    .expect("write entry");
    zip.finish().expect("finish docx");

    let text = read_script(&path).expect("read docx");
    assert_eq!(text, "INT. BARN \u{2014} NIGHT\n\nRain & thunder.\n");
}

#[test]
fn docx_tabs_and_breaks_survive_flattening() {
    let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";
    assert_eq!(docx_xml_to_text(xml), "A\tB\nC\n");
}

#[test]
fn legacy_doc_files_are_rejected_with_guidance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("old.doc");
    std::fs::write(&path, b"\xD0\xCF\x11\xE0").expect("write doc");

    let err = read_script(&path).expect_err("doc should fail");
    assert!(err.to_string().contains("legacy Word"), "{err}");
}

#[test]
fn validate_input_lists_supported_formats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.txt");
    let err = validate_input(&missing).expect_err("missing file");
    assert!(err.to_string().contains("script not found"));

    let notes = dir.path().join("notes.md");
    std::fs::write(&notes, "hello").expect("write notes");
    let err = validate_input(&notes).expect_err("unsupported");
    let message = err.to_string();
    assert!(message.contains(".md"), "{message}");
    assert!(message.contains(".txt, .pdf, .doc, .docx"), "{message}");
}
