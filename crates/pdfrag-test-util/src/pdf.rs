use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Write a minimal PDF with one page per entry of `pages` and return its
/// path (`<dir>/document.pdf`).
///
/// Each page shows its text as a single line in Helvetica. Only ASCII text is
/// supported.
pub fn write_pdf(dir: &Path, pages: &[&str]) -> PathBuf {
    let path = dir.join("document.pdf");
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

/// Build the bytes of a minimal single-font PDF.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        assert!(text.is_ascii(), "build_pdf only supports ASCII text");
        let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape(text));
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n{body}\nendobj\n", i + 1).unwrap();
    }

    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).unwrap();
    for offset in offsets {
        write!(out, "{offset:010} 00000 n \n").unwrap();
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    )
    .unwrap();
    out.into_bytes()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = build_pdf(&["Hello", "World"]);
        let text = String::from_utf8(bytes).unwrap();
        let xref_start = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_start..]
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 7);
        for (i, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn escapes_parentheses() {
        let text = String::from_utf8(build_pdf(&["f(x) \\ y"])).unwrap();
        assert!(text.contains("(f\\(x\\) \\\\ y) Tj"));
    }

    #[test]
    fn writes_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_pdf(tmp.path(), &["page"]);
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF-1.4"));
    }
}
