use crate::document::Document;

/// Byte-order mark so spreadsheet tools detect UTF-8.
const BOM: char = '\u{FEFF}';

/// One `code,document name` row per code, documents in the given order.
pub fn codes_csv<'a>(documents: impl IntoIterator<Item = &'a Document>) -> String {
    let mut csv = String::new();
    csv.push(BOM);
    csv.push_str("Code,Document\n");

    for doc in documents {
        for code in doc.codes.iter() {
            csv.push_str(&quote(code));
            csv.push(',');
            csv.push_str(&quote(&doc.name));
            csv.push('\n');
        }
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
