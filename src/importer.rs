use csv::ReaderBuilder;
use std::collections::HashMap;

/// One imported record: header name -> field value, everything a string.
pub type RawRecord = HashMap<String, String>;

/// Parses uploaded delimited text into flat records, in file order.
///
/// The header row defines the keys. Blank lines are skipped, a short row
/// yields missing keys rather than an error, and no type or column-count
/// validation happens here. Input that cannot be parsed at all yields an
/// empty sequence; the only symptom upstream is "0 records loaded".
pub fn parse_delimited(text: &str) -> Vec<RawRecord> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(_) => return Vec::new(),
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => return Vec::new(),
        };
        let mut raw = RawRecord::new();
        for (key, value) in headers.iter().zip(record.iter()) {
            raw.insert(key.trim().to_string(), value.to_string());
        }
        records.push(raw);
    }
    records
}
