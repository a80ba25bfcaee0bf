use crate::domain::ChannelRecord;

/// True when every token occurs in the record's name, ignoring case
///
/// Tokens are literal text. An empty token list matches everything.
pub fn matches_all<S: AsRef<str>>(record: &ChannelRecord, tokens: &[S]) -> bool {
    let name = record.name.to_uppercase();
    tokens
        .iter()
        .all(|token| name.contains(&token.as_ref().to_uppercase()))
}

/// Keeps the records whose name contains all tokens, preserving input order
pub fn filter_records<S: AsRef<str>>(records: &[ChannelRecord], tokens: &[S]) -> Vec<ChannelRecord> {
    records
        .iter()
        .filter(|record| matches_all(record, tokens))
        .cloned()
        .collect()
}
