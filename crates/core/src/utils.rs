const FALLBACK_BASENAME: &str = "filtered";

/// Builds the default output filename from the filter tokens
/// Blank tokens are dropped, the rest are trimmed, lower-cased and joined with `_`
pub fn generate_output_filename<S: AsRef<str>>(tokens: &[S]) -> String {
    let basename = tokens
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    if basename.is_empty() {
        format!("{}.m3u", FALLBACK_BASENAME)
    } else {
        format!("{}.m3u", basename)
    }
}
