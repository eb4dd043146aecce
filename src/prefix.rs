//! Longest common prefix over a set of identifiers.

/// Longest string that is a leading substring of every input.
///
/// An empty input yields `""`. A single input is returned whole, so a lone
/// namespace becomes its own rewrite prefix. Otherwise the inputs are sorted
/// by code point and only the two extremes are compared: every string sorted
/// between them shares at least their common prefix.
pub fn longest_common_prefix<S: AsRef<str>>(identifiers: &[S]) -> String {
    match identifiers {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        _ => {
            let mut sorted: Vec<&str> = identifiers.iter().map(AsRef::as_ref).collect();
            sorted.sort_unstable();

            let first = sorted[0];
            let last = sorted[sorted.len() - 1];
            first
                .chars()
                .zip(last.chars())
                .take_while(|(a, b)| a == b)
                .map(|(c, _)| c)
                .collect()
        }
    }
}
