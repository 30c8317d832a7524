//! Summary extraction from the synthesis narrative.

/// Returned when the narrative has neither a summary section nor a long line.
pub const SUMMARY_FALLBACK: &str = "See full analysis for details.";

const SUMMARY_MARKER: &str = "executive summary";

/// Number of lines after the marker that are considered.
const SUMMARY_WINDOW: usize = 5;

/// A line longer than this (trimmed, in characters) is a usable fallback.
const MIN_FALLBACK_CHARS: usize = 50;

/// Pure extractor of a short summary.
pub struct SummaryExtractor;

impl SummaryExtractor {
    /// Extracts the summary.
    ///
    /// For each line containing "executive summary" (any case), the
    /// non-empty, non-header lines among the next five are joined with
    /// single spaces. The first marker that yields text wins. Without one,
    /// the first line longer than 50 characters is used, and failing that
    /// a fixed fallback.
    pub fn extract(narrative: &str) -> String {
        let lines: Vec<&str> = narrative.lines().collect();

        for (index, line) in lines.iter().enumerate() {
            if !line.to_lowercase().contains(SUMMARY_MARKER) {
                continue;
            }
            let collected: Vec<&str> = lines
                .iter()
                .skip(index + 1)
                .take(SUMMARY_WINDOW)
                .map(|l| l.trim())
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .collect();
            if !collected.is_empty() {
                return collected.join(" ");
            }
        }

        lines
            .iter()
            .map(|l| l.trim())
            .find(|l| l.chars().count() > MIN_FALLBACK_CHARS)
            .map(str::to_string)
            .unwrap_or_else(|| SUMMARY_FALLBACK.to_string())
    }
}
