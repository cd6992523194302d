use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Split a tab-separated corpus file into rows of raw fields, each paired
/// with its 1-based line number in the file.
///
/// The first non-blank line is a header and is dropped, as are blank lines.
/// Field count is not checked here; `CorpusStore::load_numbered_rows` skips
/// malformed rows.
pub fn read_rows(text: &str) -> Vec<(usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1)
        .map(|(i, line)| (i + 1, line.split('\t').collect()))
        .collect()
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading corpus {}", path.display()))
}

#[cfg(feature = "network")]
pub fn fetch_url(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("fetching corpus from {url}"))?;
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("fetching corpus from {url} failed with status {status}");
    }
    response
        .text()
        .with_context(|| format!("reading corpus body from {url}"))
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(url: &str) -> Result<String> {
    anyhow::bail!("cannot fetch {url}: built without the `network` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_blank_lines_dropped() {
        let text = "id\tword\n1\ta\tb\n\n2\tc\n";
        let rows = read_rows(text);
        assert_eq!(rows, vec![(2, vec!["1", "a", "b"]), (4, vec!["2", "c"])]);
    }

    #[test]
    fn test_crlf_lines() {
        let text = "header\r\n1\tx\r\n";
        let rows = read_rows(text);
        assert_eq!(rows, vec![(2, vec!["1", "x"])]);
    }

    #[test]
    fn test_trailing_empty_field_on_last_line_survives() {
        let text = "h\n1\ta\t\n2\tb\t\n";
        let rows = read_rows(text);
        assert_eq!(rows, vec![(2, vec!["1", "a", ""]), (3, vec!["2", "b", ""])]);
    }

    #[test]
    fn test_line_numbers_count_leading_blank_lines() {
        let text = "\n\nid\tword\n1\ta\n";
        assert_eq!(read_rows(text), vec![(4, vec!["1", "a"])]);
    }

    #[cfg(feature = "network")]
    #[test]
    fn test_fetch_failure_names_the_url() {
        let err = fetch_url("http://127.0.0.1:9/word.csv").unwrap_err();
        assert!(format!("{err:#}").contains("fetching corpus from http://127.0.0.1:9/word.csv"));
    }

    #[test]
    fn test_header_only() {
        assert!(read_rows("id\tword").is_empty());
        assert!(read_rows("").is_empty());
    }
}
