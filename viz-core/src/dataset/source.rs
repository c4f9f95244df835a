use std::{fmt, path::PathBuf};

use app_core::string_error::ErrorStringExt;
use serde::{Deserialize, Serialize};

/// Where a dataset comes from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    /// Reads the raw JSON text. Blocking, meant for the backend thread.
    pub fn fetch(&self) -> Result<String, String> {
        log::debug!("fetching dataset from {self}");
        match self {
            DataSource::File(path) => std::fs::read_to_string(path)
                .err_to_string(&format!("could not read dataset file {}", path.display())),
            DataSource::Url(url) => {
                let response = reqwest::blocking::get(url)
                    .and_then(|response| response.error_for_status())
                    .err_to_string(&format!("could not fetch dataset from {url}"))?;
                response
                    .text()
                    .err_to_string(&format!("could not read response body from {url}"))
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_kind() {
        assert_eq!(
            DataSource::parse("https://example.org/coins.json"),
            DataSource::Url("https://example.org/coins.json".into())
        );
        assert_eq!(
            DataSource::parse(" data/coins.json "),
            DataSource::File(PathBuf::from("data/coins.json"))
        );
    }

    #[test]
    fn test_fetch_reads_file_and_reports_missing_file() {
        let path =
            std::env::temp_dir().join(format!("viz-core-source-{}.json", std::process::id()));
        std::fs::write(&path, "[]").unwrap();
        let source = DataSource::File(path.clone());
        assert_eq!(source.fetch().unwrap(), "[]");
        std::fs::remove_file(&path).unwrap();

        let err = source.fetch().unwrap_err();
        assert!(err.starts_with("could not read dataset file"));
    }
}
