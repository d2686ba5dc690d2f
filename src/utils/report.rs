use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Size comparison between an uncompressed file and its `.hzip` form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub location: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Compressed size as a percentage of the original; `None` for an empty original
    pub percent_of_original: Option<f64>,
    pub elapsed_ns: u128,
}

impl CompressionReport {
    pub fn new(location: PathBuf, original_size: u64, compressed_size: u64, elapsed_ns: u128) -> Self {
        let percent_of_original =
            (original_size != 0).then(|| compressed_size as f64 / original_size as f64 * 100.0);

        Self { location, original_size, compressed_size, percent_of_original, elapsed_ns }
    }

    /// `false` when compression made the file bigger.
    pub fn is_ok(&self) -> bool {
        self.compressed_size <= self.original_size
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Compression Result]")?;
        writeln!(f, "{:<20}{}", "[Location] ", self.location.display())?;
        writeln!(f, "{:<20}{} bytes", "[Original Size] ", self.original_size)?;
        writeln!(f, "{:<20}{} bytes", "[Compressed Size] ", self.compressed_size)?;

        let status = if self.is_ok() { "[OK]" } else { "[NOT OK]" };
        match self.percent_of_original {
            Some(p) => write!(f, "{:<20}{:.2}% of original size {}", "[Compression %] ", p, status),
            None => write!(f, "{:<20}n/a (empty original) {}", "[Compression %] ", status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_output() {
        let report = CompressionReport::new(PathBuf::from("a.hzip"), 200, 50, 0);

        assert_eq!(report.percent_of_original, Some(25.0));
        assert!(report.is_ok());
        assert!(report.to_string().ends_with("25.00% of original size [OK]"));
    }

    #[test]
    fn test_larger_output() {
        let report = CompressionReport::new(PathBuf::from("a.hzip"), 10, 25, 0);

        assert_eq!(report.percent_of_original, Some(250.0));
        assert!(!report.is_ok());
        assert!(report.to_string().ends_with("250.00% of original size [NOT OK]"));
    }

    #[test]
    fn test_empty_original() {
        let report = CompressionReport::new(PathBuf::from("a.hzip"), 0, 12, 0);

        assert_eq!(report.percent_of_original, None);
        assert!(report.to_string().contains("n/a"));
    }

    #[test]
    fn test_json() {
        let report = CompressionReport::new(PathBuf::from("a.hzip"), 100, 40, 7);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["original_size"], 100);
        assert_eq!(json["compressed_size"], 40);
        assert_eq!(json["percent_of_original"], 40.0);
        assert_eq!(json["location"], "a.hzip");
    }
}
