use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    error::{HzipError, Result},
    utils::paths,
};

/// Codec settings, usually read from a Java-style `.properties` file:
///
/// ```text
/// extension = hzip
/// output_dir = /tmp/out
/// overwrite = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecProperties {
    /// Extension given to compressed files, without the leading dot
    pub extension: String,
    /// Where outputs go; `None` means next to the input
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
}

impl Default for CodecProperties {
    fn default() -> Self {
        Self {
            extension: "hzip".to_string(),
            output_dir: None,
            overwrite: true,
        }
    }
}

impl CodecProperties {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| HzipError::SourceRead { path: path.to_path_buf(), source })?;
        let map = java_properties::read(BufReader::new(file))
            .map_err(|e| HzipError::Config(format!("failed parsing {}: {}", path.display(), e)))?;

        Self::try_from(map)
    }

    pub fn set_extension(mut self, extension: &str) -> Result<Self> {
        self.extension = normalize_extension(extension)?;
        Ok(self)
    }

    pub fn set_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.output_dir = dir;
        }
        self
    }

    pub fn set_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Directory the output for `input` is written to.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| paths::directory(input))
    }
}

fn normalize_extension(extension: &str) -> Result<String> {
    let extension = extension.trim().trim_start_matches('.');

    if extension.is_empty() || extension.contains(|c: char| matches!(c, '/' | '\\' | '.')) {
        return Err(HzipError::Config(format!("invalid extension {:?}", extension)));
    }

    Ok(extension.to_string())
}

impl TryFrom<HashMap<String, String>> for CodecProperties {
    type Error = HzipError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let mut props = CodecProperties::default();

        if let Some(extension) = value.get("extension") {
            props.extension = normalize_extension(extension)?;
        }
        if let Some(output_dir) = value.get("output_dir") {
            let output_dir = output_dir.trim();
            if !output_dir.is_empty() {
                props.output_dir = Some(PathBuf::from(output_dir));
            }
        }
        if let Some(overwrite) = value.get("overwrite") {
            props.overwrite = overwrite
                .trim()
                .parse()
                .map_err(|_| HzipError::Config(format!("overwrite must be true or false, got {:?}", overwrite)))?;
        }

        Ok(props)
    }
}
