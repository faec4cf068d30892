use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

#[derive(Debug, thiserror::Error)]
#[error("Failed to read TLE source '{name}' from '{}'", .path.display())]
pub struct SourceError {
    pub name: String,
    pub path: PathBuf,
    #[source]
    pub error: io::Error,
}

/// Where a set of TLE entries comes from
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TleSource {
    File { name: String, path: PathBuf },
    Inline { name: String, text: String },
}

impl fmt::Display for TleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TleSource::File { name, path } => write!(f, "{name} ({})", path.display()),
            TleSource::Inline { name, .. } => write!(f, "{name} (inline)"),
        }
    }
}

impl TleSource {
    /// A file source named after the file stem
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        TleSource::File { name, path }
    }

    pub fn named_file<N: Into<String>, P: Into<PathBuf>>(name: N, path: P) -> Self {
        TleSource::File {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn inline<N: Into<String>, T: Into<String>>(name: N, text: T) -> Self {
        TleSource::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TleSource::File { name, .. } | TleSource::Inline { name, .. } => name,
        }
    }

    pub fn load(&self) -> Result<Cow<'_, str>, SourceError> {
        match self {
            TleSource::File { name, path } => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|error| SourceError {
                    name: name.clone(),
                    path: path.clone(),
                    error,
                }),
            TleSource::Inline { text, .. } => Ok(Cow::Borrowed(text)),
        }
    }
}
