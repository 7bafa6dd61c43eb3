// Input acquisition: the paste body comes from a named file or from
// standard input and is read fully into memory before anything is sent.

use crate::error::UploadError;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// No path, or `-`, means standard input.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }

    /// Read the whole input. `stdin` is only consulted for `InputSource::Stdin`.
    pub fn read_with<R: Read>(&self, stdin: R) -> Result<Vec<u8>, UploadError> {
        let res = match self {
            InputSource::Stdin => read_all(stdin),
            InputSource::File(path) => std::fs::read(path),
        };
        res.map_err(|source| UploadError::InputRead {
            origin: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}
