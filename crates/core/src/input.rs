//! Reading saved pages and drafts.
//!
//! Pages are fetched by other tools; this crate only reads what was saved to
//! disk or piped in.

use crate::{BlockportError, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use url::Url;

/// Marker for "read from standard input".
pub const STDIN_MARKER: &str = "-";

/// Reads content from a local file.
///
/// # Errors
///
/// Returns [`BlockportError::FileNotFound`] if the file doesn't exist.
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        Err(BlockportError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(BlockportError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Reads `source`, treating [`STDIN_MARKER`] as standard input.
pub fn read_input(source: &str) -> Result<String> {
    if source == STDIN_MARKER { read_stdin() } else { read_file(Path::new(source)) }
}

/// Parse the page URL a draft is attributed to.
///
/// Only `http` and `https` URLs are accepted.
pub fn parse_source_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| BlockportError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BlockportError::InvalidUrl(format!("{raw}: unsupported scheme {scheme}"))),
    }
}
