// File Operations for RSA Decryption
// Reads ciphertext files of whitespace-separated decimal numbers

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

/// Message reported for files holding anything but numbers and whitespace
pub const INVALID_CONTENT_MESSAGE: &str =
    "Invalid file content, file must only contain numbers, spaces and line breaks!";

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("{}", INVALID_CONTENT_MESSAGE)]
    InvalidContent,
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Parse numbers separated by any run of spaces, tabs or line breaks
/// Fails as a whole on the first token that is not a non-negative decimal number
pub fn parse_numbers(content: &str) -> FileResult<Vec<u64>> {
    content
        .split_whitespace()
        .map(|token| token.parse::<u64>().map_err(|_| FileError::InvalidContent))
        .collect()
}

/// Read a ciphertext file into its sequence of numbers
pub fn import_numbers(path: &Path) -> FileResult<Vec<u64>> {
    let data = read_file(path)?;
    let content = String::from_utf8(data).map_err(|_| FileError::InvalidContent)?;
    parse_numbers(&content)
}
