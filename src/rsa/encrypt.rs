// RSA Encryption Implementation
// Textbook (unpadded) encryption of letter-triple codes

use super::convert::{encode_text, ConvertError};
use super::decrypt::mod_pow;

/// Encrypt a single number: m^e mod n
pub fn encrypt_u64(m: u64, e: u64, n: u64) -> u64 {
    mod_pow(m, e, n)
}

/// Encrypt every number in order
pub fn encrypt_numbers(numbers: &[u64], e: u64, n: u64) -> Vec<u64> {
    numbers.iter().map(|&m| encrypt_u64(m, e, n)).collect()
}

/// Encode lowercase text as letter triples and encrypt each triple
pub fn encrypt_text(text: &str, e: u64, n: u64) -> Result<Vec<u64>, ConvertError> {
    Ok(encrypt_numbers(&encode_text(text)?, e, n))
}
