// Letter-Triple Conversion
// Maps numbers s = a_2 * 27^2 + a_1 * 27 + a_0 to three lowercase letters (a = 1, ..., z = 26) and back

use num_integer::Integer;
use thiserror::Error;

/// Place values of the three letters, most significant first
const PLACE_VALUES: [u64; 3] = [27 * 27, 27, 1];

/// Letters are coded as their offset from this code point ('a' - 1)
const LETTER_OFFSET: u64 = 96;

/// Errors from encoding text into letter triples
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("text length {0} is not a multiple of 3")]
    InvalidLength(usize),
    #[error("invalid character {0:?}, only lowercase letters a-z can be encoded")]
    InvalidCharacter(char),
}

/// Split a number into its three letter codes
fn digits(number: u64) -> [u64; 3] {
    let mut rest = number;
    PLACE_VALUES.map(|place| {
        let (digit, remainder) = rest.div_rem(&place);
        rest = remainder;
        digit
    })
}

/// Letter code to char; codes outside 1..=26 pass through unchecked
fn letter(code: u64) -> char {
    code.checked_add(LETTER_OFFSET)
        .and_then(|point| u32::try_from(point).ok())
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Convert a number to the 3 chars it encodes
pub fn decode(number: u64) -> String {
    digits(number).into_iter().map(letter).collect()
}

/// Convert decrypted numbers to plain text
pub fn plain_text(decrypted: &[u64]) -> String {
    decrypted.iter().map(|&number| decode(number)).collect()
}

/// Encode lowercase text as one number per 3 letters
pub fn encode_text(text: &str) -> Result<Vec<u64>, ConvertError> {
    let codes = text
        .chars()
        .map(|c| match c {
            'a'..='z' => Ok(c as u64 - LETTER_OFFSET),
            _ => Err(ConvertError::InvalidCharacter(c)),
        })
        .collect::<Result<Vec<u64>, _>>()?;

    if codes.len() % 3 != 0 {
        return Err(ConvertError::InvalidLength(codes.len()));
    }

    Ok(codes
        .chunks(3)
        .map(|triple| triple.iter().zip(PLACE_VALUES).map(|(code, place)| code * place).sum())
        .collect())
}
