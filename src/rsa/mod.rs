// RSA Module - Main module file
// Exports factorization, key recovery, encryption, decryption and text conversion

pub mod primes;
pub mod secret;
pub mod encrypt;
pub mod decrypt;
pub mod convert;

pub use primes::{is_prime, factor, factor_until, PrimeFactors, SearchTimeout};
pub use secret::{derive_private_exponent, crack, RsaSecret, CrackError};
pub use encrypt::{encrypt_u64, encrypt_numbers, encrypt_text};
pub use decrypt::{mod_pow, Decryptor, DecryptError};
pub use convert::{decode, plain_text, encode_text, ConvertError};
