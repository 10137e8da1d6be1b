//! Textbook RSA cracker for word-sized moduli.
//!
//! Recovers the private exponent of a small public key by trial-division
//! factorization, decrypts numeric ciphertexts with square-and-multiply and
//! decodes the result as base-27 letter triples.

pub mod config;
pub mod rsa;
pub mod ui;
pub mod util;

pub use config::CrackerConfig;
