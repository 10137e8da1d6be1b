// RSA Decryption Implementation
// Square-and-multiply exponentiation over u64 moduli, applied to whole ciphertext sequences

use std::thread;

use thiserror::Error;

/// Errors that can occur when setting up decryption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptError {
    #[error("modulus must be positive")]
    ZeroModulus,
}

/// Binary coefficients of an exponent, least significant first,
/// so that d = sum of b_i * 2^i
fn binary_coefficients(mut d: u64) -> Vec<u8> {
    let mut coeffs = Vec::with_capacity(64);
    while d > 0 {
        coeffs.push((d % 2) as u8);
        d /= 2;
    }
    coeffs
}

/// Square-and-multiply over precomputed coefficients
fn square_and_multiply(x: u64, coeffs: &[u8], n: u64) -> u64 {
    let n = n as u128;
    let x = x as u128;
    let mut z: u128 = 1;

    for &bit in coeffs.iter().rev() {
        z = (z * z) % n;
        if bit == 1 {
            z = (z * x) % n;
        }
    }

    z as u64
}

/// Modular exponentiation: x^d mod n
/// Walks the binary digits of d from the most significant one down
///
/// Panics if n is zero, like integer division.
pub fn mod_pow(x: u64, d: u64, n: u64) -> u64 {
    square_and_multiply(x, &binary_coefficients(d), n)
}

/// Decrypts ciphertext numbers for a fixed (n, d)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decryptor {
    n: u64,
    coeffs: Vec<u8>,
}

impl Decryptor {
    pub fn new(n: u64, d: u64) -> Result<Self, DecryptError> {
        if n == 0 {
            return Err(DecryptError::ZeroModulus);
        }
        Ok(Self {
            n,
            coeffs: binary_coefficients(d),
        })
    }

    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// Decrypt a single number: x^d mod n
    pub fn decrypt(&self, x: u64) -> u64 {
        square_and_multiply(x, &self.coeffs, self.n)
    }

    /// Decrypt every number in order
    /// With more than one worker the input is split into contiguous chunks
    /// decrypted on scoped threads; the output keeps the input order.
    pub fn decrypt_all(&self, encrypted: &[u64], workers: usize) -> Vec<u64> {
        if workers <= 1 || encrypted.len() < 2 {
            return encrypted.iter().map(|&x| self.decrypt(x)).collect();
        }

        let chunk_size = encrypted.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = encrypted
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || chunk.iter().map(|&x| self.decrypt(x)).collect::<Vec<u64>>())
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(decrypted) => decrypted,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::Rng;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(mod_pow(3, 5, 7), 5);
        assert_eq!(mod_pow(2, 10, 1000), 24);
    }

    #[test]
    fn test_mod_pow_edge_exponents() {
        assert_eq!(mod_pow(42, 0, 97), 1);
        assert_eq!(mod_pow(42, 1, 97), 42);
        assert_eq!(mod_pow(0, 5, 97), 0);
        assert_eq!(mod_pow(5, 3, 1), 0);
    }

    #[test]
    fn test_binary_coefficients() {
        assert_eq!(binary_coefficients(0), Vec::<u8>::new());
        assert_eq!(binary_coefficients(6), vec![0, 1, 1]);
        assert_eq!(binary_coefficients(2011), vec![1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_mod_pow_matches_biguint() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let n: u64 = rng.gen_range(2..u64::MAX);
            let x: u64 = rng.gen();
            let d: u64 = rng.gen();
            let expected = BigUint::from(x).modpow(&BigUint::from(d), &BigUint::from(n));
            assert_eq!(BigUint::from(mod_pow(x, d, n)), expected, "{}^{} mod {}", x, d, n);
        }
    }

    #[test]
    fn test_decrypt_example_ciphertext() {
        let decryptor = Decryptor::new(3127, 2011).unwrap();
        let m = decryptor.decrypt(2201);
        assert!(m < 3127);
        assert_eq!(mod_pow(m, 3, 3127), 2201);
    }

    #[test]
    fn test_decrypt_round_trip_all_messages() {
        let decryptor = Decryptor::new(3127, 2011).unwrap();
        for m in 0..3127 {
            assert_eq!(decryptor.decrypt(mod_pow(m, 3, 3127)), m);
        }
    }

    #[test]
    fn test_decrypt_unreduced_ciphertext() {
        let decryptor = Decryptor::new(3127, 2011).unwrap();
        assert_eq!(decryptor.decrypt(2201 + 3127), decryptor.decrypt(2201));
    }

    #[test]
    fn test_zero_modulus_rejected() {
        assert_eq!(Decryptor::new(0, 5), Err(DecryptError::ZeroModulus));
    }

    #[test]
    fn test_decrypt_all_keeps_order() {
        let decryptor = Decryptor::new(3127, 2011).unwrap();
        let encrypted: Vec<u64> = (0..1000).map(|m| mod_pow(m, 3, 3127)).collect();

        let sequential = decryptor.decrypt_all(&encrypted, 1);
        assert_eq!(sequential, (0..1000).collect::<Vec<u64>>());

        for workers in [2, 3, 8, 64] {
            assert_eq!(decryptor.decrypt_all(&encrypted, workers), sequential);
        }
    }

    #[test]
    fn test_decrypt_all_empty() {
        let decryptor = Decryptor::new(3127, 2011).unwrap();
        assert!(decryptor.decrypt_all(&[], 4).is_empty());
    }
}
