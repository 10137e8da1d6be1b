// RSA Secret Recovery
// Derives the private exponent d from the factored modulus and the public exponent e

use std::time::{Duration, Instant};

use num_traits::ToPrimitive;
use thiserror::Error;

use super::primes::{factor, factor_until, PrimeFactors, SearchTimeout};
use crate::config::CrackerConfig;

/// Key material recovered from a public key (n, e)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaSecret {
    pub n: u64, // Modulus
    pub e: u64, // Public exponent
    pub p: u64, // Larger-scan prime factor
    pub q: u64, // Descending-scan prime factor
    pub d: u64, // Private exponent
}

/// Reasons key recovery can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CrackError {
    #[error("n = {0} is not a product of 2 primes")]
    NotSemiprime(u64),
    #[error("no secret found for e = {0}")]
    NoSecret(u64),
    #[error("factorization timed out after {0:?}")]
    Timeout(Duration),
}

/// Find the private exponent d with d * e = 1 mod (p-1)(q-1)
///
/// Searches k = 1, 2, ... while k < n for the first k where
/// k * (p-1) * (q-1) + 1 is divisible by e, and returns the quotient.
/// The bound on k is a cutoff, not a guarantee: a solvable key whose
/// smallest k reaches n is still reported as `None`.
pub fn derive_private_exponent(p: u64, q: u64, e: u64, n: u64) -> Option<u64> {
    if e == 0 || p == 0 || q == 0 {
        return None;
    }

    let totient = (p as u128 - 1) * (q as u128 - 1);
    let e = e as u128;

    for k in 1..n as u128 {
        let candidate = k * totient + 1;
        if candidate % e == 0 {
            return (candidate / e).to_u64();
        }
    }

    None
}

/// Factor n and derive d, honouring the configured factorization timeout
pub fn crack(n: u64, e: u64, config: &CrackerConfig) -> Result<RsaSecret, CrackError> {
    let factors = match config.factor_timeout {
        Some(timeout) => factor_until(n, Instant::now() + timeout)
            .map_err(|SearchTimeout| CrackError::Timeout(timeout))?,
        None => factor(n),
    };

    let PrimeFactors { p, q } = factors.ok_or(CrackError::NotSemiprime(n))?;
    let d = derive_private_exponent(p, q, e, n).ok_or(CrackError::NoSecret(e))?;

    Ok(RsaSecret { n, e, p, q, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::decrypt::mod_pow;
    use crate::rsa::primes::is_prime;

    fn smallest_k_reference(p: u64, q: u64, e: u64) -> Option<u64> {
        let totient = (p - 1) * (q - 1);
        (1..p * q)
            .find(|k| (k * totient + 1) % e == 0)
            .map(|k| (k * totient + 1) / e)
    }

    #[test]
    fn test_derive_example_key() {
        // (p-1)(q-1) = 3016, k = 2 gives (2 * 3016 + 1) / 3
        assert_eq!(derive_private_exponent(59, 53, 3, 3127), Some(2011));
    }

    #[test]
    fn test_derive_is_inverse_mod_totient() {
        let d = derive_private_exponent(139, 151, 7, 20_989).unwrap();
        assert_eq!((d as u128 * 7) % (138 * 150), 1);
    }

    #[test]
    fn test_derive_returns_smallest_k() {
        let primes: Vec<u64> = (3..60).filter(|&i| is_prime(i)).collect();
        for &p in &primes {
            for &q in &primes {
                for e in [3, 5, 7, 11, 13, 17] {
                    assert_eq!(
                        derive_private_exponent(p, q, e, p * q),
                        smallest_k_reference(p, q, e),
                        "p = {}, q = {}, e = {}",
                        p,
                        q,
                        e
                    );
                }
            }
        }
    }

    #[test]
    fn test_derive_without_solution() {
        // the totient is even, so k * totient + 1 is never divisible by 2
        assert_eq!(derive_private_exponent(59, 53, 2, 3127), None);
        assert_eq!(derive_private_exponent(59, 53, 0, 3127), None);
    }

    #[test]
    fn test_derive_search_bound_is_exclusive() {
        // with n = 2 only k = 1 is tried
        assert_eq!(derive_private_exponent(59, 53, 3, 2), None);
        assert_eq!(derive_private_exponent(59, 53, 3, 3), Some(2011));
    }

    #[test]
    fn test_crack_example_key() {
        let secret = crack(3127, 3, &CrackerConfig::default()).unwrap();
        assert_eq!(secret, RsaSecret { n: 3127, e: 3, p: 59, q: 53, d: 2011 });
    }

    #[test]
    fn test_crack_round_trip() {
        let secret = crack(3127, 3, &CrackerConfig::default()).unwrap();
        for m in 0..secret.n {
            let c = mod_pow(m, secret.e, secret.n);
            assert_eq!(mod_pow(c, secret.d, secret.n), m);
        }
    }

    #[test]
    fn test_crack_not_semiprime() {
        assert_eq!(
            crack(100, 3, &CrackerConfig::default()),
            Err(CrackError::NotSemiprime(100))
        );
    }

    #[test]
    fn test_crack_no_secret() {
        assert_eq!(
            crack(3127, 2, &CrackerConfig::default()),
            Err(CrackError::NoSecret(2))
        );
    }

    #[test]
    fn test_crack_with_generous_timeout() {
        let config = CrackerConfig::default().with_factor_timeout(Duration::from_secs(60));
        assert_eq!(crack(3127, 3, &config).unwrap().d, 2011);
    }

    #[test]
    fn test_crack_timeout() {
        let config = CrackerConfig::default().with_factor_timeout(Duration::ZERO);
        assert_eq!(crack(3127, 3, &config), Err(CrackError::Timeout(Duration::ZERO)));
    }
}
