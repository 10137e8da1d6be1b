// RSA Modulus Factorization
// Trial-division primality test and brute-force search for the two prime factors of n

use std::time::Instant;

use num_integer::Roots;
use thiserror::Error;

/// Number of inner-scan steps between two deadline checks
const DEADLINE_CHECK_INTERVAL: u64 = 1 << 16;

/// The two prime factors of a modulus, n = p * q
///
/// `q` is found by the descending scan from the square root of n,
/// `p` by the ascending scan for the matching cofactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeFactors {
    pub p: u64,
    pub q: u64,
}

impl PrimeFactors {
    /// Euler's totient (p-1)(q-1)
    pub fn totient(&self) -> u128 {
        (self.p as u128 - 1) * (self.q as u128 - 1)
    }

    /// The modulus these factors multiply to
    pub fn modulus(&self) -> u128 {
        self.p as u128 * self.q as u128
    }
}

/// The factor search ran past its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("factorization search exceeded its deadline")]
pub struct SearchTimeout;

/// Trial-division primality test
/// Tries every divisor from 2 up to and including floor(sqrt(number))
pub fn is_prime(number: u64) -> bool {
    if number < 2 {
        return false;
    }
    let root = number.sqrt();
    (2..=root).all(|i| number % i != 0)
}

/// Factor n into two primes
/// Returns None if n is not a product of two primes
pub fn factor(n: u64) -> Option<PrimeFactors> {
    // without a deadline the search never times out
    search(n, None).unwrap_or(None)
}

/// Factor n into two primes, giving up once `deadline` has passed
pub fn factor_until(n: u64, deadline: Instant) -> Result<Option<PrimeFactors>, SearchTimeout> {
    search(n, Some(deadline))
}

fn search(n: u64, deadline: Option<Instant>) -> Result<Option<PrimeFactors>, SearchTimeout> {
    let root = n.sqrt();

    for q in (2..=root).rev() {
        check_deadline(deadline)?;
        if !is_prime(q) {
            continue;
        }
        if let Some(p) = find_larger_factor(n, q, deadline)? {
            return Ok(Some(PrimeFactors { p, q }));
        }
    }

    Ok(None)
}

/// Ascending scan for the prime i with q * i = n
/// Candidates past n / q can never match, so the scan ends there instead of at n
fn find_larger_factor(n: u64, q: u64, deadline: Option<Instant>) -> Result<Option<u64>, SearchTimeout> {
    let n_wide = n as u128;
    let q_wide = q as u128;

    let mut i = 2u64;
    while i <= n && q_wide * i as u128 <= n_wide {
        if q_wide * i as u128 == n_wide && is_prime(i) {
            return Ok(Some(i));
        }
        if i % DEADLINE_CHECK_INTERVAL == 0 {
            check_deadline(deadline)?;
        }
        i += 1;
    }

    Ok(None)
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), SearchTimeout> {
    match deadline {
        Some(limit) if Instant::now() >= limit => Err(SearchTimeout),
        _ => Ok(()),
    }
}
