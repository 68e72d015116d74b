use log::{debug, trace};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;

use super::{ver, PrimeError};

/// Random odd integer of exactly `bits` bits: the top and the bottom bits
/// are always set. Not necessarily prime.
///
/// Panics if `bits` is zero.
pub fn prime_candidate(bits: u64) -> BigUint {
    prime_candidate_with(&mut rand::thread_rng(), bits)
}

pub fn prime_candidate_with<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    assert!(bits > 0, "prime candidate must have at least one bit");
    let candidate = rng.gen_biguint(bits);
    candidate | (BigUint::one() << (bits - 1)) | BigUint::one()
}

/// Generates a prime of the given size.
///
/// Samples candidates until one is prime and never gives up: with `bits == 1`
/// the only candidate is 1, so this loops forever. Use [`new_prime_bounded`]
/// to put a cap on the search.
pub fn new_prime(bits: u64) -> BigUint {
    new_prime_with(&mut rand::thread_rng(), bits)
}

pub fn new_prime_with<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    let mut attempt = 0u64;
    loop {
        attempt += 1;
        if let Some(p) = try_candidate(rng, bits, attempt) {
            return p;
        }
    }
}

/// Same as [`new_prime`] but fails after `max_attempts` rejected candidates.
pub fn new_prime_bounded(bits: u64, max_attempts: u64) -> Result<BigUint, PrimeError> {
    new_prime_bounded_with(&mut rand::thread_rng(), bits, max_attempts)
}

pub fn new_prime_bounded_with<R: Rng + ?Sized>(
    rng: &mut R,
    bits: u64,
    max_attempts: u64,
) -> Result<BigUint, PrimeError> {
    for attempt in 1..=max_attempts {
        if let Some(p) = try_candidate(rng, bits, attempt) {
            return Ok(p);
        }
    }
    Err(PrimeError::Exhausted {
        bits,
        attempts: max_attempts,
    })
}

fn try_candidate<R: Rng + ?Sized>(rng: &mut R, bits: u64, attempt: u64) -> Option<BigUint> {
    let candidate = prime_candidate_with(rng, bits);
    if ver::is_prime(&candidate) {
        debug!("found {}-bit prime {} after {} attempts", bits, candidate, attempt);
        Some(candidate)
    } else {
        trace!("rejected candidate {}", candidate);
        None
    }
}
