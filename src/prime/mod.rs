use thiserror::Error;

/// Generation of random primes of a given bit length
pub mod gen;

/// Primality verification
pub mod ver;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimeError {
    #[error("no {bits}-bit prime found in {attempts} attempts")]
    Exhausted { bits: u64, attempts: u64 },
}
