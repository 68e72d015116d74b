//! Toy RSA
//! Keys are built from two small random primes, and every character of a
//! message is encrypted on its own as `code^e mod n`. There is no padding,
//! so equal characters give equal ciphertexts. Only good for demonstrating
//! how the numbers work.
//!
//! # Usage
//! ```
//! use edu_primitives::rsa::{self, KeyPair};
//! use num_bigint::BigUint;
//!
//! // random 8-bit primes, like the demo does
//! let random_keys = rsa::generate_keypair(8).unwrap();
//! assert!(random_keys.public().n() > &BigUint::from(0x7fu32));
//!
//! let keys = KeyPair::from_primes(&BigUint::from(61u32), &BigUint::from(53u32)).unwrap();
//! let ciphertext = rsa::encrypt_message(keys.public(), "HELLO").unwrap();
//! let plaintext = rsa::decrypt_message(keys.private(), &ciphertext).unwrap();
//!
//! assert_eq!(plaintext, "HELLO");
//! ```
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use rand::Rng;
use thiserror::Error;

use crate::{
    algo,
    prime::{gen, ver, PrimeError},
};

/// Smallest accepted prime size. A 1-bit candidate can never be prime.
const MIN_PRIME_BITS: u64 = 2;
/// Trial division stops being practical above this.
const MAX_PRIME_BITS: u64 = 32;

/// Starting point of the public exponent search
const EXP: u64 = 65537;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RsaError {
    #[error("value is not smaller than the modulus")]
    OutOfRange,

    #[error("character {ch:?} does not fit below the modulus {n}")]
    CharOutOfRange { ch: char, n: BigUint },

    #[error("decrypted value {0} is not a character")]
    InvalidCodePoint(BigUint),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RsaGenError {
    #[error("prime size is too small")]
    KeyTooSmall,

    #[error("prime size is too big")]
    KeyTooBig,

    #[error("{0} is not a prime")]
    NotPrime(BigUint),

    #[error("public exponent has no inverse modulo the totient")]
    NoInverse,

    #[error(transparent)]
    Prime(#[from] PrimeError),
}

/// Rsa private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivate {
    d: BigUint,
    n: BigUint,
}

/// Rsa public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublic {
    e: BigUint,
    n: BigUint,
}

/// One integer per encrypted character, each below the modulus.
pub type Ciphertext = Vec<BigUint>;

#[derive(Debug, Clone)]
pub struct KeyPair {
    public: RsaPublic,
    private: RsaPrivate,
}

/// Parameters of [`generate_keypair_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Size of each of the two primes
    pub prime_bits: u64,
    /// Cap on the candidates sampled per prime, `None` searches forever
    pub max_prime_attempts: Option<u64>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_bits: 8,
            max_prime_attempts: None,
        }
    }
}

impl RsaPrivate {
    pub fn decrypt_raw(&self, num: &BigUint) -> Result<BigUint, RsaError> {
        if num >= &self.n {
            return Err(RsaError::OutOfRange);
        }
        Ok(num.modpow(&self.d, &self.n))
    }

    /// Get a reference to the rsa private's n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Get a reference to the rsa private's d.
    pub fn d(&self) -> &BigUint {
        &self.d
    }
}

impl RsaPublic {
    pub fn encrypt_raw(&self, num: &BigUint) -> Result<BigUint, RsaError> {
        if num >= &self.n {
            return Err(RsaError::OutOfRange);
        }
        Ok(num.modpow(&self.e, &self.n))
    }

    /// Get a reference to the rsa public's e.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Get a reference to the rsa public's n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

impl KeyPair {
    /// Derives the keys from two primes. `p` and `q` may be equal.
    ///
    /// `e` is the smallest odd number from 65537 upwards that is coprime
    /// with `(p - 1)(q - 1)`, and `d` is its inverse modulo that.
    #[allow(clippy::many_single_char_names)]
    pub fn from_primes(p: &BigUint, q: &BigUint) -> Result<Self, RsaGenError> {
        for prime in [p, q] {
            if !ver::is_prime(prime) {
                return Err(RsaGenError::NotPrime(prime.clone()));
            }
        }
        let n = p * q;
        let totient = (p - 1u32) * (q - 1u32);
        let e = public_exponent(&totient);
        let d = algo::invmod(&e, &totient).ok_or(RsaGenError::NoInverse)?;
        debug!("derived keypair: e = {}, n = {} ({} bits)", e, n, n.bits());

        Ok(Self {
            public: RsaPublic { e, n: n.clone() },
            private: RsaPrivate { d, n },
        })
    }

    pub fn public(&self) -> &RsaPublic {
        &self.public
    }

    pub fn private(&self) -> &RsaPrivate {
        &self.private
    }

    pub fn into_parts(self) -> (RsaPublic, RsaPrivate) {
        (self.public, self.private)
    }
}

fn public_exponent(totient: &BigUint) -> BigUint {
    let mut e = BigUint::from(EXP);
    while !algo::gcd(&e, totient).is_one() {
        trace!("public exponent {} shares a factor with {}", e, totient);
        e += 2u32;
    }
    e
}

/// Generates a key pair from two `bits`-sized primes, searching for them
/// without an attempt limit.
///
/// The two primes are sampled independently and can come out equal. The
/// totient is then not the group order of `n`, and messages encrypted with
/// such a key generally do not decrypt back.
pub fn generate_keypair(bits: u64) -> Result<KeyPair, RsaGenError> {
    let config = KeyGenConfig {
        prime_bits: bits,
        ..KeyGenConfig::default()
    };
    generate_keypair_with(&mut rand::thread_rng(), &config)
}

pub fn generate_keypair_with<R: Rng + ?Sized>(
    rng: &mut R,
    config: &KeyGenConfig,
) -> Result<KeyPair, RsaGenError> {
    let bits = config.prime_bits;
    if bits < MIN_PRIME_BITS {
        return Err(RsaGenError::KeyTooSmall);
    }
    if bits > MAX_PRIME_BITS {
        return Err(RsaGenError::KeyTooBig);
    }

    let mut gen_prime = || match config.max_prime_attempts {
        Some(max) => gen::new_prime_bounded_with(&mut *rng, bits, max),
        None => Ok(gen::new_prime_with(&mut *rng, bits)),
    };
    let p = gen_prime()?;
    let q = gen_prime()?;
    KeyPair::from_primes(&p, &q)
}

/// Encrypts every character of `plaintext` separately.
///
/// Fails with [`RsaError::CharOutOfRange`] instead of wrapping around when a
/// character code is not below `n`.
pub fn encrypt_message(public: &RsaPublic, plaintext: &str) -> Result<Ciphertext, RsaError> {
    plaintext
        .chars()
        .map(|ch| {
            public
                .encrypt_raw(&BigUint::from(u32::from(ch)))
                .map_err(|_| RsaError::CharOutOfRange {
                    ch,
                    n: public.n.clone(),
                })
        })
        .collect()
}

pub fn decrypt_message(private: &RsaPrivate, ciphertext: &[BigUint]) -> Result<String, RsaError> {
    ciphertext
        .iter()
        .map(|c| {
            let m = private.decrypt_raw(c)?;
            m.to_u32()
                .and_then(char::from_u32)
                .ok_or(RsaError::InvalidCodePoint(m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    /// Recovers p and q from a small modulus.
    fn factor(n: &BigUint) -> (BigUint, BigUint) {
        let mut p = big(2);
        while n % &p != big(0) {
            p += 1u32;
        }
        let q = n / &p;
        (p, q)
    }

    fn distinct_primes(rng: &mut StdRng, bits: u64) -> (BigUint, BigUint) {
        let p = gen::new_prime_with(rng, bits);
        loop {
            let q = gen::new_prime_with(rng, bits);
            if p != q {
                break (p, q);
            }
        }
    }

    #[test]
    fn textbook_keys() {
        let keys = KeyPair::from_primes(&big(61), &big(53)).unwrap();
        assert_eq!(keys.public().n(), &big(3233));
        assert_eq!(keys.public().e(), &big(65537));
        assert_eq!(keys.private().d(), &big(2753));

        assert_eq!(keys.public().encrypt_raw(&big(65)).unwrap(), big(2790));
        assert_eq!(keys.private().decrypt_raw(&big(2790)).unwrap(), big(65));
    }

    #[test]
    fn exponent_skips_shared_factors() {
        // 65537 divides the totient here, so the search must move on
        let p = big(917_519); // 14 * 65537 + 1
        assert!(ver::is_prime(&p));
        let keys = KeyPair::from_primes(&p, &big(3)).unwrap();
        assert_eq!(keys.public().e(), &big(65539));
    }

    #[test]
    fn rejects_composites() {
        assert_eq!(
            KeyPair::from_primes(&big(15), &big(7)).unwrap_err(),
            RsaGenError::NotPrime(big(15))
        );
        assert_eq!(
            KeyPair::from_primes(&big(7), &big(1)).unwrap_err(),
            RsaGenError::NotPrime(big(1))
        );
    }

    #[test]
    fn keypair_is_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let keys = generate_keypair_with(&mut rng, &KeyGenConfig::default()).unwrap();
            let (p, q) = factor(keys.public().n());
            assert!(ver::is_prime(&p) && ver::is_prime(&q));
            assert_eq!(p.bits(), 8);
            assert_eq!(q.bits(), 8);

            let totient = (&p - 1u32) * (&q - 1u32);
            let (e, d) = (keys.public().e(), keys.private().d());
            assert_eq!(algo::gcd(e, &totient), big(1));
            assert_eq!((e * d) % &totient, big(1));
            assert!(e >= &big(EXP) && e.bit(0));
            assert_eq!(keys.public().n(), keys.private().n());
        }
    }

    #[test]
    fn size_limits() {
        assert_eq!(generate_keypair(0).unwrap_err(), RsaGenError::KeyTooSmall);
        assert_eq!(generate_keypair(1).unwrap_err(), RsaGenError::KeyTooSmall);
        assert_eq!(generate_keypair(33).unwrap_err(), RsaGenError::KeyTooBig);
        generate_keypair(2).unwrap();
    }

    #[test]
    fn bounded_generation() {
        let config = KeyGenConfig {
            prime_bits: 8,
            max_prime_attempts: Some(0),
        };
        let err = generate_keypair_with(&mut rand::thread_rng(), &config).unwrap_err();
        assert_eq!(
            err,
            RsaGenError::Prime(PrimeError::Exhausted {
                bits: 8,
                attempts: 0
            })
        );

        let config = KeyGenConfig {
            prime_bits: 12,
            max_prime_attempts: Some(100_000),
        };
        generate_keypair_with(&mut rand::thread_rng(), &config).unwrap();
    }

    #[test]
    fn enc_dec_message() {
        let mut rng = StdRng::seed_from_u64(3);
        for bits in [8, 10, 16] {
            let (p, q) = distinct_primes(&mut rng, bits);
            let keys = KeyPair::from_primes(&p, &q).unwrap();

            let msg = "HELLO, it was me who ate the cake";
            let ciphertext = encrypt_message(keys.public(), msg).unwrap();
            assert_eq!(ciphertext.len(), msg.chars().count());
            assert!(ciphertext.iter().all(|c| c < keys.public().n()));

            let plaintext = decrypt_message(keys.private(), &ciphertext).unwrap();
            assert_eq!(plaintext, msg);
        }
    }

    #[test]
    fn enc_dec_non_ascii() {
        let keys = KeyPair::from_primes(&big(65_537), &big(65_539)).unwrap();
        let msg = "żółw 🐢";
        let ciphertext = encrypt_message(keys.public(), msg).unwrap();
        assert_eq!(decrypt_message(keys.private(), &ciphertext).unwrap(), msg);
    }

    #[test]
    fn empty_message() {
        let keys = KeyPair::from_primes(&big(61), &big(53)).unwrap();
        let ciphertext = encrypt_message(keys.public(), "").unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(decrypt_message(keys.private(), &ciphertext).unwrap(), "");
    }

    #[test]
    fn char_out_of_range() {
        // n = 15
        let keys = KeyPair::from_primes(&big(3), &big(5)).unwrap();
        assert_eq!(
            encrypt_message(keys.public(), "A").unwrap_err(),
            RsaError::CharOutOfRange {
                ch: 'A',
                n: big(15)
            }
        );
    }

    #[test]
    fn ciphertext_out_of_range() {
        let keys = KeyPair::from_primes(&big(61), &big(53)).unwrap();
        assert_eq!(
            decrypt_message(keys.private(), &[big(3233)]).unwrap_err(),
            RsaError::OutOfRange
        );
    }

    #[test]
    fn invalid_code_point() {
        let keys = KeyPair::from_primes(&big(65_537), &big(65_539)).unwrap();
        // a surrogate is not a char
        let c = keys.public().encrypt_raw(&big(0xD800)).unwrap();
        assert_eq!(
            decrypt_message(keys.private(), &[c]).unwrap_err(),
            RsaError::InvalidCodePoint(big(0xD800))
        );
    }
}
