use num_bigint::BigUint;
use num_integer::Roots;
use num_traits::{One, Zero};

/// Trial division by every integer in `2..=floor(sqrt(n))`.
///
/// Only practical for the small bit lengths used by the toy RSA engine.
pub fn is_prime(n: &BigUint) -> bool {
    if n <= &BigUint::one() {
        return false;
    }
    let limit = n.sqrt();
    let mut divisor = BigUint::from(2u32);
    while divisor <= limit {
        if (n % &divisor).is_zero() {
            return false;
        }
        divisor += 1u32;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(n: u64) -> bool {
        is_prime(&BigUint::from(n))
    }

    #[test]
    fn boundaries() {
        assert!(!check(0));
        assert!(!check(1));
        assert!(check(2));
        assert!(check(3));
        assert!(!check(4));
    }

    #[test]
    fn small_numbers() {
        let primes: Vec<u64> = (0..100).filter(|&n| check(n)).collect();
        assert_eq!(
            primes,
            [
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73,
                79, 83, 89, 97
            ]
        );
    }

    #[test]
    fn squares_and_large() {
        assert!(!check(49));
        assert!(!check(121));
        assert!(!check(65_535));
        assert!(check(65_537));
        assert!(check(4_294_967_291));
        assert!(!check(4_294_967_297));
    }
}
