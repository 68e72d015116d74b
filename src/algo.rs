use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let (mut a, mut b) = (a.clone(), b.clone());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclidian algorithm. Returns `(g, s, t)` with `a*s + b*t = g`.
#[allow(clippy::many_single_char_names)]
pub fn egcd(a: &BigUint, b: &BigUint) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next);

        let next = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next);

        let next = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next);
    }
    (old_r, old_s, old_t)
}

/// Modular inverse of `a` mod `n`. Returns `None` if the inverse doesn't exist.
pub fn invmod(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }
    let (gcd, inverse, _) = egcd(a, n);
    if gcd.is_one() {
        inverse.mod_floor(&BigInt::from(n.clone())).to_biguint()
    } else {
        None
    }
}
