//! Fixed-width bit vectors used by the S-DES engine.
//!
//! Every bit is stored as a separate `u8` holding either 0 or 1, most
//! significant bit first. The width is a const parameter, so handing a
//! 10-bit key to something that wants 8 bits is a type error rather than a
//! runtime surprise.

use std::{
    fmt,
    ops::{BitXor, Index},
    str::FromStr,
};

use thiserror::Error;
use zeroize::Zeroize;

pub type Bits10 = Bits<10>;
pub type Bits8 = Bits<8>;
pub type Bits5 = Bits<5>;
pub type Bits4 = Bits<4>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    #[error("expected {expected} bits, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("invalid bit digit {0:?}")]
    InvalidDigit(char),

    #[error("invalid bit value {0}")]
    InvalidBit(u8),

    #[error("value {value} does not fit in {width} bits")]
    Overflow { value: u32, width: usize },
}

/// Ordered sequence of exactly `N` bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits<const N: usize>([u8; N]);

/// Applies a 1-based permutation table: `out[i] = input[table[i] - 1]`.
///
/// Panics if the table refers to a position outside of `1..=N`.
pub fn permute<T: Copy, const N: usize, const M: usize>(input: &[T; N], table: &[usize; M]) -> [T; M] {
    table.map(|pos| {
        assert!(
            (1..=N).contains(&pos),
            "table position {} is outside of 1..={}",
            pos,
            N
        );
        input[pos - 1]
    })
}

impl<const N: usize> Bits<N> {
    /// Builds the vector from raw bits.
    ///
    /// Panics if any element is not 0 or 1, so it can be used for constants.
    pub const fn from_array(bits: [u8; N]) -> Self {
        let mut i = 0;
        while i < N {
            assert!(bits[i] <= 1, "bit values must be 0 or 1");
            i += 1;
        }
        Self(bits)
    }

    /// Builds the vector from the low `N` bits of `value`, most significant first.
    pub fn from_value(value: u32) -> Result<Self, BitsError> {
        if N < 32 && value >> N != 0 {
            return Err(BitsError::Overflow { value, width: N });
        }
        let mut bits = [0u8; N];
        for (i, bit) in bits.iter_mut().enumerate() {
            let shift = N - 1 - i;
            if shift < 32 {
                *bit = ((value >> shift) & 1) as u8;
            }
        }
        Ok(Self(bits))
    }

    /// Numeric value of the vector, reading the first bit as the most significant.
    ///
    /// Only meaningful for `N <= 32`.
    pub fn value(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
    }

    pub fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    pub fn permute<const M: usize>(&self, table: &[usize; M]) -> Bits<M> {
        Bits(permute(&self.0, table))
    }

    /// Circular left rotation by `shift` positions.
    pub fn rotate_left(mut self, shift: usize) -> Self {
        if N > 0 {
            self.0.rotate_left(shift % N);
        }
        self
    }
}

impl Bits<10> {
    /// Splits into the two 5-bit halves used by the key schedule.
    pub fn split(&self) -> (Bits5, Bits5) {
        let (left, right) = halves(&self.0);
        (Bits(left), Bits(right))
    }

    pub fn join(left: Bits5, right: Bits5) -> Self {
        Bits(concat(&left.0, &right.0))
    }
}

impl Bits<8> {
    /// Splits into the left and right nibbles.
    pub fn split(&self) -> (Bits4, Bits4) {
        let (left, right) = halves(&self.0);
        (Bits(left), Bits(right))
    }

    pub fn join(left: Bits4, right: Bits4) -> Self {
        Bits(concat(&left.0, &right.0))
    }

    pub fn swap_halves(&self) -> Self {
        let (left, right) = self.split();
        Self::join(right, left)
    }
}

fn halves<const A: usize, const H: usize>(bits: &[u8; A]) -> ([u8; H], [u8; H]) {
    assert_eq!(2 * H, A);
    let mut left = [0u8; H];
    let mut right = [0u8; H];
    left.copy_from_slice(&bits[..H]);
    right.copy_from_slice(&bits[H..]);
    (left, right)
}

fn concat<const A: usize, const B: usize, const C: usize>(left: &[u8; A], right: &[u8; B]) -> [u8; C] {
    assert_eq!(A + B, C);
    let mut out = [0u8; C];
    out[..A].copy_from_slice(left);
    out[A..].copy_from_slice(right);
    out
}

impl From<u8> for Bits8 {
    fn from(byte: u8) -> Self {
        Bits(std::array::from_fn(|i| (byte >> (7 - i)) & 1))
    }
}

impl From<Bits8> for u8 {
    fn from(block: Bits8) -> Self {
        block.0.iter().fold(0, |acc, &bit| (acc << 1) | bit)
    }
}

impl<const N: usize> BitXor for Bits<N> {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self {
        for (dst, src) in self.0.iter_mut().zip(rhs.0) {
            *dst ^= src;
        }
        self
    }
}

impl<const N: usize> Index<usize> for Bits<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl<const N: usize> Zeroize for Bits<N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const N: usize> TryFrom<&[u8]> for Bits<N> {
    type Error = BitsError;

    fn try_from(slice: &[u8]) -> Result<Self, BitsError> {
        let bits: [u8; N] = slice.try_into().map_err(|_| BitsError::WrongLength {
            expected: N,
            found: slice.len(),
        })?;
        if let Some(&bad) = bits.iter().find(|&&bit| bit > 1) {
            return Err(BitsError::InvalidBit(bad));
        }
        Ok(Self(bits))
    }
}

impl<const N: usize> FromStr for Bits<N> {
    type Err = BitsError;

    /// Parses strings like `"1010000010"`.
    fn from_str(s: &str) -> Result<Self, BitsError> {
        let found = s.chars().count();
        if found != N {
            return Err(BitsError::WrongLength { expected: N, found });
        }
        let mut bits = [0u8; N];
        for (bit, ch) in bits.iter_mut().zip(s.chars()) {
            *bit = match ch {
                '0' => 0,
                '1' => 1,
                other => return Err(BitsError::InvalidDigit(other)),
            };
        }
        Ok(Self(bits))
    }
}

impl<const N: usize> fmt::Display for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0 {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bits").field(&self.to_string()).finish()
    }
}
