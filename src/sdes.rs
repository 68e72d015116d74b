//! S-DES
//! A toy 8-bit block cipher with a 10-bit key. It has the shape of DES in
//! miniature: an initial permutation, two Feistel rounds keyed by subkeys
//! derived from the main key, a half swap between the rounds and the
//! inverse permutation at the end.
//!
//! It is meant for studying how the pieces fit together. It offers no
//! security whatsoever.
//!
//! # Usage
//! ```
//! use edu_primitives::{bits::Bits8, sdes};
//!
//! let plaintext: Bits8 = "10101010".parse().unwrap();
//!
//! let ciphertext = sdes::encrypt_block(&plaintext, &sdes::DEMO_KEY);
//! assert_eq!(ciphertext.to_string(), "00111001");
//!
//! let decrypted = sdes::decrypt_block(&ciphertext, &sdes::DEMO_KEY);
//! assert_eq!(decrypted, plaintext);
//! ```
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bits::{Bits, Bits10, Bits4, Bits8};

/// Key used by the demonstration driver.
pub const DEMO_KEY: Bits10 = Bits::from_array([1, 0, 1, 0, 0, 0, 0, 0, 1, 0]);

/// 10 -> 10 key permutation
pub const P10: [usize; 10] = [3, 5, 2, 7, 4, 10, 1, 9, 8, 6];
/// 10 -> 8 subkey selection
pub const P8: [usize; 8] = [3, 6, 4, 8, 5, 7, 9, 10];
/// Initial permutation
pub const IP: [usize; 8] = [2, 6, 3, 1, 4, 8, 5, 7];
/// Final permutation, the inverse of `IP`
pub const FP: [usize; 8] = [4, 1, 3, 5, 7, 2, 8, 6];
/// 4 -> 8 expansion of the right half
pub const EP: [usize; 8] = [4, 1, 2, 3, 2, 3, 4, 1];
pub const P4: [usize; 4] = [2, 4, 3, 1];

pub type SBox = [[u8; 4]; 4];

pub const S0: SBox = [[1, 0, 3, 2], [3, 2, 1, 0], [0, 2, 1, 3], [3, 1, 3, 2]];
pub const S1: SBox = [[0, 1, 2, 3], [2, 0, 1, 3], [3, 0, 1, 0], [2, 1, 0, 3]];

/// The pair of round keys derived from a 10-bit key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Subkeys {
    k1: Bits8,
    k2: Bits8,
}

impl Subkeys {
    /// Subkey of the first encryption round.
    pub fn k1(&self) -> &Bits8 {
        &self.k1
    }

    /// Subkey of the second encryption round.
    pub fn k2(&self) -> &Bits8 {
        &self.k2
    }
}

/// Derives `K1` and `K2` from the key.
///
/// The halves are rotated by 1 for `K1`, and the already rotated halves are
/// rotated by 2 more for `K2`.
pub fn generate_subkeys(key: &Bits10) -> Subkeys {
    let (left, right) = key.permute(&P10).split();

    let (left, right) = (left.rotate_left(1), right.rotate_left(1));
    let k1 = Bits10::join(left, right).permute(&P8);

    let (left, right) = (left.rotate_left(2), right.rotate_left(2));
    let k2 = Bits10::join(left, right).permute(&P8);

    Subkeys { k1, k2 }
}

fn sbox_output(sbox: &SBox, row: u8, col: u8) -> [u8; 2] {
    let value = sbox[usize::from(row)][usize::from(col)];
    [(value >> 1) & 1, value & 1]
}

/// The round function F applied to the right half of `bits`.
///
/// Only the right nibble of `bits` is read. The result still has to be
/// XORed into the left half, see [`fk`].
pub fn round_function(subkey: &Bits8, bits: &Bits8) -> Bits4 {
    let (_, right) = bits.split();
    let mixed = right.permute(&EP) ^ *subkey;
    let (g0, g1) = mixed.split();

    // row/col selection differs between the two boxes
    let [a0, a1] = sbox_output(&S0, g0[0] << 1 | g0[3], g0[1] << 1 | g0[2]);
    let [b0, b1] = sbox_output(&S1, g1[2] << 1 | g1[3], g1[0] << 1 | g1[1]);

    Bits4::from_array([a0, a1, b0, b1]).permute(&P4)
}

/// One full Feistel round: `(L ^ F(R, K)) || R`.
pub fn fk(subkey: &Bits8, bits: &Bits8) -> Bits8 {
    let (left, right) = bits.split();
    Bits8::join(left ^ round_function(subkey, bits), right)
}

/// S-DES instance with the subkeys of a single key, for encrypting many blocks.
#[derive(Clone)]
pub struct Sdes {
    subkeys: Subkeys,
}

impl Sdes {
    pub fn new(key: &Bits10) -> Self {
        Self {
            subkeys: generate_subkeys(key),
        }
    }

    /// Get a reference to the derived subkeys.
    pub fn subkeys(&self) -> &Subkeys {
        &self.subkeys
    }

    pub fn encrypt(&self, block: &Bits8) -> Bits8 {
        feistel(block, &self.subkeys.k1, &self.subkeys.k2)
    }

    /// Decryption is encryption with the subkeys in reverse order.
    pub fn decrypt(&self, block: &Bits8) -> Bits8 {
        feistel(block, &self.subkeys.k2, &self.subkeys.k1)
    }

    /// Encrypts every byte independently (ECB).
    pub fn encrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .map(|&byte| u8::from(self.encrypt(&Bits8::from(byte))))
            .collect()
    }

    pub fn decrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .map(|&byte| u8::from(self.decrypt(&Bits8::from(byte))))
            .collect()
    }
}

fn feistel(block: &Bits8, first: &Bits8, second: &Bits8) -> Bits8 {
    let bits = block.permute(&IP);
    let bits = fk(first, &bits).swap_halves();
    fk(second, &bits).permute(&FP)
}

/// Encrypts a single block under `key`.
pub fn encrypt_block(plaintext: &Bits8, key: &Bits10) -> Bits8 {
    Sdes::new(key).encrypt(plaintext)
}

/// Decrypts a single block under `key`.
pub fn decrypt_block(ciphertext: &Bits8, key: &Bits10) -> Bits8 {
    Sdes::new(key).decrypt(ciphertext)
}
