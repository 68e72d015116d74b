mod algo;

/// Module dedicated to the fixed-width bit vectors and table permutations
pub mod bits;

/// Module dedicated to the prime number generation and verification
pub mod prime;

/// Module dedicated to the toy RSA - per character public-key encryption
pub mod rsa;

/// Module dedicated to the S-DES toy block cipher
pub mod sdes;
