//! # ABI Word Codec
//!
//! Minimal static-type ABI encoding: every value occupies one 32-byte word,
//! big-endian, addresses left-padded with zeros. Packed encoding (no padding)
//! is provided for hashing.

use crate::errors::AbiError;
use crate::value_objects::{Address, U256};

/// Size of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// One ABI word.
pub type Word = [u8; WORD_SIZE];

/// Left-pads an address into a word.
#[must_use]
pub fn encode_address(address: &Address) -> Word {
    let mut word = [0u8; WORD_SIZE];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Big-endian word of a 256-bit integer.
#[must_use]
pub fn encode_u256(value: U256) -> Word {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

/// Reads an address word, rejecting non-zero padding.
pub fn decode_address(word: &Word) -> Result<Address, AbiError> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(AbiError::DirtyAddressPadding);
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::new(bytes))
}

/// Reads a 256-bit integer word.
#[must_use]
pub fn decode_u256(word: &Word) -> U256 {
    U256::from_big_endian(word)
}

/// Splits `data` into exactly `count` words.
pub fn split_words(data: &[u8], count: usize) -> Result<Vec<Word>, AbiError> {
    let expected = count * WORD_SIZE;
    if data.len() != expected {
        return Err(AbiError::InvalidLength {
            expected,
            actual: data.len(),
        });
    }
    Ok(data
        .chunks_exact(WORD_SIZE)
        .map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

/// Concatenates words into a buffer.
#[must_use]
pub fn join_words(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|w| w.iter().copied()).collect()
}
