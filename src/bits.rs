//! Bit-level primitives: unpacking bytes into single-bit items and HDLC bit stuffing.
//!
//! Bits are carried as one `u8` per item holding `0` or `1`.

use crate::error::{Error, Result};

/// The HDLC flag `0111 1110`, in transmission order.
pub const FLAG: [u8; 8] = [0, 1, 1, 1, 1, 1, 1, 0];

/// Longest run of ones allowed inside a stuffed region.
pub const MAX_ONES_RUN: usize = 5;

/// Expands bytes into bits, least-significant bit first.
///
/// Bit `j` of byte `i` lands at output index `8 * i + j`. Only whole bytes
/// are supported.
pub fn unpack_lsb_first(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    unpack_lsb_first_into(bytes, &mut out);
    out
}

/// Appending variant of [`unpack_lsb_first`].
pub fn unpack_lsb_first_into(bytes: &[u8], out: &mut Vec<u8>) {
    out.reserve(bytes.len() * 8);
    for &byte in bytes {
        for j in 0..8 {
            out.push((byte >> j) & 1);
        }
    }
}

/// Packs LSB-first bits back into bytes.
///
/// The inverse of [`unpack_lsb_first`]. Lengths that are not a multiple of
/// eight are rejected rather than padded.
pub fn pack_lsb_first(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::invalid_frame(format!(
            "bit length {} is not a multiple of 8",
            bits.len()
        )));
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (j, &bit)| acc | ((bit & 1) << j))
        })
        .collect())
}

/// Inserts a `0` after every run of five consecutive `1`s.
///
/// Single left-to-right pass; the inserted zero resets the run counter and
/// is never itself rescanned.
pub fn stuff(bits: &mut Vec<u8>) {
    let mut out = Vec::with_capacity(bits.len() + bits.len() / MAX_ONES_RUN);
    stuff_into(bits, &mut out);
    *bits = out;
}

/// Appending variant of [`stuff`]. Returns the number of inserted zeros.
pub fn stuff_into(bits: &[u8], out: &mut Vec<u8>) -> usize {
    let mut ones = 0;
    let mut inserted = 0;
    for &bit in bits {
        out.push(bit);
        if bit != 0 {
            ones += 1;
            if ones == MAX_ONES_RUN {
                out.push(0);
                ones = 0;
                inserted += 1;
            }
        } else {
            ones = 0;
        }
    }
    inserted
}

/// Length of the longest run of `1` bits.
pub fn max_ones_run(bits: &[u8]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for &bit in bits {
        if bit != 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}
