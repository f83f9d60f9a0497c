// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Growable bit vector for reaching-definition tracking.
//!
//! Bits beyond the allocated words are implicitly zero, so two vectors of
//! different lengths compare and combine as if the shorter one were padded
//! with zero words. A vector with no words allocated is the empty set of any
//! length.
//!
//! The binary operators come in two flavours:
//! - [`and`], [`or`], [`xor`], [`reset`] return a [`Cow`] and hand back one of
//!   the operands unchanged when the other one is empty. Call
//!   [`Cow::into_owned`] or [`Cow::to_mut`] before mutating the result.
//! - `&a & &b`, `&a | &b`, `&a ^ &b` always allocate a fresh vector.
//!
//! [`BitVector::next_set_bit`] skips zero words and resolves the lowest set
//! bit inside a word through a 256-entry byte table, so walking all set bits
//! costs roughly one step per set bit plus one per word.


use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor};

/// Number of bits per backing word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Index of the lowest set bit for every byte value.
///
/// Entry 0 holds 8 (no bit set) and is never consulted for a non-zero word.
static LOWEST_SET_BIT: [u8; 256] = lowest_set_bit_table();

const fn lowest_set_bit_table() -> [u8; 256] {
    let mut table = [8u8; 256];
    let mut value = 1;
    while value < 256 {
        let mut bit = 0;
        while (value >> bit) & 1 == 0 {
            bit += 1;
        }
        table[value] = bit as u8;
        value += 1;
    }
    table
}

/// Lowest set bit of a non-zero word, resolved byte by byte.
fn lowest_set_bit(word: u64) -> usize {
    debug_assert!(word != 0);
    let mut shift = 0;
    loop {
        let byte = ((word >> shift) & 0xFF) as usize;
        if byte != 0 {
            return shift + usize::from(LOWEST_SET_BIT[byte]);
        }
        shift += 8;
    }
}

/// Growable set of bit positions backed by 64-bit words.
#[derive(Clone, Default)]
pub struct BitVector {
    words: Vec<u64>,
}

impl BitVector {
    /// Creates an empty vector without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates an all-zero vector with room for `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a vector with exactly one bit set.
    #[must_use]
    pub fn singleton(bit: usize) -> Self {
        let mut v = Self::with_capacity(bit + 1);
        v.set(bit, true);
        v
    }

    /// Number of allocated words.
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Number of bits covered by the allocated words.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Returns the bit at `index`. Bits beyond the allocation read as zero.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|w| (w >> (index % WORD_BITS)) & 1 == 1)
    }

    /// Sets or clears the bit at `index`, growing the vector when setting a
    /// bit past the end.
    pub fn set(&mut self, index: usize, value: bool) {
        let word = index / WORD_BITS;
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            if word >= self.words.len() {
                self.words.resize(word + 1, 0);
            }
            self.words[word] |= mask;
        } else if let Some(w) = self.words.get_mut(word) {
            *w &= !mask;
        }
    }

    /// Clears every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Returns true if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Smallest set bit at or after `from`, or `None` if there is none.
    #[must_use]
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let mut index = from / WORD_BITS;
        let mut word = *self.words.get(index)? & (!0u64 << (from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(index * WORD_BITS + lowest_set_bit(word));
            }
            index += 1;
            word = *self.words.get(index)?;
        }
    }

    /// Smallest set bit, or `None` for an empty vector.
    #[must_use]
    pub fn first_set_bit(&self) -> Option<usize> {
        self.next_set_bit(0)
    }

    /// Iterates over set bit positions in ascending order.
    #[must_use]
    pub const fn iter(&self) -> SetBits<'_> {
        SetBits {
            bits: self,
            next: 0,
        }
    }

    /// Computes `self &= !kill; self |= gen` in a single pass.
    ///
    /// This is the transfer function of the reaching-definitions analysis:
    /// `kill` removes the definitions an assignment overwrites and `gen`
    /// adds the assignment's own definition.
    pub fn reset_then_or(&mut self, kill: &Self, generate: &Self) {
        if self.words.len() < generate.words.len() {
            self.words.resize(generate.words.len(), 0);
        }
        for (i, w) in self.words.iter_mut().enumerate() {
            let k = kill.words.get(i).copied().unwrap_or(0);
            let g = generate.words.get(i).copied().unwrap_or(0);
            *w = (*w & !k) | g;
        }
    }

    fn or_assign(&mut self, other: &Self) {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    fn xor_assign(&mut self, other: &Self) {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w ^= o;
        }
    }

    fn and_assign(&mut self, other: &Self) {
        self.words.truncate(other.words.len());
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w &= o;
        }
    }

    fn reset_assign(&mut self, other: &Self) {
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w &= !o;
        }
    }

    /// Words with trailing zero words removed; used for equality and hashing.
    fn significant_words(&self) -> &[u64] {
        let len = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |i| i + 1);
        &self.words[..len]
    }
}

/// Intersection. Returns the empty operand itself if either side is empty.
#[must_use]
pub fn and<'a>(a: &'a BitVector, b: &'a BitVector) -> Cow<'a, BitVector> {
    if a.is_empty() {
        return Cow::Borrowed(a);
    }
    if b.is_empty() {
        return Cow::Borrowed(b);
    }
    let mut out = a.clone();
    out.and_assign(b);
    Cow::Owned(out)
}

/// Union. Returns the non-empty operand itself if the other one is empty.
#[must_use]
pub fn or<'a>(a: &'a BitVector, b: &'a BitVector) -> Cow<'a, BitVector> {
    if b.is_empty() {
        return Cow::Borrowed(a);
    }
    if a.is_empty() {
        return Cow::Borrowed(b);
    }
    let mut out = a.clone();
    out.or_assign(b);
    Cow::Owned(out)
}

/// Symmetric difference. Returns the non-empty operand itself if the other
/// one is empty.
#[must_use]
pub fn xor<'a>(a: &'a BitVector, b: &'a BitVector) -> Cow<'a, BitVector> {
    if b.is_empty() {
        return Cow::Borrowed(a);
    }
    if a.is_empty() {
        return Cow::Borrowed(b);
    }
    let mut out = a.clone();
    out.xor_assign(b);
    Cow::Owned(out)
}

/// Difference `a & !b`. Returns `a` itself if either side is empty.
#[must_use]
pub fn reset<'a>(a: &'a BitVector, b: &BitVector) -> Cow<'a, BitVector> {
    if a.is_empty() || b.is_empty() {
        return Cow::Borrowed(a);
    }
    let mut out = a.clone();
    out.reset_assign(b);
    Cow::Owned(out)
}

/// Copy of `v` with bit `index` set to `value`.
#[must_use]
pub fn set_bit(v: &BitVector, index: usize, value: bool) -> BitVector {
    let mut out = v.clone();
    out.set(index, value);
    out
}

/// Copy of `v` with bit `index` cleared.
#[must_use]
pub fn clear_bit(v: &BitVector, index: usize) -> BitVector {
    set_bit(v, index, false)
}

/// Number of bits set in both `a` and `b`, without allocating.
#[must_use]
pub fn and_count(a: &BitVector, b: &BitVector) -> usize {
    a.words
        .iter()
        .zip(&b.words)
        .map(|(x, y)| (x & y).count_ones() as usize)
        .sum()
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.significant_words() == other.significant_words()
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for BitVector {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut v = Self::new();
        for bit in iter {
            v.set(bit, true);
        }
        v
    }
}

impl BitAnd for &BitVector {
    type Output = BitVector;

    fn bitand(self, rhs: Self) -> BitVector {
        and(self, rhs).into_owned()
    }
}

impl BitOr for &BitVector {
    type Output = BitVector;

    fn bitor(self, rhs: Self) -> BitVector {
        or(self, rhs).into_owned()
    }
}

impl BitXor for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: Self) -> BitVector {
        xor(self, rhs).into_owned()
    }
}

/// Iterator over the set bits of a [`BitVector`].
pub struct SetBits<'a> {
    bits: &'a BitVector,
    next: usize,
}

impl Iterator for SetBits<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let bit = self.bits.next_set_bit(self.next)?;
        self.next = bit + 1;
        Some(bit)
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = usize;
    type IntoIter = SetBits<'a>;

    fn into_iter(self) -> SetBits<'a> {
        self.iter()
    }
}
