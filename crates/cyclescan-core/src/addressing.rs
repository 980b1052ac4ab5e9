//! Grid node addressing: bidirectional mapping between 2D grid coordinates
//! and fixed-width hexadecimal string identifiers.
//!
//! A node at `(i, j)` on a `size`×`size` grid is named by concatenating two
//! lowercase-hex fields holding `i + 1` and `j + 1`, each padded to
//! `ceil(log16(size + 1))` characters. Storing the coordinate plus one keeps
//! every field strictly positive, so a field of all zeros is never a valid
//! identifier and decoding can reject it outright. The encoding is injective
//! by construction: fixed width plus a fixed field order.
//!
//! All operations are pure; the struct carries only `size` and the derived
//! field width.

use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// AddressError
// ---------------------------------------------------------------------------

/// Error produced by encoding or decoding grid node identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A coordinate lies outside `[0, size)`.
    OutOfRange {
        /// Row coordinate that was requested.
        i: usize,
        /// Column coordinate that was requested.
        j: usize,
        /// Grid side length.
        size: usize,
    },
    /// An identifier string is not one this addressing scheme produced:
    /// wrong length, non-hex characters, or a field outside `1..=size`.
    BadIdentifier {
        /// The offending identifier.
        id: String,
    },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::OutOfRange { i, j, size } => {
                write!(f, "coordinate ({i}, {j}) outside {size}x{size} grid")
            }
            AddressError::BadIdentifier { id } => {
                write!(f, "malformed node identifier: {id:?}")
            }
        }
    }
}

impl std::error::Error for AddressError {}

// ---------------------------------------------------------------------------
// GridAddressing
// ---------------------------------------------------------------------------

/// Addressing scheme for a fixed `size`×`size` coordinate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAddressing {
    size: usize,
    /// Hex digits per coordinate field, `ceil(log16(size + 1))`.
    width: usize,
}

impl GridAddressing {
    /// Creates the addressing scheme for a `size`×`size` grid.
    ///
    /// `size` must be at least 1; the width is the smallest number of hex
    /// digits that can hold the largest stored field value, `size` itself.
    pub fn new(size: usize) -> Self {
        let mut width = 1;
        let mut capacity: u128 = 16;
        while capacity <= size as u128 {
            capacity *= 16;
            width += 1;
        }
        GridAddressing { size, width }
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Hex digits per coordinate field.
    pub fn field_width(&self) -> usize {
        self.width
    }

    /// Encodes `(i, j)` as a node identifier.
    ///
    /// # Errors
    ///
    /// [`AddressError::OutOfRange`] if either coordinate is `>= size`.
    pub fn encode(&self, i: usize, j: usize) -> Result<String, AddressError> {
        if i >= self.size || j >= self.size {
            return Err(AddressError::OutOfRange {
                i,
                j,
                size: self.size,
            });
        }
        Ok(format!(
            "{:0w$x}{:0w$x}",
            i + 1,
            j + 1,
            w = self.width
        ))
    }

    /// Decodes a node identifier back to its `(i, j)` coordinates.
    ///
    /// Exact inverse of [`GridAddressing::encode`] for any identifier it
    /// produced.
    ///
    /// # Errors
    ///
    /// [`AddressError::BadIdentifier`] if `id` has the wrong length, holds
    /// non-hex characters, or either field falls outside `1..=size`.
    pub fn decode(&self, id: &str) -> Result<(usize, usize), AddressError> {
        let bad = || AddressError::BadIdentifier { id: id.to_owned() };

        if id.len() != 2 * self.width || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let (field_i, field_j) = id.split_at(self.width);
        let raw_i = usize::from_str_radix(field_i, 16).map_err(|_| bad())?;
        let raw_j = usize::from_str_radix(field_j, 16).map_err(|_| bad())?;

        // Fields store coordinate + 1; zero never occurs in valid ids.
        if raw_i == 0 || raw_j == 0 || raw_i > self.size || raw_j > self.size {
            return Err(bad());
        }
        Ok((raw_i - 1, raw_j - 1))
    }

    /// Returns the grid neighbourhood of `id`: the node itself plus its up
    /// to eight adjacent cells, excluding anything out of range.
    ///
    /// # Errors
    ///
    /// [`AddressError::BadIdentifier`] if `id` does not decode.
    pub fn neighborhood(&self, id: &str) -> Result<BTreeSet<String>, AddressError> {
        let (i, j) = self.decode(id)?;
        let mut result = BTreeSet::new();
        for di in -1i64..=1 {
            for dj in -1i64..=1 {
                let ni = i as i64 + di;
                let nj = j as i64 + dj;
                if ni < 0 || nj < 0 || ni >= self.size as i64 || nj >= self.size as i64 {
                    continue;
                }
                if let Ok(name) = self.encode(ni as usize, nj as usize) {
                    result.insert(name);
                }
            }
        }
        Ok(result)
    }

    /// All node identifiers of the grid, sorted.
    pub fn all_nodes(&self) -> Vec<String> {
        let mut nodes = Vec::with_capacity(self.size * self.size);
        for i in 0..self.size {
            for j in 0..self.size {
                if let Ok(name) = self.encode(i, j) {
                    nodes.push(name);
                }
            }
        }
        nodes.sort();
        nodes
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
