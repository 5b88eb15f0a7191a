/*!
IUPAC ambiguity codes for combining base calls.
The table is built once by closing a small seed mapping under set union, and is read-only afterwards.

# Example usage
```rust
use readpair_con::ambiguity::AmbiguityTable;

let table = AmbiguityTable::global();
assert_eq!(table.combine(b'A', b'G').unwrap(), b'R');
assert_eq!(table.combine(b'R', b'C').unwrap(), b'V');
assert_eq!(table.combine(b'-', b'T').unwrap(), b'T');
assert_eq!(table.call(b"ACT").unwrap(), b'H');
assert_eq!(table.call(b"").unwrap(), b'N');
```
*/

use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use std::sync::LazyLock;

use crate::errors::{MergeError, Result};

/// Symbol for an interior alignment gap
pub const GAP: u8 = b'-';
/// Symbol for a position a read never covered
pub const NO_DATA: u8 = b'.';

// base sets are encoded as bit masks: A=1, C=2, G=4, T=8
const BASE_A: u8 = 0b0001;
const BASE_C: u8 = 0b0010;
const BASE_G: u8 = 0b0100;
const BASE_T: u8 = 0b1000;

/// Seed mapping from a set of bases to the code that represents it
const IUPAC_SEED: [(u8, u8); 15] = [
    (BASE_A, b'A'),
    (BASE_C, b'C'),
    (BASE_G, b'G'),
    (BASE_T, b'T'),
    (BASE_A | BASE_C, b'M'),
    (BASE_A | BASE_G, b'R'),
    (BASE_A | BASE_T, b'W'),
    (BASE_C | BASE_G, b'S'),
    (BASE_C | BASE_T, b'Y'),
    (BASE_G | BASE_T, b'K'),
    (BASE_A | BASE_C | BASE_G, b'V'),
    (BASE_A | BASE_C | BASE_T, b'H'),
    (BASE_A | BASE_G | BASE_T, b'D'),
    (BASE_C | BASE_G | BASE_T, b'B'),
    (BASE_A | BASE_C | BASE_G | BASE_T, b'N')
];

static GLOBAL_TABLE: LazyLock<AmbiguityTable> = LazyLock::new(AmbiguityTable::build);

/// Returns true for the two symbols that carry no base information
#[inline]
pub fn is_gap_symbol(symbol: u8) -> bool {
    symbol == GAP || symbol == NO_DATA
}

/// Lookup table from an unordered pair of symbols to the code for their union
#[derive(Clone, Debug)]
pub struct AmbiguityTable {
    /// Keys are sorted pairs; a singleton is stored as `(x, x)`
    pairs: HashMap<(u8, u8), u8>
}

impl AmbiguityTable {
    /// Returns the process-wide table, building it on first use
    pub fn global() -> &'static AmbiguityTable {
        &GLOBAL_TABLE
    }

    /// Builds the full table from the seed mapping.
    /// Every pair of codes maps to the code of the union of their base sets, every code maps to itself,
    /// and a gap or no-data symbol paired with a code yields that code.
    pub fn build() -> AmbiguityTable {
        let code_of: HashMap<u8, u8> = IUPAC_SEED.iter().cloned().collect();

        let mut pairs: HashMap<(u8, u8), u8> = Default::default();
        for &(mask1, code1) in IUPAC_SEED.iter() {
            for &(mask2, code2) in IUPAC_SEED.iter() {
                // every union of non-empty seed sets is itself in the seed
                let union_code = code_of[&(mask1 | mask2)];
                pairs.insert(sorted_pair(code1, code2), union_code);
            }
        }

        for &(_mask, code) in IUPAC_SEED.iter() {
            pairs.insert(sorted_pair(GAP, code), code);
            pairs.insert(sorted_pair(NO_DATA, code), code);
        }

        AmbiguityTable { pairs }
    }

    /// Returns the code for the union of two symbols.
    /// # Arguments
    /// * `s1` - the first symbol, a base, an ambiguity code, a gap, or a no-data marker
    /// * `s2` - the second symbol, same options as `s1`
    /// # Errors
    /// * if either symbol is unknown, or both are gap/no-data symbols;
    ///   the reported position is the argument index, 0 for `s1` and 1 for `s2`
    pub fn combine(&self, s1: u8, s2: u8) -> Result<u8> {
        match self.pairs.get(&sorted_pair(s1, s2)) {
            Some(&code) => Ok(code),
            None => {
                if self.pairs.contains_key(&(s1, s1)) || is_gap_symbol(s1) {
                    Err(MergeError::invalid_symbol(s2, 1))
                } else {
                    Err(MergeError::invalid_symbol(s1, 0))
                }
            }
        }
    }

    /// Returns the code for an arbitrary collection of symbols.
    /// Gap and no-data symbols are ignored and duplicates are collapsed; nothing left yields `N`.
    /// # Arguments
    /// * `symbols` - the collection of bases and/or codes to merge
    /// # Errors
    /// * if any symbol is not a base, code, gap, or no-data marker
    pub fn call(&self, symbols: &[u8]) -> Result<u8> {
        let mut code: Option<u8> = None;
        for (position, symbol) in symbols.iter().cloned()
            .enumerate()
            .filter(|(_i, s)| !is_gap_symbol(*s))
            .sorted_by_key(|(_i, s)| *s)
            .dedup_by(|(_i1, s1), (_i2, s2)| s1 == s2) {
            let next = match code {
                None => self.combine(symbol, symbol),
                Some(c) => self.combine(c, symbol)
            };
            code = Some(next.map_err(|_e| MergeError::invalid_symbol(symbol, position))?);
        }
        Ok(code.unwrap_or(b'N'))
    }

    /// Returns the bases that a code represents, or None if this is not a code.
    pub fn base_set(&self, code: u8) -> Option<Vec<u8>> {
        IUPAC_SEED.iter()
            .find(|(_mask, c)| *c == code)
            .map(|&(mask, _c)| {
                [(BASE_A, b'A'), (BASE_C, b'C'), (BASE_G, b'G'), (BASE_T, b'T')].iter()
                    .filter(|(bit, _b)| mask & bit != 0)
                    .map(|&(_bit, b)| b)
                    .collect()
            })
    }

    /// Number of entries, mostly useful for sanity checks
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[inline]
fn sorted_pair(s1: u8, s2: u8) -> (u8, u8) {
    if s1 <= s2 { (s1, s2) } else { (s2, s1) }
}
