//! Frequency-vector encoding of a letter multiset

use super::LetterMultiset;
use crate::error::EncodingError;

/// Number of occurrences of each letter `a` through `z`. Spaces are ignored.
///
/// Counts saturate at `u32::MAX`, far beyond any word a list can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterCounts([u32; 26]);

impl LetterMultiset for LetterCounts {
    const NAME: &'static str = "counts";

    fn empty() -> Self {
        LetterCounts::default()
    }

    fn encode(word: &str) -> Result<Self, EncodingError> {
        let mut counts = [0u32; 26];
        for (position, symbol) in word.chars().enumerate() {
            match symbol {
                ' ' => {}
                'a'..='z' => {
                    let slot = &mut counts[(symbol as u8 - b'a') as usize];
                    *slot = slot.saturating_add(1);
                }
                _ => return Err(EncodingError::new(word, symbol, position)),
            }
        }
        Ok(LetterCounts(counts))
    }

    fn combine(&self, other: &Self) -> Self {
        let mut counts = self.0;
        for (slot, &extra) in counts.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_add(extra);
        }
        LetterCounts(counts)
    }

    fn fits_within(&self, target: &Self) -> bool {
        self.0.iter().zip(target.0.iter()).all(|(have, want)| have <= want)
    }
}
