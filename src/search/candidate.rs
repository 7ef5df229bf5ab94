//! Candidate words paired with their letter-multiset encoding

use crate::error::EncodingError;
use crate::fingerprint::LetterMultiset;

/// A complete combination: the chosen words, in candidate order
pub type Combination = Vec<String>;

/// A word together with its encoded letter multiset
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<K> {
    pub word: String,
    pub key: K,
}

impl<K: LetterMultiset> Candidate<K> {
    pub fn new(word: impl Into<String>) -> Result<Self, EncodingError> {
        let word = word.into();
        let key = K::encode(&word)?;
        Ok(Self { word, key })
    }
}

/// Encode every word, failing on the first one outside the symbol domain.
pub fn build_candidates<K, S>(words: &[S]) -> Result<Vec<Candidate<K>>, EncodingError>
where
    K: LetterMultiset,
    S: AsRef<str>,
{
    words.iter().map(|w| Candidate::new(w.as_ref())).collect()
}
