//! Letter-multiset encodings
//!
//! A word's letters are encoded so that two words compare equal exactly when
//! they are anagrams of each other. The default encoding maps every letter to
//! a distinct prime and multiplies them together; by unique factorisation the
//! product identifies the multiset. A running product that does not divide the
//! target product can never be completed, which is what the search prunes on.
//!
//! [`LetterCounts`] is the frequency-vector alternative and yields the same
//! search results.

pub mod counts;

pub use counts::LetterCounts;

use crate::error::EncodingError;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;

/// Prime assigned to each lowercase letter, `a` through `z`.
pub const LETTER_PRIMES: [u32; 26] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101,
];

/// Map a symbol to its prime. A space maps to 1 so it never changes a product.
pub fn symbol_prime(symbol: char) -> Option<u32> {
    match symbol {
        ' ' => Some(1),
        'a'..='z' => Some(LETTER_PRIMES[(symbol as u8 - b'a') as usize]),
        _ => None,
    }
}

/// Encoding of a letter multiset that the search engine can accumulate and
/// compare against a target.
pub trait LetterMultiset: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Short name used in logs
    const NAME: &'static str;

    /// The encoding of the empty word
    fn empty() -> Self;

    /// Encode a word
    fn encode(word: &str) -> Result<Self, EncodingError>;

    /// The encoding of the two multisets joined together
    fn combine(&self, other: &Self) -> Self;

    /// Whether this multiset could still grow into `target`.
    ///
    /// Must never return false for a multiset that is contained in `target`.
    fn fits_within(&self, target: &Self) -> bool;
}

/// Product of the primes of every symbol in a word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(BigUint);

impl Fingerprint {
    pub fn one() -> Self {
        Fingerprint(BigUint::one())
    }

    /// Product of two fingerprints
    pub fn multiply(&self, other: &Fingerprint) -> Fingerprint {
        Fingerprint(&self.0 * &other.0)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Fingerprint(BigUint::from(value))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the fingerprint of `word`.
///
/// Only spaces and lowercase ASCII letters are accepted.
pub fn fingerprint(word: &str) -> Result<Fingerprint, EncodingError> {
    let mut product = BigUint::one();
    for (position, symbol) in word.chars().enumerate() {
        let prime = symbol_prime(symbol).ok_or_else(|| EncodingError::new(word, symbol, position))?;
        if prime != 1 {
            product *= prime;
        }
    }
    Ok(Fingerprint(product))
}

/// Whether a partial product can still be completed into `target`, i.e.
/// whether it divides the target.
pub fn can_extend(partial: &Fingerprint, target: &Fingerprint) -> bool {
    if partial.0.is_zero() {
        return false;
    }
    (&target.0 % &partial.0).is_zero()
}

impl LetterMultiset for Fingerprint {
    const NAME: &'static str = "primes";

    fn empty() -> Self {
        Fingerprint::one()
    }

    fn encode(word: &str) -> Result<Self, EncodingError> {
        fingerprint(word)
    }

    fn combine(&self, other: &Self) -> Self {
        self.multiply(other)
    }

    fn fits_within(&self, target: &Self) -> bool {
        can_extend(self, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::seq::SliceRandom;
    use rand_chacha::ChaCha8Rng;

    fn fp(word: &str) -> Fingerprint {
        fingerprint(word).unwrap()
    }

    #[test]
    fn test_primes_are_distinct() {
        let mut primes = LETTER_PRIMES.to_vec();
        primes.dedup();
        assert_eq!(primes.len(), 26);
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_symbol_prime_mapping() {
        assert_eq!(symbol_prime(' '), Some(1));
        assert_eq!(symbol_prime('a'), Some(2));
        assert_eq!(symbol_prime('b'), Some(3));
        assert_eq!(symbol_prime('z'), Some(101));
        assert_eq!(symbol_prime('A'), None);
        assert_eq!(symbol_prime('\''), None);
    }

    #[test]
    fn test_anagrams_share_fingerprint() {
        assert_eq!(fp("cat"), fp("act"));
        assert_eq!(fp("act"), fp("tac"));
        assert_ne!(fp("cat"), fp("cats"));
        assert_eq!(fp("ab"), Fingerprint::from(6));
    }

    #[test]
    fn test_space_is_identity() {
        assert_eq!(fp("poultry outwits ants"), fp("poultryoutwitsants"));
        assert_eq!(fp(" "), Fingerprint::one());
        assert_eq!(fp(""), Fingerprint::one());
    }

    #[test]
    fn test_target_phrase_matches_known_solutions() {
        let target = fp("poultry outwits ants");
        assert_eq!(fp("printout stout yawls"), target);
        assert_eq!(fp("ty outlaws printouts"), target);
        assert_eq!(fp("wu lisp not statutory"), target);
    }

    #[test]
    fn test_fingerprint_exceeds_machine_word() {
        let long = fp("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzz");
        assert!(long.0.bits() > 128);
        assert!(can_extend(&fp("zz"), &long));
    }

    #[test]
    fn test_rejects_unsupported_symbols() {
        let err = fingerprint("it's").unwrap_err();
        assert_eq!(err.symbol, '\'');
        assert_eq!(err.position, 2);

        assert!(fingerprint("Cat").is_err());
        assert!(fingerprint("café").is_err());
    }

    #[test]
    fn test_can_extend() {
        let target = fp("poultry outwits ants");
        assert!(can_extend(&fp("stout"), &target));
        assert!(can_extend(&fp("printout").multiply(&fp("stout")), &target));
        // Only one 'p' in the target
        assert!(!can_extend(&fp("pp"), &target));
        assert!(!can_extend(&fp("zebra"), &target));
        assert!(can_extend(&Fingerprint::one(), &target));
        assert!(!can_extend(&Fingerprint::from(0), &target));
    }

    #[test]
    fn test_shuffled_words_are_anagrams() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for word in ["poultry", "outwits", "ants", "statutory", "printouts"] {
            let mut symbols: Vec<char> = word.chars().collect();
            for _ in 0..20 {
                symbols.shuffle(&mut rng);
                let shuffled: String = symbols.iter().collect();
                assert_eq!(fp(&shuffled), fp(word));
            }
        }
    }

    #[test]
    fn test_multiset_equality_matches_fingerprint_equality() {
        let words = [
            "listen", "silent", "enlist", "tinsel", "inlets", "lists", "slits", "stout", "touts",
            "tout", "outs",
        ];
        for a in &words {
            for b in &words {
                let mut sa: Vec<char> = a.chars().collect();
                let mut sb: Vec<char> = b.chars().collect();
                sa.sort_unstable();
                sb.sort_unstable();
                assert_eq!(fp(a) == fp(b), sa == sb, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_divisibility_never_rejects_a_sub_multiset() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let target_word = "poultryoutwitsants";
        let target = fp(target_word);
        let mut symbols: Vec<char> = target_word.chars().collect();
        for take in 0..=symbols.len() {
            symbols.shuffle(&mut rng);
            let part: String = symbols[..take].iter().collect();
            assert!(can_extend(&fp(&part), &target), "rejected {:?}", part);
        }
    }
}
