//! Verification of complete combinations against control digests
//!
//! A complete combination fixes which words make up the phrase but not their
//! order. Every ordering is joined with single spaces, hashed, and looked up
//! in the control digest set.

use crate::error::ConfigError;
use itertools::Itertools;
use md5::Md5;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Digests of the three accepted orderings of the default target phrase.
pub const DEFAULT_CONTROL_DIGESTS: [&str; 3] = [
    "e4820b45d2277f3844eac66c903e84be",
    "23170acc097c24edb98fc5488ab033fe",
    "665e5bcb0c20062fe8abaaf4628bb154",
];

/// Hash function used to digest candidate phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Length of the lowercase hex digest
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 32,
            DigestAlgorithm::Sha256 => 64,
        }
    }

    pub fn hex_digest(&self, text: &str) -> String {
        match self {
            DigestAlgorithm::Md5 => format!("{:x}", Md5::digest(text.as_bytes())),
            DigestAlgorithm::Sha256 => format!("{:x}", Sha256::digest(text.as_bytes())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// The set of digests a correct phrase must hash to
#[derive(Debug, Clone)]
pub struct ControlDigests {
    algorithm: DigestAlgorithm,
    digests: HashSet<String>,
}

impl ControlDigests {
    /// Build a digest set, validating every entry against `algorithm`.
    pub fn new<I, S>(algorithm: DigestAlgorithm, digests: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for digest in digests {
            let digest = digest.as_ref().trim().to_ascii_lowercase();
            if digest.len() != algorithm.hex_len()
                || !digest.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(ConfigError::new(format!(
                    "invalid {} control digest {:?}: expected {} hex characters",
                    algorithm,
                    digest,
                    algorithm.hex_len()
                )));
            }
            set.insert(digest);
        }
        if set.is_empty() {
            return Err(ConfigError::new("at least one control digest is required"));
        }
        Ok(Self {
            algorithm,
            digests: set,
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Return the digest of `phrase` if it is one of the control digests.
    pub fn matches(&self, phrase: &str) -> Option<String> {
        let digest = self.algorithm.hex_digest(phrase);
        self.digests.contains(&digest).then_some(digest)
    }
}

impl Default for ControlDigests {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::Md5,
            digests: DEFAULT_CONTROL_DIGESTS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// An ordering of a complete combination whose digest is a control digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub phrase: String,
    pub digest: String,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.phrase, self.digest)
    }
}

/// Outcome of checking one combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub solution: Option<Solution>,
    /// Number of orderings hashed before a match or exhaustion
    pub orderings_hashed: u64,
}

/// Hash every ordering of `words` and report the first one found in
/// `digests`.
pub fn verify_combination<S: AsRef<str>>(words: &[S], digests: &ControlDigests) -> Verification {
    let mut orderings_hashed = 0;
    for ordering in words.iter().map(|w| w.as_ref()).permutations(words.len()) {
        let phrase = ordering.into_iter().join(" ");
        orderings_hashed += 1;
        if let Some(digest) = digests.matches(&phrase) {
            return Verification {
                solution: Some(Solution { phrase, digest }),
                orderings_hashed,
            };
        }
    }
    Verification {
        solution: None,
        orderings_hashed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hex_digest() {
        assert_eq!(
            DigestAlgorithm::Md5.hex_digest("printout stout yawls"),
            "e4820b45d2277f3844eac66c903e84be"
        );
        assert_eq!(
            DigestAlgorithm::Md5.hex_digest("poultry outwits ants"),
            "8b35bbd7ff2f5dd7c94fffbb1a3512bc"
        );
    }

    #[test]
    fn test_sha256_hex_digest() {
        assert_eq!(
            DigestAlgorithm::Sha256.hex_digest("poultry outwits ants"),
            "34861d22f70ae0eb58f92bd915592d13c5d5a77f55b09c8db1cd04aa90bd9106"
        );
    }

    #[test]
    fn test_reports_matching_ordering() {
        let digests =
            ControlDigests::new(DigestAlgorithm::Md5, ["8b35bbd7ff2f5dd7c94fffbb1a3512bc"])
                .unwrap();
        let result = verify_combination(&["ants", "outwits", "poultry"], &digests);
        let solution = result.solution.expect("expected a solution");
        assert_eq!(solution.phrase, "poultry outwits ants");
        assert_eq!(solution.digest, "8b35bbd7ff2f5dd7c94fffbb1a3512bc");
        assert!(result.orderings_hashed <= 6);
    }

    #[test]
    fn test_no_false_match() {
        let digests =
            ControlDigests::new(DigestAlgorithm::Md5, ["8b35bbd7ff2f5dd7c94fffbb1a3512bc"])
                .unwrap();
        let result = verify_combination(&["ants", "outwit", "poultrys"], &digests);
        assert!(result.solution.is_none());
        assert_eq!(result.orderings_hashed, 6);
    }

    #[test]
    fn test_hashes_every_ordering_once() {
        let digests =
            ControlDigests::new(DigestAlgorithm::Md5, ["00000000000000000000000000000000"])
                .unwrap();
        let result = verify_combination(&["wu", "lisp", "not", "statutory"], &digests);
        assert!(result.solution.is_none());
        assert_eq!(result.orderings_hashed, 24);

        let single = verify_combination(&["ants"], &digests);
        assert_eq!(single.orderings_hashed, 1);
    }

    #[test]
    fn test_default_digests_find_known_phrase() {
        let digests = ControlDigests::default();
        assert_eq!(digests.len(), 3);
        assert_eq!(digests.algorithm(), DigestAlgorithm::Md5);
        let result = verify_combination(&["yawls", "stout", "printout"], &digests);
        assert_eq!(
            result.solution.map(|s| s.phrase),
            Some("printout stout yawls".to_string())
        );
    }

    #[test]
    fn test_digest_validation() {
        assert!(ControlDigests::new(DigestAlgorithm::Md5, ["xyz"]).is_err());
        assert!(
            ControlDigests::new(DigestAlgorithm::Md5, ["g4820b45d2277f3844eac66c903e84be"])
                .is_err()
        );
        assert!(
            ControlDigests::new(
                DigestAlgorithm::Sha256,
                ["e4820b45d2277f3844eac66c903e84be"]
            )
            .is_err()
        );
        assert!(ControlDigests::new(DigestAlgorithm::Md5, Vec::<String>::new()).is_err());

        let upper =
            ControlDigests::new(DigestAlgorithm::Md5, ["E4820B45D2277F3844EAC66C903E84BE"])
                .unwrap();
        assert!(upper.matches("printout stout yawls").is_some());
    }
}
