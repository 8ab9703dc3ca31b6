//! Reduced hash tree root reconstruction.
//!
//! A reduced hash tree admits more than one legal reading: a single leaf may
//! enter the tree as-is or hashed a second time, and a level may be treated
//! as a list or as a set with equal entries collapsed. Rather than guessing,
//! the reconstructor trials all four combinations against the message
//! imprint fixed inside the time-stamp token; the imprint is
//! cryptographically bound, so a byte-exact match identifies the reading the
//! archiving system actually used.

use crate::domain::crypto::{DigestValue, HashAlgorithm};
use crate::domain::record::PartialHashTree;

/// The reading that reproduced the message imprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    /// The reconstructed root value; byte-equal to the message imprint.
    pub digest: DigestValue,
    /// Whether a lone leaf was hashed a second time before entering the tree.
    /// Determines what raw byte string the time-stamp mathematically covers.
    pub double_hash: bool,
    /// Whether equal entries within a level were collapsed before hashing.
    pub deduplicated: bool,
    /// The raw byte string whose digest is the root, when the final step was
    /// a hash computation. `None` when the imprint is a tree member verbatim,
    /// in which case the preimage is known only to the caller.
    pub source: Option<Vec<u8>>,
}

/// Why no root could be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashTreeFailure {
    /// None of the four combinations reproduces the message imprint.
    NoCombinationMatches,
    /// A hash-tree level holds no digests and nothing is carried into it.
    EmptyLevel { index: usize },
}

/// The four legal readings, primary convention first.
const COMBINATIONS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

/// One hash-tree level together with the value carried in from the level
/// below it; exists only while the reconstruction walks the tree.
struct DataGroup<'a> {
    members: Vec<&'a [u8]>,
}

impl<'a> DataGroup<'a> {
    fn assemble(
        level: &'a PartialHashTree,
        carry: Option<&'a [u8]>,
        deduplicated: bool,
    ) -> Self {
        let mut members: Vec<&'a [u8]> =
            level.digests().iter().map(DigestValue::as_slice).collect();
        if let Some(injected) = carry {
            members.push(injected);
        }
        members.sort_unstable();
        if deduplicated {
            members.dedup();
        }
        Self { members }
    }

    /// Combined value of the group: a lone member passes through unless
    /// double-hash mode forces a rehash; multiple members are concatenated in
    /// byte-lexicographic order and hashed. Returns the value and, when the
    /// value was computed by hashing, the bytes that were hashed.
    fn combined_value(
        &self,
        algorithm: HashAlgorithm,
        double_hash: bool,
    ) -> Option<(Vec<u8>, Option<Vec<u8>>)> {
        match self.members.as_slice() {
            [] => None,
            [single] if !double_hash => Some((single.to_vec(), None)),
            [single] => {
                let source = single.to_vec();
                Some((algorithm.compute(&source), Some(source)))
            }
            _ => {
                let concatenated = self.members.concat();
                Some((algorithm.compute(&concatenated), Some(concatenated)))
            }
        }
    }
}

/// Resolves a reduced hash tree against a time-stamp's message imprint.
pub struct HashTreeReconstructor;

impl HashTreeReconstructor {
    /// Find the reading of `levels` that reproduces `imprint` under
    /// `algorithm`, walking level 0 upward and carrying each computed value
    /// into the next level as an extra member.
    ///
    /// An empty tree is the degenerate single-digest case: the imprint
    /// covers the sole protected digest directly and there is nothing to
    /// reconstruct.
    pub fn resolve(
        levels: &[PartialHashTree],
        algorithm: HashAlgorithm,
        imprint: &DigestValue,
    ) -> Result<ResolvedRoot, HashTreeFailure> {
        if levels.is_empty() {
            return Ok(ResolvedRoot {
                digest: imprint.clone(),
                double_hash: false,
                deduplicated: false,
                source: None,
            });
        }
        if levels[0].is_empty() {
            return Err(HashTreeFailure::EmptyLevel { index: 0 });
        }

        for (double_hash, deduplicated) in COMBINATIONS {
            if let Some(root) = Self::try_combination(levels, algorithm, double_hash, deduplicated)
            {
                if root.digest == *imprint {
                    log::debug!(
                        "hash tree resolved (double_hash={double_hash}, deduplicated={deduplicated})"
                    );
                    return Ok(root);
                }
            }
        }
        Err(HashTreeFailure::NoCombinationMatches)
    }

    fn try_combination(
        levels: &[PartialHashTree],
        algorithm: HashAlgorithm,
        double_hash: bool,
        deduplicated: bool,
    ) -> Option<ResolvedRoot> {
        let mut carry: Option<Vec<u8>> = None;
        let mut source: Option<Vec<u8>> = None;

        for level in levels {
            let step = {
                let group = DataGroup::assemble(level, carry.as_deref(), deduplicated);
                group.combined_value(algorithm, double_hash)?
            };
            carry = Some(step.0);
            source = step.1;
        }

        carry.map(|digest| ResolvedRoot {
            digest: DigestValue::new(digest),
            double_hash,
            deduplicated,
            source,
        })
    }
}
