//! Residue sequences of structures and patches.

use rustc_hash::FxHashSet;

use super::StructureAtom;
use crate::error::SurfpatchError;
use crate::util::residue_codes::one_letter_code;

/// A run of residues within one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueSpan {
    /// Chain identifier.
    pub chain: String,
    /// Residue number of the first residue of the run.
    pub first: i32,
    /// Residue number of the last residue of the run.
    pub last: i32,
}

/// One-letter sequence of a patch, gap-padded so that residue `k` sits at
/// 1-based position `k`.
///
/// Atoms are walked in order and each residue number contributes once.
/// Residues that arrive out of order are appended where they are met.
pub fn patch_sequence(
    atoms: &[StructureAtom],
) -> Result<String, SurfpatchError> {
    let mut seen = FxHashSet::default();
    let mut sequence = String::new();
    let mut len: i64 = 0;

    for atom in atoms {
        if !seen.insert(atom.residue_number) {
            continue;
        }
        let code = one_letter_code(&atom.residue_name).ok_or_else(|| {
            SurfpatchError::UnknownResidue(atom.residue_name.clone())
        })?;
        while i64::from(atom.residue_number) > len + 1 {
            sequence.push('-');
            len += 1;
        }
        sequence.push(code);
        len += 1;
    }
    Ok(sequence)
}

/// First residue of each residue run, grouped by chain in first-appearance
/// order.
fn residues_by_chain(atoms: &[StructureAtom]) -> Vec<(&str, Vec<&StructureAtom>)> {
    let mut chains: Vec<(&str, Vec<&StructureAtom>)> = Vec::new();
    for atom in atoms {
        let idx = match chains.iter().position(|(c, _)| *c == atom.chain) {
            Some(idx) => idx,
            None => {
                chains.push((atom.chain.as_str(), Vec::new()));
                chains.len() - 1
            }
        };
        let residues = &mut chains[idx].1;
        let same_residue = residues.last().is_some_and(|last| {
            last.residue_number == atom.residue_number
                && last.residue_name == atom.residue_name
        });
        if !same_residue {
            residues.push(atom);
        }
    }
    chains
}

/// Locate `query` (one-letter codes, case insensitive) as a contiguous run
/// of residues within a single chain.
///
/// Chains are searched in the order they first appear; the first match
/// wins. Residues without a standard one-letter code never match.
#[must_use]
pub fn find_sequence(
    atoms: &[StructureAtom],
    query: &str,
) -> Option<ResidueSpan> {
    let query: Vec<char> =
        query.chars().map(|c| c.to_ascii_uppercase()).collect();
    if query.is_empty() {
        return None;
    }

    for (chain, residues) in residues_by_chain(atoms) {
        let codes: Vec<Option<char>> = residues
            .iter()
            .map(|r| one_letter_code(&r.residue_name))
            .collect();
        let hit = codes.windows(query.len()).position(|window| {
            window.iter().zip(&query).all(|(code, q)| *code == Some(*q))
        });
        if let Some(start) = hit {
            return Some(ResidueSpan {
                chain: chain.to_owned(),
                first: residues[start].residue_number,
                last: residues[start + query.len() - 1].residue_number,
            });
        }
    }
    None
}
