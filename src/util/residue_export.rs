//! Text exports of the residues covered by a set of atoms.
//!
//! Three layouts, for pasting into spreadsheets and design tools:
//! - [`ResidueTable::to_tsv`]: `chain`, `resi`, `resn` columns with header.
//! - [`ResidueTable::to_hotspots`]: `A12,A13,B7` style hotspot lists.
//! - [`ResidueTable::to_ranges`]: one compressed range line per chain.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use super::ranges::compress;
use crate::patch::StructureAtom;

/// One residue row: chain, number, name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueRow {
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub number: i32,
    /// Three-letter residue name.
    pub name: String,
}

/// Unique residues of an atom list, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResidueTable {
    rows: Vec<ResidueRow>,
}

impl ResidueTable {
    /// Collapse atoms to their distinct `(chain, number, name)` residues.
    pub fn from_atoms(atoms: &[StructureAtom]) -> Self {
        let mut seen = FxHashSet::default();
        let rows = atoms
            .iter()
            .map(|a| ResidueRow {
                chain: a.chain.clone(),
                number: a.residue_number,
                name: a.residue_name.clone(),
            })
            .filter(|row| seen.insert(row.clone()))
            .collect();
        Self { rows }
    }

    /// Residue rows in first-appearance order.
    pub fn rows(&self) -> &[ResidueRow] {
        &self.rows
    }

    /// Tab-separated table with a `chain\tresi\tresn` header.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("chain\tresi\tresn\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                row.chain, row.number, row.name
            ));
        }
        out
    }

    /// Comma-separated `{chain}{number}` list.
    pub fn to_hotspots(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{}{}", row.chain, row.number))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// One line per chain (chains sorted), each the compressed residue
    /// numbers prefixed by the chain id.
    pub fn to_ranges(&self) -> String {
        let mut by_chain: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
        for row in &self.rows {
            by_chain.entry(row.chain.as_str()).or_default().push(row.number);
        }
        by_chain
            .into_iter()
            .map(|(chain, numbers)| compress(numbers, chain))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn atoms() -> Vec<StructureAtom> {
        [
            (1, "SER", 10, "B"),
            (2, "SER", 10, "B"),
            (3, "LYS", 11, "B"),
            (4, "GLY", 3, "A"),
            (5, "ALA", 4, "A"),
            (6, "TRP", 12, "B"),
            (7, "HIS", 20, "B"),
        ]
        .into_iter()
        .map(|(id, name, number, chain)| {
            StructureAtom::new(id, Vec3::ZERO, name, number, chain)
        })
        .collect()
    }

    #[test]
    fn duplicates_collapse_in_order() {
        let table = ResidueTable::from_atoms(&atoms());
        assert_eq!(table.rows().len(), 6);
        assert_eq!(table.rows()[0].name, "SER");
        assert_eq!(table.rows()[2].chain, "A");
    }

    #[test]
    fn tsv_layout() {
        let table = ResidueTable::from_atoms(&atoms()[..3]);
        assert_eq!(
            table.to_tsv(),
            "chain\tresi\tresn\nB\t10\tSER\nB\t11\tLYS\n"
        );
    }

    #[test]
    fn hotspot_list() {
        let table = ResidueTable::from_atoms(&atoms());
        assert_eq!(table.to_hotspots(), "B10,B11,A3,A4,B12,B20");
    }

    #[test]
    fn ranges_per_chain() {
        let table = ResidueTable::from_atoms(&atoms());
        assert_eq!(table.to_ranges(), "A3-4\nB10-12,B20");
        assert_eq!(ResidueTable::default().to_ranges(), "");
    }
}
