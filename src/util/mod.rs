//! Shared utilities.
//!
//! Integer range compression, amino acid name tables, and residue table
//! exports.

pub mod ranges;
pub mod residue_codes;
pub mod residue_export;
