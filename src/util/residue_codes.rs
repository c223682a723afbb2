//! Amino acid name tables for the 20 standard residues.
//! Maps PDB three-letter residue names to IUPAC one-letter codes and back.

/// One-letter code for a three-letter residue name (case insensitive).
/// Returns None for non-standard residues.
pub fn one_letter_code(residue_name: &str) -> Option<char> {
    match residue_name.to_uppercase().as_str() {
        "ALA" => Some('A'),
        "ARG" => Some('R'),
        "ASN" => Some('N'),
        "ASP" => Some('D'),
        "CYS" => Some('C'),
        "GLN" => Some('Q'),
        "GLU" => Some('E'),
        "GLY" => Some('G'),
        "HIS" => Some('H'),
        "ILE" => Some('I'),
        "LEU" => Some('L'),
        "LYS" => Some('K'),
        "MET" => Some('M'),
        "PHE" => Some('F'),
        "PRO" => Some('P'),
        "SER" => Some('S'),
        "THR" => Some('T'),
        "TRP" => Some('W'),
        "TYR" => Some('Y'),
        "VAL" => Some('V'),
        _ => None,
    }
}

/// Three-letter residue name for a one-letter code (case insensitive).
pub fn three_letter_code(code: char) -> Option<&'static str> {
    match code.to_ascii_uppercase() {
        'A' => Some("ALA"),
        'R' => Some("ARG"),
        'N' => Some("ASN"),
        'D' => Some("ASP"),
        'C' => Some("CYS"),
        'Q' => Some("GLN"),
        'E' => Some("GLU"),
        'G' => Some("GLY"),
        'H' => Some("HIS"),
        'I' => Some("ILE"),
        'L' => Some("LEU"),
        'K' => Some("LYS"),
        'M' => Some("MET"),
        'F' => Some("PHE"),
        'P' => Some("PRO"),
        'S' => Some("SER"),
        'T' => Some("THR"),
        'W' => Some("TRP"),
        'Y' => Some("TYR"),
        'V' => Some("VAL"),
        _ => None,
    }
}
