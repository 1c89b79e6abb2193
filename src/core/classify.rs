use crate::domain::model::CalcType;

// Family markers as they appear in opening identifiers. Each family carries
// the window ("ОК"/"OK") and door ("ДВ"/"DV") prefix in both the Cyrillic
// and the transliterated spelling. Matching is case-sensitive.
const TYPE0_MARKERS: [&str; 4] = ["ОК-0", "OK-0", "ДВ-0", "DV-0"];
const TYPE1_MARKERS: [&str; 4] = ["ОК-1", "OK-1", "ДВ-1", "DV-1"];
const TYPE2_MARKERS: [&str; 4] = ["ОК-2", "OK-2", "ДВ-2", "DV-2"];

/// Derives the manufacturing family from an opening identifier. Families are
/// checked in order 0, 1, 2; the first family with a matching marker wins.
pub fn classify(identifier: &str) -> CalcType {
    if contains_any(identifier, &TYPE0_MARKERS) {
        return CalcType::Type0;
    }
    if contains_any(identifier, &TYPE1_MARKERS) {
        return CalcType::Type1;
    }
    if contains_any(identifier, &TYPE2_MARKERS) {
        return CalcType::Type2;
    }
    CalcType::Unknown
}

fn contains_any(identifier: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| identifier.contains(marker))
}
