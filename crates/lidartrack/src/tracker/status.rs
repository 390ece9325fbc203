//! Structure-level status codes (§7), separate from a single primitive's
//! status: these describe the outcome of an entire tracking pass.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureStatus {
    Ok,
    TooNarrowInput,
    NoAvailableScan,
    NoCentralPrimitive,
    NoConsistentSequence,
    TooHecticPlateaux,
    TooSparsePlateaux,
}

impl StructureStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, StructureStatus::Ok)
    }
}
