use std::collections::HashMap;

use super::StatusColor;
use crate::domain::{BedStatus, CampRecord, RingId};

/// Color key for a block in `ring`: the status of the first camp placed on that ring
///
/// Records whose placement address is malformed never match. Every block of
/// a ring gets the same camp, even when several camps share the ring.
pub fn classify_block(ring: RingId, camps: &[CampRecord]) -> StatusColor {
    camps
        .iter()
        .find(|camp| camp.ring() == Some(ring))
        .map(|camp| StatusColor::Status(camp.bed_status))
        .unwrap_or(StatusColor::Unassigned)
}

/// Lookup table built once per render
///
/// Records that name a block are matched exactly on `(ring, block)`. All
/// other records fall back to first-match per ring, which is exactly
/// `classify_block` when no record names a block.
#[derive(Debug, Default)]
pub struct CampIndex {
    by_block: HashMap<(RingId, usize), BedStatus>,
    by_ring: HashMap<RingId, BedStatus>,
    skipped: usize,
}

impl CampIndex {
    pub fn new(camps: &[CampRecord]) -> Self {
        let mut index = Self::default();

        for camp in camps {
            let Some(ring) = camp.ring() else {
                log::debug!(
                    "Ignoring camp with malformed address {:?}",
                    camp.placement_address
                );
                index.skipped += 1;
                continue;
            };

            match camp.block {
                Some(block) => {
                    index.by_block.entry((ring, block)).or_insert(camp.bed_status);
                }
                None => {
                    index.by_ring.entry(ring).or_insert(camp.bed_status);
                }
            }
        }

        index
    }

    pub fn classify(&self, ring: RingId, block: usize) -> StatusColor {
        self.by_block
            .get(&(ring, block))
            .or_else(|| self.by_ring.get(&ring))
            .map(|&status| StatusColor::Status(status))
            .unwrap_or(StatusColor::Unassigned)
    }

    /// Number of records that could not be placed on any ring
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
