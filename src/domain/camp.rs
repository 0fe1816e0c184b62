use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::RingId;

/// Separator between the ring letter and the clock position in a placement address
pub const ADDRESS_SEPARATOR: &str = " & ";

/// Progress of a camp's sleeping-arrangement assignment
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum BedStatus {
    #[default]
    None,
    VideoComplete,
    BuddyAssigned,
    Complete,
}

/// Unrecognized statuses read as `None`, so they get the no-progress color
impl From<String> for BedStatus {
    fn from(name: String) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown bed status {:?}, treating as none", name);
            BedStatus::None
        })
    }
}

/// A camp as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// "<ring> & <clock position>", e.g. "B & 3:00"
    pub placement_address: String,
    #[serde(default)]
    pub bed_status: BedStatus,
    /// Subdivision index within the ring, when the source knows the exact block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<usize>,
}

impl CampRecord {
    pub fn new(placement_address: impl Into<String>, bed_status: BedStatus) -> Self {
        Self {
            name: None,
            placement_address: placement_address.into(),
            bed_status,
            block: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_block(mut self, block: usize) -> Self {
        self.block = Some(block);
        self
    }

    /// Ring part of the placement address.
    ///
    /// Returns `None` for malformed addresses (no separator, or a street token
    /// that is not a single letter) so a bad record simply never matches.
    pub fn ring(&self) -> Option<RingId> {
        let (street, _) = self.placement_address.split_once(ADDRESS_SEPARATOR)?;
        RingId::from_token(street)
    }
}
