pub mod block;
pub mod camp;
pub mod ring;

pub use block::{AngleRange, Block, BlockError, block_id, subdivision_angles};
pub use camp::{BedStatus, CampRecord};
pub use ring::{RingAlphabet, RingId};
