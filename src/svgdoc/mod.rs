pub mod parser;

pub use parser::{
    RING_ROADS_ID, RingRoadError, extract_ring_path, load_site_plan, parse_ring_roads,
};
