pub mod camps;

pub use camps::{DataError, load_camps, mock_camps, parse_camps};
