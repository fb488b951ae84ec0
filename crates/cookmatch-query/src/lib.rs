pub mod normalize;
pub mod params;

pub use normalize::{normalize, parse_list, parse_number};
pub use params::RawParams;
