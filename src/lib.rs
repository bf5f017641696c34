pub mod aggregator;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod round;
pub mod stats;
