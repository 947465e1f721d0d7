pub mod order_index;
pub mod sample_arena;

pub use order_index::OrderIndex;
pub use sample_arena::{SampleArena, SampleId};
