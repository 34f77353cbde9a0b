pub mod mood;
pub mod mood_store;
pub mod overlay;
pub mod temporal_key;
pub mod theme;
pub mod week;

pub use mood::*;
pub use mood_store::*;
pub use overlay::*;
pub use temporal_key::*;
pub use theme::*;
pub use week::*;
