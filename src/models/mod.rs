//! Core data models.

mod confidence;
mod counts;
mod event;
mod gauge;
mod ids;
mod match_info;
mod metric;
mod player;
mod scope;
mod zone;

pub use confidence::*;
pub use counts::*;
pub use event::*;
pub use gauge::*;
pub use ids::*;
pub use match_info::*;
pub use metric::*;
pub use player::*;
pub use scope::*;
pub use zone::*;
