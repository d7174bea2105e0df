pub mod estimate;
pub mod geography;
pub mod irrigation;
pub mod parameters;
pub mod recommendation;
pub mod season;

pub use estimate::*;
pub use geography::*;
pub use irrigation::*;
pub use parameters::*;
pub use recommendation::*;
pub use season::*;
