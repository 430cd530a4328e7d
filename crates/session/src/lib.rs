//! Game session: question sampling, pointer interpretation, round state and
//! records. Everything is synchronous and timer-free; the embedding UI owns
//! the clock and feeds pointer events in.

pub mod input;
pub mod round;
pub mod sampler;
pub mod session;

pub use input::*;
pub use round::*;
pub use sampler::*;
pub use session::*;
