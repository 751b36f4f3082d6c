//! Sequence module: numeric coercion, input preparation, and the immutable
//! sorted sequence every search runs over.

pub mod number;
pub mod prepare;
pub mod sorted;
