//! Whole-menu construction: the empty skeleton and randomized plans.

pub mod generate;
