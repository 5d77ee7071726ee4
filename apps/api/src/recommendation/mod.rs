//! Recommendation engine: deterministic filtering over the catalog, an
//! injectable picker, and assembly into a three-phase routine.

pub mod assembler;
pub mod filter;
pub mod handlers;
pub mod picker;
#[cfg(test)]
pub mod test_support;
