pub mod entries;
pub mod handlers;
pub mod metrics;
pub mod tracker;
