pub mod product;
pub mod profile;
pub mod progress;
pub mod routine;
pub mod skin;
