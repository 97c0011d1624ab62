pub mod build;
pub mod enumerate;
pub mod tube;
