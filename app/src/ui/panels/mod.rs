pub mod aovs;
pub mod collections;
pub mod passes;
pub mod reports;
