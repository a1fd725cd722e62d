pub mod naming;
pub mod passes;
pub mod scene;
