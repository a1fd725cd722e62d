//! Editor services - public API for the panels.
//!
//! The app crate drives everything through [`GeneratorService`]; the handlers hold the
//! logic of each command.

pub mod generator_service;
pub mod handlers;
pub mod report;
pub mod session;

pub use generator_service::GeneratorService;
pub use report::{Report, ReportLevel};
pub use session::GeneratorSession;
