//! Application layer: session state and scripted actions
//!
//! This layer orchestrates domain operations on behalf of a presentation layer.

pub mod action;
pub mod error;
pub mod script;
pub mod session;

pub use action::Action;
pub use error::{ApplicationError, ApplicationResult};
pub use script::{run_script, RunReport, ScriptFailure, ScriptLine, ScriptParser};
pub use session::NetworkSession;
