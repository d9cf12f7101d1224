//! MVC request handling subsystem.
//!
//! # Data Flow
//! ```text
//! Request (uri, method, parameters)
//!     → routing (controller, action, typed parameters resolved)
//!     → dispatcher.rs (resolve controller from the container)
//!     → controller.rs (handle_request → Outcome)
//!         Completed → done
//!         Forward   → request re-targeted, next iteration
//!         Redirect  → stop, response carries Location
//!     → Response (status, headers, content)
//! ```
//!
//! # Design Decisions
//! - Request/Response are plain per-request values, never shared
//! - Control flow signals are return values, not errors
//! - Iteration limit guards against forward cycles

pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod request;
pub mod response;

pub use controller::{
    ActionContext, ActionController, ActionOutput, ActionResult, Actions, Controller, Forward,
    Outcome, Redirect, View,
};
pub use dispatcher::{Dispatcher, DISPATCH_ITERATION_LIMIT};
pub use error::DispatchError;
pub use request::{ActionParameters, ObjectValue, ParameterValue, Request};
pub use response::Response;
