//! Dispatch error types.

use thiserror::Error;

/// Errors raised while dispatching a request to controllers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No controller factory is registered under the requested name.
    #[error("controller \"{0}\" is not registered")]
    UnknownController(String),

    /// The resolved controller has no action of the requested name.
    #[error("controller \"{controller}\" does not have an action called \"{action}\"")]
    ActionNotFound { controller: String, action: String },

    /// Forward cycle guard.
    #[error("the request took more than {0} iterations to dispatch, giving up")]
    TooManyForwards(usize),

    /// An action failed with an application error.
    #[error("action failed: {0}")]
    Action(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    /// Wrap an application error raised inside an action.
    pub fn action(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        DispatchError::Action(err.into())
    }
}
