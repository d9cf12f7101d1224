//! Built-in controllers.
//!
//! # Responsibilities
//! - `signature.error`: answers requests no route matched
//! - `signature.about_config`: exposes the active routing table as JSON
//!
//! Both are registered by `register_builtin`; the default configuration
//! points at them.

pub mod about_config;
pub mod error;

use crate::config::SharedConfig;
use crate::container::Container;
use crate::mvc::ActionController;

pub use about_config::AboutConfigController;
pub use error::ErrorController;

pub const ERROR_CONTROLLER: &str = "signature.error";
pub const ABOUT_CONFIG_CONTROLLER: &str = "signature.about_config";

/// Register the built-in controllers.
pub fn register_builtin(container: &mut Container, config: SharedConfig) -> &mut Container {
    container
        .register_controller(ERROR_CONTROLLER, || ActionController::new(ErrorController))
        .register_controller(ABOUT_CONFIG_CONTROLLER, move || {
            ActionController::new(AboutConfigController::new(config.load_full()))
        })
}
