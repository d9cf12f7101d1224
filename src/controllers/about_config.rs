//! `about:config` page.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::mvc::{ActionContext, ActionResult, Actions, DispatchError};

/// Renders the routing configuration as pretty-printed JSON.
#[derive(Debug)]
pub struct AboutConfigController {
    config: Arc<AppConfig>,
}

impl AboutConfigController {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn index(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let body = serde_json::to_string_pretty(&self.config.routing).map_err(DispatchError::action)?;
        ctx.response.add_header("Content-Type", "application/json");
        Ok(body.into())
    }
}

impl Actions for AboutConfigController {
    fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult> {
        match action {
            "index" => Some(self.index(ctx)),
            _ => None,
        }
    }
}
