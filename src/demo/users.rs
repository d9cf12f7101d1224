//! Users page, resolved through a `(User)user` placeholder.

use serde::Serialize;

use crate::mvc::{ActionContext, ActionResult, Actions, DispatchError};
use crate::persistence::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// The empty record bound for unknown keys.
    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

impl Record for User {}

#[derive(Debug, Default)]
pub struct UsersController;

impl UsersController {
    fn show(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let user = ctx
            .parameter("user")
            .and_then(|value| value.as_object::<User>())
            .cloned()
            .unwrap_or_default();

        if user.is_empty() {
            ctx.response.set_status_code(404);
            return Ok("Unknown user".into());
        }

        if ctx.request.parameter("format") == Some("json") {
            let body = serde_json::to_string(&user).map_err(DispatchError::action)?;
            ctx.response.add_header("Content-Type", "application/json");
            return Ok(body.into());
        }

        Ok(format!("User #{}: {}", user.id, user.name).into())
    }
}

impl Actions for UsersController {
    fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult> {
        match action {
            "show" => Some(self.show(ctx)),
            _ => None,
        }
    }
}
