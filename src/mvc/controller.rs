//! Controller capability and action controllers.
//!
//! # Responsibilities
//! - Define the contract the Dispatcher invokes (`Controller`)
//! - Express forward/redirect as an explicit `Outcome` instead of unwinding
//! - Provide `ActionController`, which maps the request's action name onto
//!   named actions with init hooks
//!
//! # Control Flow
//! ```text
//! ActionController::handle_request
//!     → request.dispatched = true
//!     → Actions::init
//!     → Actions::init_action(action)
//!     → Actions::call_action(action)
//!         None                → ActionNotFound
//!         Content(s)          → response.append(s), Outcome::Completed
//!         Nothing             → response.append(view.render()) if a view
//!                                is attached, Outcome::Completed
//!         Forward(f)          → Outcome::Forward(f)
//!         Redirect(r)         → Outcome::Redirect(r)
//! ```

use crate::mvc::error::DispatchError;
use crate::mvc::request::{ParameterValue, Request};
use crate::mvc::response::Response;

/// Default status used by `ActionContext::redirect`.
pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// Internal hand-off to another action, optionally on another controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forward {
    pub action: String,
    pub controller: Option<String>,
    pub parameters: Option<Vec<(String, String)>>,
}

impl Forward {
    /// Forward to `action` on the current controller.
    pub fn to(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            controller: None,
            parameters: None,
        }
    }

    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Add a raw request parameter set before the next iteration.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }
}

/// Signal that the response already encodes an HTTP redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub status_code: u16,
    pub location: String,
}

/// Result of one controller invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The controller handled the request.
    Completed,
    /// Dispatch continues with the forward target.
    Forward(Forward),
    /// Dispatch stops; the response carries the redirect.
    Redirect(Redirect),
}

/// Capability every dispatchable controller provides.
pub trait Controller: Send {
    /// Whether this controller accepts the request. Not consulted by the
    /// Dispatcher.
    fn can_handle_request(&self, _request: &Request) -> bool {
        true
    }

    /// Handle the request. Implementations mark the request dispatched on
    /// entry, so a plain `Completed` ends the dispatch loop.
    fn handle_request(
        &mut self,
        request: &mut Request,
        response: &mut Response,
    ) -> Result<Outcome, DispatchError>;
}

/// What an action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    /// Appended to the response body (nothing is appended when empty).
    Content(String),
    /// No content; the attached `View` renders, if any.
    Nothing,
    Forward(Forward),
    Redirect(Redirect),
}

impl From<String> for ActionOutput {
    fn from(content: String) -> Self {
        ActionOutput::Content(content)
    }
}

impl From<&str> for ActionOutput {
    fn from(content: &str) -> Self {
        ActionOutput::Content(content.to_string())
    }
}

pub type ActionResult = Result<ActionOutput, DispatchError>;

/// Request and response handed to actions.
pub struct ActionContext<'a> {
    pub request: &'a mut Request,
    pub response: &'a mut Response,
}

impl ActionContext<'_> {
    /// Typed parameter bound by the matcher.
    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.request.controller_action_parameters().get(name)
    }

    /// Configure the response as a redirect and return the matching signal.
    pub fn redirect(&mut self, location: impl Into<String>, status_code: u16) -> ActionResult {
        let location = location.into();
        self.response
            .set_content("")
            .set_status_code(status_code)
            .add_header("Location", location.clone());

        Ok(ActionOutput::Redirect(Redirect {
            status_code,
            location,
        }))
    }

    pub fn forward(&self, forward: Forward) -> ActionResult {
        Ok(ActionOutput::Forward(forward))
    }
}

/// Renders a response body for actions that return `Nothing`.
///
/// Template engines plug in here; the framework ships none.
pub trait View: Send {
    fn render(&self, request: &Request) -> Result<String, DispatchError>;
}

/// Named actions of a controller.
pub trait Actions: Send {
    /// View rendered after an action that produced no content.
    fn view(&self) -> Option<&dyn View> {
        None
    }

    /// Runs before every action.
    fn init(&mut self, _ctx: &mut ActionContext<'_>) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Runs before the named action, after `init`.
    fn init_action(&mut self, _action: &str, _ctx: &mut ActionContext<'_>) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Invoke `action`; `None` when the controller has no such action.
    fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult>;
}

/// Adapts a set of `Actions` to the `Controller` capability.
pub struct ActionController<A> {
    actions: A,
}

impl<A: Actions> ActionController<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }
}

impl<A: Actions> Controller for ActionController<A> {
    fn handle_request(
        &mut self,
        request: &mut Request,
        response: &mut Response,
    ) -> Result<Outcome, DispatchError> {
        request.set_dispatched(true);

        let action = request.controller_action_name().to_string();
        let mut ctx = ActionContext { request, response };

        self.actions.init(&mut ctx)?;
        self.actions.init_action(&action, &mut ctx)?;

        let output = match self.actions.call_action(&action, &mut ctx) {
            Some(result) => result?,
            None => {
                return Err(DispatchError::ActionNotFound {
                    controller: ctx.request.controller_name().to_string(),
                    action,
                })
            }
        };

        match output {
            ActionOutput::Content(content) => {
                if !content.is_empty() {
                    ctx.response.append_content(&content);
                }
                Ok(Outcome::Completed)
            }
            ActionOutput::Nothing => {
                if let Some(view) = self.actions.view() {
                    let rendered = view.render(&*ctx.request)?;
                    ctx.response.append_content(&rendered);
                }
                Ok(Outcome::Completed)
            }
            ActionOutput::Forward(forward) => Ok(Outcome::Forward(forward)),
            ActionOutput::Redirect(redirect) => Ok(Outcome::Redirect(redirect)),
        }
    }
}
