//! Home controller: placeholders, forward and redirect examples.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::mvc::{ActionContext, ActionResult, Actions, DispatchError, Forward};
use crate::routing::LinkBuilder;

#[derive(Debug)]
pub struct HomeController {
    links: LinkBuilder,
}

impl HomeController {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            links: LinkBuilder::new(config),
        }
    }

    fn index(&self) -> ActionResult {
        let links = [
            self.links.build("demo:hello", [("name", "world")]),
            self.links.build("demo:greet", [("name", "visitor")]),
            self.links.build("demo:page", [("page", 2_i64)]),
            self.links.build("demo:tags", [("tags", vec!["rust", "mvc"])]),
            self.links.build("demo:user", [("user", 1_i64)]),
            self.links.path("demo:legacy"),
        ];

        let mut body = String::from("Signature MVC demo\n");
        for link in links {
            let link = link.map_err(DispatchError::action)?;
            body.push_str(&link);
            body.push('\n');
        }
        Ok(body.into())
    }

    fn hello(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let name = ctx
            .parameter("name")
            .and_then(|value| value.as_str())
            .unwrap_or("stranger");
        let greeting = ctx.request.parameter("greeting").unwrap_or("Hello");
        Ok(format!("{greeting}, {name}!").into())
    }

    fn page(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let page = ctx.parameter("page").and_then(|value| value.as_integer()).unwrap_or(1);
        Ok(format!("Page {page}").into())
    }

    fn tags(&self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let tags = ctx
            .parameter("tags")
            .and_then(|value| value.as_list())
            .map(|tags| tags.join(" / "))
            .unwrap_or_default();
        Ok(format!("Tags: {tags}").into())
    }
}

impl Actions for HomeController {
    fn init_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Result<(), DispatchError> {
        tracing::debug!(action, uri = %ctx.request.request_uri(), "Demo action");
        Ok(())
    }

    fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult> {
        let result = match action {
            "index" => self.index(),
            "hello" => self.hello(ctx),
            "greet" => ctx.forward(Forward::to("hello").parameter("greeting", "Welcome")),
            "page" => self.page(ctx),
            "tags" => self.tags(ctx),
            "legacy" => ctx.redirect("/", 301),
            _ => return None,
        };
        Some(result)
    }
}
