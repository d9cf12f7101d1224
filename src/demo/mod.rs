//! Demo application.
//!
//! Shows every placeholder kind and both control flow signals:
//!
//! ```text
//! /                  demo.home   index     links to everything below
//! /hello/$name       demo.home   hello     string placeholder
//! /greet/$name       demo.home   greet     forwards to hello
//! /pages/#page       demo.home   page      numeric placeholder
//! /tags/@tags        demo.home   tags      list placeholder
//! /legacy            demo.home   legacy    301 to /
//! /users/(User)user  demo.users  show      record placeholder
//! ```

pub mod home;
pub mod users;

use std::sync::Arc;

use crate::config::{AppConfig, RouteConfig, SharedConfig};
use crate::container::Container;
use crate::controllers;
use crate::mvc::ActionController;
use crate::persistence::MemoryProvider;

pub use home::HomeController;
pub use users::{User, UsersController};

pub const HOME_CONTROLLER: &str = "demo.home";
pub const USERS_CONTROLLER: &str = "demo.users";

/// Routes served by the demo controllers.
pub fn routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("demo:home", &["/"], HOME_CONTROLLER, "index"),
        RouteConfig::new("demo:hello", &["/hello/$name"], HOME_CONTROLLER, "hello"),
        RouteConfig::new("demo:greet", &["/greet/$name"], HOME_CONTROLLER, "greet"),
        RouteConfig::new("demo:page", &["/pages/#page", "/page/#page"], HOME_CONTROLLER, "page"),
        RouteConfig::new("demo:tags", &["/tags/@tags"], HOME_CONTROLLER, "tags"),
        RouteConfig::new("demo:legacy", &["/legacy"], HOME_CONTROLLER, "legacy"),
        RouteConfig::new("demo:user", &["/users/(User)user"], USERS_CONTROLLER, "show"),
    ]
}

/// Add the demo routes that `config` does not define yet.
pub fn install_routes(config: &mut AppConfig) {
    for route in routes() {
        if config.routing.uri_route(&route.name).is_none() {
            config.routing.add_uri_route(route);
        }
    }
}

/// Seeded user table.
pub fn users() -> Arc<MemoryProvider<User>> {
    let users = Arc::new(MemoryProvider::new());
    users.insert("1", User::new(1, "Ada Lovelace"));
    users.insert("2", User::new(2, "Grace Hopper"));
    users
}

/// Container with the built-in and demo controllers and the `User` type.
pub fn build_container(config: SharedConfig) -> Container {
    let mut container = Container::new();
    controllers::register_builtin(&mut container, config.clone());

    container
        .register_controller(HOME_CONTROLLER, move || {
            ActionController::new(HomeController::new(config.load_full()))
        })
        .register_controller(USERS_CONTROLLER, || ActionController::new(UsersController));

    container.objects_mut().register_record::<User>("User", users());
    container
}
