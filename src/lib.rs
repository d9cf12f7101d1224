//! Signature MVC framework library

pub mod application;
pub mod config;
pub mod container;
pub mod controllers;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod mvc;
pub mod observability;
pub mod persistence;
pub mod routing;

pub use application::{Application, ApplicationError};
pub use config::schema::AppConfig;
pub use container::Container;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
