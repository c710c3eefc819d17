pub mod app;
pub mod backend;
pub mod config;
pub mod constants;
pub mod health_form;
pub mod loading;
pub mod message;
pub mod notifications;
pub mod predictions;
pub mod tabs;
pub mod text_wrapping;
