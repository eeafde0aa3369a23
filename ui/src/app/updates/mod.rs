mod auth;
mod dispatch;
mod loading;
mod popup;
mod search;
mod templates;

pub(crate) use auth::observe_and_notify;
