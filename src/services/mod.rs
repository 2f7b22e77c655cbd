//! Service layer
//!
//! The watcher core: condition evaluation, action resolution, dispatch of
//! side effects, and the per-watcher state machine that ties them together.

pub mod action_resolver;
pub mod condition;
pub mod dispatcher;
pub mod watcher_instance;

pub use action_resolver::{resolve, TemplateVars};
pub use condition::evaluate;
pub use dispatcher::Dispatcher;
pub use watcher_instance::{WatcherContext, WatcherInstance};
