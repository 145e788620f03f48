// Domain model for Yukon: use-case configuration, notifications, call paths.

pub mod callgraph;
pub mod notification;
pub mod path;
pub mod store;
pub mod use_case;

pub use callgraph::{build_tree, CallGraphNode};
pub use notification::Notification;
pub use path::{path_frames, PATH_SEPARATOR};
pub use store::NotificationStore;
pub use use_case::{ProjectConfig, UseCaseDefinition};
