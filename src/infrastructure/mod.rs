// Infrastructure implementations for Yukon.

pub mod config_document;
pub mod notification_feed;
pub mod project_layout;

pub use config_document::ConfigDocument;
pub use notification_feed::JsonNotificationFeed;
pub use project_layout::ProjectLayout;
