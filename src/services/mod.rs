// Service exports
pub mod catalog;
pub mod notifier;

pub use catalog::{CatalogStore, PostgresCatalog, CatalogError};
pub use notifier::{Notifier, WebhookNotifier, NotifyError};
