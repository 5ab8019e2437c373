mod slack;

pub use slack::{NoopNotifier, NotificationError, Notifier, SlackNotifier};
