pub mod notifier;

pub use notifier::{AlertEvent, Notifier};
