//! Outbound adapters (driven side).

pub mod export;
pub mod notifier;

pub use export::ExportDirectory;
pub use notifier::LogNotifier;
