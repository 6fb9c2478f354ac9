// Module declarations
pub(crate) mod instruments_errors;
pub(crate) mod instruments_model;
pub(crate) mod instruments_repository;
pub(crate) mod instruments_service;
pub(crate) mod instruments_traits;

// Re-export the public interface
pub use instruments_model::{Bond, CatalogSyncSummary, Stock};
pub use instruments_repository::InstrumentRepository;
pub use instruments_service::InstrumentService;
pub use instruments_traits::InstrumentNameLookup;

// Re-export error types for convenience
pub use instruments_errors::{InstrumentError, Result};
