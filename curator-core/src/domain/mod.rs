pub mod curation;
pub mod error;
pub mod project;
pub mod rules;
pub mod table;
pub mod validation;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
