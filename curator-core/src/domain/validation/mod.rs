// curator-core/src/domain/validation/mod.rs

pub mod reference;
pub mod validator;
pub mod violation;

pub use reference::CrossReferenceChecker;
pub use validator::{PartialValidation, ValidationContext, Validator};
pub use violation::{Outcome, ValidationResult, ViolationRecord};
