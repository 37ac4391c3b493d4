// curator-core/src/domain/table/mod.rs

pub mod model;
pub mod profile;
pub mod schema;
pub mod standardize;
pub mod value;

pub use model::{Row, Table};
pub use profile::TableProfile;
pub use schema::{ColumnType, Schema};
pub use standardize::{StandardizationConfig, standardize};
pub use value::Value;
