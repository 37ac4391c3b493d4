// curator-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrats de stockage (DatasetReader, ArtifactWriter) et EventSink.
pub mod ports;

// 2. Domain (Cœur du métier)
// Tables, règles, validation/réparation, agrégation. Aucune I/O.
pub mod domain;

// 3. Infrastructure (Adapters)
// Chargement YAML, CSV, sinks tracing / mémoire.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (Pipeline, Check, Clean)
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::CuratorError;
