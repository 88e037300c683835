//! Test harness for capsule editing.
//!
//! Provides deterministic host doubles and a scripted editing session so
//! editor behavior can be verified tick by tick without a renderer.
//!
//! # Key Components
//!
//! - [`EditSession`]: Fluent API for scripting handle drags across instances
//! - [`helpers`]: Scripted handles, recording outline and undo, failing generator
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod workflow;

pub use helpers::HarnessError;
pub use workflow::EditSession;
