//! Drift union type checker.
//!
//! This crate implements the `Union` type core of the Drift script
//! compiler: canonical union normalization, subtype/membership checking at
//! assignment, call-argument, and container-insertion boundaries, and
//! control-flow-sensitive narrowing at type-discriminating guards.
//!
//! The checker is a pure, synchronous tree-walking analysis. The
//! surrounding compiler supplies annotation trees, the class hierarchy,
//! and the enum/class registry through narrow injected interfaces; this
//! crate owns everything from annotation lowering to the error messages.
//!
//! # Architecture
//!
//! - [`ty`]: core type representation and the two renderings
//! - [`annot`]: annotation-tree lowering with arity/shape validation
//! - [`union`]: union normalization (flatten, absorb, collapse)
//! - [`subtype`]: structural subtype and membership rules
//! - [`check`]: assignability checking with provenance origins
//! - [`env`]: binding environment with scoped narrowing overrides
//! - [`narrow`]: guard-driven refinement of union-typed bindings
//! - [`error`]: type error taxonomy
//! - [`diagnostics`]: ariadne rendering with stable error codes

pub mod annot;
pub mod check;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod narrow;
pub mod subtype;
pub mod ty;
pub mod union;

pub use annot::{lower_annotation, Annotation, NominalRegistry};
pub use check::check_assignable;
pub use env::TypeEnv;
pub use error::{CheckOrigin, TypeError};
pub use narrow::{narrow, Guard};
pub use subtype::{is_member, is_subtype, ClassHierarchy, NoHierarchy};
pub use ty::{render_signature, NominalKind, Prim, Ty};
pub use union::normalize_union;
