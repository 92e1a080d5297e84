//! Type error types with provenance tracking.
//!
//! Every boundary-check error carries a [`CheckOrigin`] recording which
//! kind of site produced it (assignment, argument binding, container
//! append, return) and where in the source it sits. All errors are fatal:
//! a program with a union type error does not compile.

use std::fmt;

use rowan::TextRange;

use crate::ty::Ty;

/// The kind of checking boundary that produced a type error.
#[derive(Clone, Debug)]
pub enum CheckOrigin {
    /// A variable assignment: `x = expr`.
    Assignment { span: TextRange },
    /// A call argument bound to a declared parameter type.
    FnArg {
        call_site: TextRange,
        param_idx: usize,
    },
    /// An element inserted into a container with a declared element type.
    Append { span: TextRange },
    /// A returned value checked against the declared return type.
    Return { span: TextRange },
    /// Synthetic origin for programmatic checks with no source location.
    Builtin,
}

impl CheckOrigin {
    /// The primary source span of this origin, if it has one.
    pub fn span(&self) -> Option<TextRange> {
        match self {
            CheckOrigin::Assignment { span }
            | CheckOrigin::Append { span }
            | CheckOrigin::Return { span } => Some(*span),
            CheckOrigin::FnArg { call_site, .. } => Some(*call_site),
            CheckOrigin::Builtin => None,
        }
    }
}

/// A type error raised by annotation lowering, union normalization, or a
/// boundary check.
#[derive(Clone, Debug)]
pub enum TypeError {
    /// A container/union constructor applied to the wrong number of type
    /// arguments (e.g. `Dict[int]`).
    MalformedAnnotation {
        ctor: String,
        /// Human-readable arity requirement ("exactly 1", "at least 1").
        expected: String,
        found: usize,
        span: TextRange,
    },
    /// `normalize_union` called with no members.
    EmptyUnion,
    /// An annotation names a type the registry does not know.
    UnknownTypeName { name: String, span: TextRange },
    /// Assignment to a name with no declared binding in any scope.
    UnboundVariable { name: String, span: TextRange },
    /// A value's type is not a member of the declared union type.
    NotAMember {
        declared: Ty,
        found: Ty,
        origin: CheckOrigin,
    },
    /// A value's type does not match a declared non-union type.
    Mismatch {
        expected: Ty,
        found: Ty,
        origin: CheckOrigin,
    },
    /// A union used in a position the checker does not support (currently:
    /// as a `Dict` key).
    UnsupportedUnionUsage { key: Ty, span: TextRange },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::MalformedAnnotation {
                ctor,
                expected,
                found,
                ..
            } => {
                write!(
                    f,
                    "malformed annotation: `{}` expects {} type argument(s), found {}",
                    ctor, expected, found
                )
            }
            TypeError::EmptyUnion => {
                write!(f, "cannot create a union with no members")
            }
            TypeError::UnknownTypeName { name, .. } => {
                write!(f, "unknown type name `{}`", name)
            }
            TypeError::UnboundVariable { name, .. } => {
                write!(f, "unbound variable `{}`", name)
            }
            TypeError::NotAMember {
                declared, found, ..
            } => {
                write!(
                    f,
                    "Expected a member of {} but instead found type {}",
                    declared.annotation_str(),
                    found.annotation_str()
                )
            }
            TypeError::Mismatch {
                expected, found, ..
            } => {
                write!(
                    f,
                    "Could not match type {} to {}",
                    found.annotation_str(),
                    expected.annotation_str()
                )
            }
            TypeError::UnsupportedUnionUsage { key, .. } => {
                write!(
                    f,
                    "invalid Dict key type {}: only int, float, complex, Tensor and string keys are supported",
                    key.annotation_str()
                )
            }
        }
    }
}
