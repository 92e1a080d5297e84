//! Assignment-compatibility checking.
//!
//! [`check_assignable`] is the single entry point used at variable
//! assignments, call-argument binding, container-element insertion, and
//! return positions. The declared type is expected to be canonical (the
//! output of annotation lowering or [`crate::union::normalize_union`]), so
//! the signatures embedded in error messages are stable across
//! syntactically-reordered annotations.

use crate::error::{CheckOrigin, TypeError};
use crate::subtype::{is_subtype, ClassHierarchy};
use crate::ty::Ty;

/// Check that a value of type `actual` may be bound where `declared` is
/// expected.
///
/// A union-like declared type produces the membership error
/// (`Expected a member of ... but instead found type ...`); any other
/// declared type produces the plain mismatch
/// (`Could not match type ... to ...`).
pub fn check_assignable(
    declared: &Ty,
    actual: &Ty,
    origin: CheckOrigin,
    classes: &dyn ClassHierarchy,
) -> Result<(), TypeError> {
    if is_subtype(actual, declared, classes) {
        return Ok(());
    }
    if declared.is_union_like() {
        Err(TypeError::NotAMember {
            declared: declared.clone(),
            found: actual.clone(),
            origin,
        })
    } else {
        Err(TypeError::Mismatch {
            expected: declared.clone(),
            found: actual.clone(),
            origin,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtype::NoHierarchy;

    #[test]
    fn member_is_accepted() {
        let declared = Ty::Union(vec![Ty::float(), Ty::int()]);
        assert!(check_assignable(
            &declared,
            &Ty::int(),
            CheckOrigin::Builtin,
            &NoHierarchy
        )
        .is_ok());
    }

    #[test]
    fn non_member_reports_membership_error() {
        let declared = Ty::Union(vec![Ty::float(), Ty::int()]);
        let err = check_assignable(&declared, &Ty::str(), CheckOrigin::Builtin, &NoHierarchy)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected a member of Union[float, int] but instead found type str"
        );
    }

    #[test]
    fn non_union_mismatch_uses_plain_message() {
        let err = check_assignable(&Ty::int(), &Ty::str(), CheckOrigin::Builtin, &NoHierarchy)
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not match type str to int");
    }
}
