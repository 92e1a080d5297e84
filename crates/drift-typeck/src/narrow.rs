//! Control-flow-sensitive type refinement.
//!
//! When the branch compiler recognizes a guard expression as
//! type-discriminating (`isinstance(x, ...)`, `x is None`,
//! `x is not None`), it asks [`narrow`] for the refined types of the
//! guarded binding on the true and false branches. The refinement itself
//! is a pure computation over the declared type's member set; the scope
//! mechanics (recording the override, reverting on region exit or
//! reassignment) live in [`crate::env::TypeEnv`].

use crate::subtype::{is_subtype, ClassHierarchy};
use crate::ty::Ty;
use crate::union::normalize_union;

/// A recognized type-discriminating guard.
#[derive(Clone, Debug)]
pub enum Guard {
    /// `isinstance(x, T)` or `isinstance(x, (T1, T2, ...))`.
    IsInstance(Vec<Ty>),
    /// `x is None`.
    IsNone,
    /// `x is not None`.
    IsNotNone,
}

/// Compute the refined types of a binding declared as `declared` on the
/// true and false branches of `guard`.
///
/// The true branch is the intersection of the declared member set with
/// the tested set; the false branch is the declared member set minus the
/// members subsumed by the tested set. Both are renormalized, so a
/// refinement that leaves a single member degrades to the bare type. An
/// empty refinement is `Never` -- the branch cannot be taken with a
/// well-typed value.
pub fn narrow(declared: &Ty, guard: &Guard, classes: &dyn ClassHierarchy) -> (Ty, Ty) {
    match guard {
        Guard::IsNone => refine(declared, &[Ty::none()], classes),
        Guard::IsNotNone => {
            let (true_ty, false_ty) = refine(declared, &[Ty::none()], classes);
            (false_ty, true_ty)
        }
        Guard::IsInstance(tested) => {
            // A tested type may itself be union-like (e.g. a type alias for
            // an Optional); refine against its member set.
            let tested: Vec<Ty> = tested.iter().flat_map(members_of).collect();
            refine(declared, &tested, classes)
        }
    }
}

fn refine(declared: &Ty, tested: &[Ty], classes: &dyn ClassHierarchy) -> (Ty, Ty) {
    let members = members_of(declared);
    let mut kept_true = Vec::new();
    let mut kept_false = Vec::new();
    for member in &members {
        for t in tested {
            if is_subtype(t, member, classes) {
                // Tested type is narrower than (or equal to) the member:
                // the member refines down to it.
                kept_true.push(t.clone());
            } else if is_subtype(member, t, classes) {
                kept_true.push(member.clone());
            }
        }
        if !tested.iter().any(|t| is_subtype(member, t, classes)) {
            kept_false.push(member.clone());
        }
    }
    (rejoin(kept_true, classes), rejoin(kept_false, classes))
}

fn members_of(ty: &Ty) -> Vec<Ty> {
    match ty {
        Ty::Union(members) => members.clone(),
        Ty::Optional(inner) => vec![(**inner).clone(), Ty::none()],
        other => vec![other.clone()],
    }
}

fn rejoin(members: Vec<Ty>, classes: &dyn ClassHierarchy) -> Ty {
    if members.is_empty() {
        Ty::Never
    } else {
        normalize_union(members, classes).unwrap_or(Ty::Never)
    }
}
