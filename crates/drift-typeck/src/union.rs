//! Union normalization.
//!
//! Every `Union[...]` annotation passes through [`normalize_union`], which
//! produces the unique canonical form:
//!
//! 1. members are flattened to a fixpoint -- nested unions are inlined and
//!    `Optional[T]` members expand to `T, NoneType`;
//! 2. members subsumed by another member are absorbed (`X` is dropped when
//!    `X <: Y` for some retained `Y`; exact duplicates are the degenerate
//!    case);
//! 3. the survivors are sorted into the canonical order;
//! 4. a single survivor is returned bare, and exactly `{T, NoneType}`
//!    becomes `Optional[T]`.
//!
//! Normalization is idempotent, and the result is independent of the order
//! the members were written in.

use crate::error::TypeError;
use crate::subtype::{is_subtype, ClassHierarchy};
use crate::ty::{canonical_cmp, Ty};

/// Normalize a union's member list into a canonical type.
///
/// Returns the bare member for singleton unions, `Optional[T]` for
/// `{T, NoneType}`, a canonical `Ty::Union` otherwise, and
/// [`TypeError::EmptyUnion`] for an empty member list.
pub fn normalize_union(
    members: Vec<Ty>,
    classes: &dyn ClassHierarchy,
) -> Result<Ty, TypeError> {
    let mut flat = Vec::new();
    for member in members {
        flatten_into(member, &mut flat);
    }
    if flat.is_empty() {
        return Err(TypeError::EmptyUnion);
    }

    // Sorting before reduction makes the surviving representative of each
    // subtype-equivalence class independent of source order.
    flat.sort_by(canonical_cmp);
    flat.dedup();

    let mut kept: Vec<Ty> = Vec::new();
    'next: for candidate in flat {
        for retained in &kept {
            if is_subtype(&candidate, retained, classes) {
                continue 'next;
            }
        }
        kept.retain(|retained| !is_subtype(retained, &candidate, classes));
        kept.push(candidate);
    }
    kept.sort_by(canonical_cmp);

    if kept.len() == 1 {
        return Ok(kept.swap_remove(0));
    }
    if kept.len() == 2 {
        if let Some(idx) = kept.iter().position(|m| m.is_none()) {
            kept.swap_remove(idx);
            return Ok(Ty::optional(kept.swap_remove(0)));
        }
    }
    Ok(Ty::Union(kept))
}

/// Inline union members and expand `Optional` members to `T, NoneType`.
/// Recursion depth is bounded by the literal nesting of the annotation.
fn flatten_into(ty: Ty, out: &mut Vec<Ty>) {
    match ty {
        Ty::Union(members) => {
            for m in members {
                flatten_into(m, out);
            }
        }
        Ty::Optional(inner) => {
            flatten_into(*inner, out);
            out.push(Ty::none());
        }
        other => out.push(other),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
