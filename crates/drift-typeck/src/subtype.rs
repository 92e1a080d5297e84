//! Subtype and union-membership checking.
//!
//! Implements the structural subtype relation used both by the union
//! normalizer (for absorption) and by assignment/argument/append checks.
//! Nominal class subtyping is delegated to an injected [`ClassHierarchy`]
//! so the checker stays independent of the surrounding compiler's class
//! system and is testable with fake hierarchies.

use crate::ty::{NominalKind, Prim, Ty};

/// Read-only view of the class hierarchy, supplied by the surrounding
/// compiler. `is_subclass(a, b)` answers whether the class named `a`
/// derives (transitively) from the class named `b`; a class is its own
/// subclass.
pub trait ClassHierarchy {
    fn is_subclass(&self, sub: &str, sup: &str) -> bool;
}

/// A hierarchy with no subclass relationships: classes are subtypes only
/// of themselves. Suitable wherever no class registry is in play.
pub struct NoHierarchy;

impl ClassHierarchy for NoHierarchy {
    fn is_subclass(&self, sub: &str, sup: &str) -> bool {
        sub == sup
    }
}

/// Decide whether `a` is a subtype of `b`.
///
/// Rules:
/// - primitives by identity only; there is no numeric widening (`int` is
///   NOT a subtype of `float`);
/// - containers are covariant: `List[A] <: List[B]` iff `A <: B`, and
///   likewise for both `Dict` parameters and pointwise for same-arity
///   tuples. Covariance is unsound for mutable containers; it is kept as
///   a compatibility policy, not re-derived as invariance;
/// - `T <: Optional[T]` and `NoneType <: Optional[T]`;
/// - enums match by qualified name; classes consult `classes`;
/// - `A <: Union[Ms]` iff `A` (or each member of `A`, when `A` is itself
///   union-like) is a subtype of some member;
/// - `Never` is a subtype of everything.
pub fn is_subtype(a: &Ty, b: &Ty, classes: &dyn ClassHierarchy) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Ty::Never, _) => true,

        // Union-like on the left: every member must fit the target.
        (Ty::Union(members), _) => members.iter().all(|m| is_subtype(m, b, classes)),
        (Ty::Optional(inner), Ty::Optional(target)) => is_subtype(inner, target, classes),
        (Ty::Optional(inner), _) => {
            is_subtype(inner, b, classes) && is_subtype(&Ty::none(), b, classes)
        }

        // Union-like on the right: some member must admit `a`.
        (_, Ty::Union(members)) => members.iter().any(|m| is_subtype(a, m, classes)),
        (_, Ty::Optional(target)) => a.is_none() || is_subtype(a, target, classes),

        (Ty::List(a_elem), Ty::List(b_elem)) => is_subtype(a_elem, b_elem, classes),
        (Ty::Dict(a_key, a_val), Ty::Dict(b_key, b_val)) => {
            is_subtype(a_key, b_key, classes) && is_subtype(a_val, b_val, classes)
        }
        (Ty::Tuple(a_elems), Ty::Tuple(b_elems)) => {
            a_elems.len() == b_elems.len()
                && a_elems
                    .iter()
                    .zip(b_elems.iter())
                    .all(|(x, y)| is_subtype(x, y, classes))
        }

        (Ty::Nominal(a_n), Ty::Nominal(b_n)) => {
            a_n.kind == NominalKind::Class
                && b_n.kind == NominalKind::Class
                && classes.is_subclass(&a_n.name, &b_n.name)
        }

        _ => false,
    }
}

/// Decide whether a value of the given most-specific type is a member of
/// the declared (union) type. This is the subtype relation applied at a
/// checking boundary: a concrete type is a member of a union iff it is a
/// subtype of one of the union's members.
pub fn is_member(value: &Ty, declared: &Ty, classes: &dyn ClassHierarchy) -> bool {
    is_subtype(value, declared, classes)
}

/// Whether a primitive is one of the kinds permitted as a `Dict` key.
pub(crate) fn is_valid_dict_key_prim(p: Prim) -> bool {
    matches!(
        p,
        Prim::Int | Prim::Float | Prim::Complex | Prim::Str | Prim::Tensor
    )
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    /// A fake hierarchy seeded with (sub, sup) edges; reflexive.
    struct FakeHierarchy {
        edges: FxHashSet<(String, String)>,
    }

    impl FakeHierarchy {
        fn new(edges: &[(&str, &str)]) -> Self {
            FakeHierarchy {
                edges: edges
                    .iter()
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .collect(),
            }
        }
    }

    impl ClassHierarchy for FakeHierarchy {
        fn is_subclass(&self, sub: &str, sup: &str) -> bool {
            sub == sup || self.edges.contains(&(sub.to_string(), sup.to_string()))
        }
    }

    #[test]
    fn primitive_identity_only() {
        assert!(is_subtype(&Ty::int(), &Ty::int(), &NoHierarchy));
        // No numeric widening.
        assert!(!is_subtype(&Ty::int(), &Ty::float(), &NoHierarchy));
        assert!(!is_subtype(&Ty::float(), &Ty::int(), &NoHierarchy));
        assert!(!is_subtype(&Ty::bool(), &Ty::int(), &NoHierarchy));
    }

    #[test]
    fn list_is_covariant() {
        let opt_int = Ty::optional(Ty::int());
        assert!(is_subtype(
            &Ty::list(Ty::int()),
            &Ty::list(opt_int),
            &NoHierarchy
        ));
        assert!(!is_subtype(
            &Ty::list(Ty::int()),
            &Ty::list(Ty::str()),
            &NoHierarchy
        ));
    }

    #[test]
    fn dict_is_covariant_in_both_parameters() {
        let narrow = Ty::dict(Ty::str(), Ty::int());
        let wide = Ty::dict(Ty::str(), Ty::optional(Ty::int()));
        assert!(is_subtype(&narrow, &wide, &NoHierarchy));
        assert!(!is_subtype(&wide, &narrow, &NoHierarchy));
    }

    #[test]
    fn tuple_requires_same_arity_pointwise() {
        let narrow = Ty::tuple(vec![Ty::int(), Ty::int()]);
        let wide = Ty::tuple(vec![Ty::optional(Ty::int()), Ty::int()]);
        assert!(is_subtype(&narrow, &wide, &NoHierarchy));
        assert!(!is_subtype(&wide, &narrow, &NoHierarchy));
        assert!(!is_subtype(
            &Ty::tuple(vec![Ty::int()]),
            &Ty::tuple(vec![Ty::int(), Ty::int()]),
            &NoHierarchy
        ));
    }

    #[test]
    fn optional_admits_inner_and_none() {
        let opt = Ty::optional(Ty::int());
        assert!(is_subtype(&Ty::int(), &opt, &NoHierarchy));
        assert!(is_subtype(&Ty::none(), &opt, &NoHierarchy));
        assert!(!is_subtype(&Ty::str(), &opt, &NoHierarchy));
        // Optional is covariant in its inner type.
        assert!(is_subtype(
            &Ty::optional(Ty::tuple(vec![Ty::int()])),
            &Ty::optional(Ty::tuple(vec![Ty::optional(Ty::int())])),
            &NoHierarchy
        ));
    }

    #[test]
    fn union_membership() {
        let u = Ty::Union(vec![Ty::float(), Ty::int()]);
        assert!(is_member(&Ty::int(), &u, &NoHierarchy));
        assert!(is_member(&Ty::float(), &u, &NoHierarchy));
        assert!(!is_member(&Ty::str(), &u, &NoHierarchy));
    }

    #[test]
    fn union_contained_in_wider_union() {
        let small = Ty::Union(vec![Ty::int(), Ty::str()]);
        let big = Ty::Union(vec![Ty::tensor(), Ty::int(), Ty::str()]);
        assert!(is_subtype(&small, &big, &NoHierarchy));
        assert!(!is_subtype(&big, &small, &NoHierarchy));
    }

    #[test]
    fn optional_contained_in_union_with_none() {
        let opt = Ty::optional(Ty::int());
        let u = Ty::Union(vec![Ty::int(), Ty::none(), Ty::str()]);
        assert!(is_subtype(&opt, &u, &NoHierarchy));
    }

    #[test]
    fn enum_requires_exact_name() {
        let color = Ty::enum_ty("app.Color");
        assert!(is_subtype(&color, &color, &NoHierarchy));
        assert!(!is_subtype(
            &color,
            &Ty::enum_ty("app.Shade"),
            &NoHierarchy
        ));
    }

    #[test]
    fn class_subtype_uses_hierarchy() {
        let classes = FakeHierarchy::new(&[("app.Dog", "app.Animal")]);
        assert!(is_subtype(
            &Ty::class_ty("app.Dog"),
            &Ty::class_ty("app.Animal"),
            &classes
        ));
        assert!(!is_subtype(
            &Ty::class_ty("app.Animal"),
            &Ty::class_ty("app.Dog"),
            &classes
        ));
        // Without the edge, only identity holds.
        assert!(!is_subtype(
            &Ty::class_ty("app.Dog"),
            &Ty::class_ty("app.Animal"),
            &NoHierarchy
        ));
    }

    #[test]
    fn never_is_bottom() {
        assert!(is_subtype(&Ty::Never, &Ty::int(), &NoHierarchy));
        assert!(is_subtype(
            &Ty::Never,
            &Ty::Union(vec![Ty::int(), Ty::str()]),
            &NoHierarchy
        ));
        assert!(!is_subtype(&Ty::int(), &Ty::Never, &NoHierarchy));
    }
}
