//! Type representation for the Drift union checker.
//!
//! Defines the core `Ty` enum over primitives, container generics
//! (`List`, `Dict`, `Tuple`, `Optional`), nominal class/enum types, and
//! canonical unions. Types are immutable value objects: once constructed
//! (and, for unions, normalized) they are structurally compared and freely
//! shared.
//!
//! A `Ty` has two textual forms:
//! - [`Display`](std::fmt::Display) renders the canonical *signature* form
//!   used in graphs and test assertions: `int[]`, `int?`, `(int?, int)`,
//!   `Dict(str, int)`, `Union[float, int, NoneType]`.
//! - [`Ty::annotation_str`] renders the source-annotation form used in
//!   membership error messages: `List[int]`, `Optional[int]`,
//!   `Union[List[int], Dict[str, int]]`.

use std::cmp::Ordering;
use std::fmt;

/// A primitive scalar type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prim {
    Int,
    Float,
    Complex,
    Bool,
    Str,
    Tensor,
    /// The type of the `None` value.
    None,
}

impl Prim {
    /// Signature-form name (`NoneType` for the none type).
    pub fn name(self) -> &'static str {
        match self {
            Prim::Int => "int",
            Prim::Float => "float",
            Prim::Complex => "complex",
            Prim::Bool => "bool",
            Prim::Str => "str",
            Prim::Tensor => "Tensor",
            Prim::None => "NoneType",
        }
    }

    /// Annotation-form name (`None` for the none type).
    pub fn annotation_name(self) -> &'static str {
        match self {
            Prim::None => "None",
            other => other.name(),
        }
    }
}

/// Whether a nominal type is a class or an enum.
///
/// Enums compare by exact qualified name; classes additionally consult the
/// injected class hierarchy for subtype checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NominalKind {
    Class,
    Enum,
}

/// A nominal (class or enum) type, identified by its qualified name.
///
/// The name is the fully qualified path as the registry reports it
/// (e.g. `app.models.Color`). Two nominals are the same type iff their
/// qualified names match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NominalTy {
    pub name: String,
    pub kind: NominalKind,
}

/// A Drift type.
///
/// `Union` holds its members in canonical form: flattened, deduplicated by
/// subtype absorption, sorted, with cardinality >= 2, and never containing
/// a nested `Union` or `Optional` member (an `Optional` member is expanded
/// to its inner type plus `NoneType` during normalization; `Optional`
/// survives only inside containers, as in `Tuple[int?, int]`). The
/// `Union[T, None]` spelling and `Optional[T]` are one and the same type,
/// canonically represented as `Ty::Optional`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// A primitive scalar: `int`, `float`, `str`, ...
    Prim(Prim),
    /// A homogeneous list: `List[T]`.
    List(Box<Ty>),
    /// A homogeneous mapping: `Dict[K, V]`.
    Dict(Box<Ty>, Box<Ty>),
    /// A fixed-arity heterogeneous tuple: `Tuple[T1, ..., Tn]`.
    Tuple(Vec<Ty>),
    /// `Optional[T]`, i.e. the canonical form of `Union[T, None]`.
    Optional(Box<Ty>),
    /// A class or enum type, identified by qualified name.
    Nominal(NominalTy),
    /// A canonical union of two or more members.
    Union(Vec<Ty>),
    /// The bottom type -- the result of an empty narrowing intersection.
    Never,
}

impl Ty {
    /// Create an `int` type.
    pub fn int() -> Ty {
        Ty::Prim(Prim::Int)
    }

    /// Create a `float` type.
    pub fn float() -> Ty {
        Ty::Prim(Prim::Float)
    }

    /// Create a `complex` type.
    pub fn complex() -> Ty {
        Ty::Prim(Prim::Complex)
    }

    /// Create a `bool` type.
    pub fn bool() -> Ty {
        Ty::Prim(Prim::Bool)
    }

    /// Create a `str` type.
    pub fn str() -> Ty {
        Ty::Prim(Prim::Str)
    }

    /// Create a `Tensor` type.
    pub fn tensor() -> Ty {
        Ty::Prim(Prim::Tensor)
    }

    /// Create the `NoneType` type.
    pub fn none() -> Ty {
        Ty::Prim(Prim::None)
    }

    /// Create a `List[T]` type.
    pub fn list(elem: Ty) -> Ty {
        Ty::List(Box::new(elem))
    }

    /// Create a `Dict[K, V]` type.
    pub fn dict(key: Ty, value: Ty) -> Ty {
        Ty::Dict(Box::new(key), Box::new(value))
    }

    /// Create a `Tuple[...]` type.
    pub fn tuple(elems: Vec<Ty>) -> Ty {
        Ty::Tuple(elems)
    }

    /// Create an `Optional[T]` type in canonical form.
    ///
    /// `Optional[Optional[T]]` collapses to `Optional[T]`,
    /// `Optional[None]` to `NoneType`, and `Optional[Union[...]]` folds
    /// `NoneType` into the union's member set (so
    /// `Optional[Union[int, str]]` is `Union[int, NoneType, str]`).
    pub fn optional(inner: Ty) -> Ty {
        match inner {
            Ty::Optional(_) => inner,
            Ty::Prim(Prim::None) => inner,
            Ty::Union(mut members) => {
                if !members.iter().any(|m| m.is_none()) {
                    members.push(Ty::none());
                    members.sort_by(canonical_cmp);
                }
                Ty::Union(members)
            }
            other => Ty::Optional(Box::new(other)),
        }
    }

    /// Create a class type with the given qualified name.
    pub fn class_ty(name: impl Into<String>) -> Ty {
        Ty::Nominal(NominalTy {
            name: name.into(),
            kind: NominalKind::Class,
        })
    }

    /// Create an enum type with the given qualified name.
    pub fn enum_ty(name: impl Into<String>) -> Ty {
        Ty::Nominal(NominalTy {
            name: name.into(),
            kind: NominalKind::Enum,
        })
    }

    /// Whether this is the `NoneType` type.
    pub fn is_none(&self) -> bool {
        matches!(self, Ty::Prim(Prim::None))
    }

    /// Whether this type is union-like (`Union` or `Optional`), i.e. has
    /// a member set rather than a single shape.
    pub fn is_union_like(&self) -> bool {
        matches!(self, Ty::Union(_) | Ty::Optional(_))
    }

    /// The annotation-form rendering used in membership error messages:
    /// `List[int]`, `Dict[str, int]`, `Optional[int]`,
    /// `Union[List[int], Dict[str, int]]`, `None`.
    pub fn annotation_str(&self) -> String {
        match self {
            Ty::Prim(p) => p.annotation_name().to_string(),
            Ty::List(elem) => format!("List[{}]", elem.annotation_str()),
            Ty::Dict(key, value) => {
                format!("Dict[{}, {}]", key.annotation_str(), value.annotation_str())
            }
            Ty::Tuple(elems) => {
                let parts: Vec<String> = elems.iter().map(|e| e.annotation_str()).collect();
                format!("Tuple[{}]", parts.join(", "))
            }
            Ty::Optional(inner) => format!("Optional[{}]", inner.annotation_str()),
            Ty::Nominal(n) => n.name.clone(),
            Ty::Union(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.annotation_str()).collect();
                format!("Union[{}]", parts.join(", "))
            }
            Ty::Never => "Never".to_string(),
        }
    }

    /// Rank used as the major key of the canonical union member order:
    /// enums, then Tensor, tuples, lists, dicts, the numeric primitives,
    /// NoneType, str, bool, and classes last. `Optional`, `Union`, and
    /// `Never` never appear as canonical union members; their ranks exist
    /// only to keep the order total.
    fn union_sort_rank(&self) -> u8 {
        match self {
            Ty::Nominal(n) if n.kind == NominalKind::Enum => 0,
            Ty::Prim(Prim::Tensor) => 1,
            Ty::Tuple(_) => 2,
            Ty::List(_) => 3,
            Ty::Dict(..) => 4,
            Ty::Prim(Prim::Float) => 5,
            Ty::Prim(Prim::Complex) => 6,
            Ty::Prim(Prim::Int) => 7,
            Ty::Prim(Prim::None) => 8,
            Ty::Prim(Prim::Str) => 9,
            Ty::Prim(Prim::Bool) => 10,
            Ty::Optional(_) => 11,
            Ty::Nominal(_) => 12,
            Ty::Union(_) => 13,
            Ty::Never => 14,
        }
    }
}

/// Total canonical order over union members: kind rank, then rendered
/// signature. Stable across permutations of the source annotation, which
/// keeps error messages deterministic.
pub(crate) fn canonical_cmp(a: &Ty, b: &Ty) -> Ordering {
    a.union_sort_rank()
        .cmp(&b.union_sort_rank())
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// Render the canonical signature of a type (the `Display` form).
pub fn render_signature(ty: &Ty) -> String {
    ty.to_string()
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Prim(p) => write!(f, "{}", p.name()),
            Ty::List(elem) => write!(f, "{}[]", elem),
            Ty::Dict(key, value) => write!(f, "Dict({}, {})", key, value),
            Ty::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
            Ty::Optional(inner) => write!(f, "{}?", inner),
            Ty::Nominal(n) => write!(f, "{}", n.name),
            Ty::Union(members) => {
                write!(f, "Union[")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", m)?;
                }
                write!(f, "]")
            }
            Ty::Never => write!(f, "Never"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
