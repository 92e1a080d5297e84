//! Lowering of raw annotation trees to types.
//!
//! The annotation parser (an external collaborator) delivers
//! syntactically-valid annotation trees; lowering turns them into
//! canonical [`Ty`] values, validating constructor arity, resolving
//! nominal names through the injected [`NominalRegistry`], and enforcing
//! the `Dict` key policy. Unions are normalized on construction, so the
//! lowered type of `Union[int, str, int]` is already `Union[int, str]`.

use rowan::TextRange;

use crate::error::TypeError;
use crate::subtype::{is_valid_dict_key_prim, ClassHierarchy};
use crate::ty::{NominalKind, NominalTy, Ty};
use crate::union::normalize_union;

/// A raw type annotation as written in source, pre-lowering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Annotation {
    /// A bare name: `int`, `str`, `app.Color`.
    Name(String),
    /// A subscripted constructor: `List[int]`, `Union[int, str]`.
    Generic(String, Vec<Annotation>),
}

impl Annotation {
    /// Shorthand for a bare name annotation.
    pub fn name(n: impl Into<String>) -> Annotation {
        Annotation::Name(n.into())
    }

    /// Shorthand for a subscripted annotation.
    pub fn generic(ctor: impl Into<String>, args: Vec<Annotation>) -> Annotation {
        Annotation::Generic(ctor.into(), args)
    }
}

/// Read-only view of the enum/class registry, supplied by the surrounding
/// compiler: resolves a qualified name to its nominal kind.
pub trait NominalRegistry {
    fn kind_of(&self, qualified_name: &str) -> Option<NominalKind>;
}

/// A registry that knows no nominal types.
pub struct EmptyRegistry;

impl NominalRegistry for EmptyRegistry {
    fn kind_of(&self, _qualified_name: &str) -> Option<NominalKind> {
        None
    }
}

/// Lower an annotation tree to a canonical type.
///
/// `span` is the source range of the whole annotation, attached to any
/// error raised while lowering it.
pub fn lower_annotation(
    annot: &Annotation,
    registry: &dyn NominalRegistry,
    classes: &dyn ClassHierarchy,
    span: TextRange,
) -> Result<Ty, TypeError> {
    match annot {
        Annotation::Name(name) => lower_name(name, registry, span),
        Annotation::Generic(ctor, args) => match ctor.as_str() {
            "List" => {
                check_arity(ctor, args, 1, span)?;
                Ok(Ty::list(lower_annotation(
                    &args[0], registry, classes, span,
                )?))
            }
            "Optional" => {
                check_arity(ctor, args, 1, span)?;
                Ok(Ty::optional(lower_annotation(
                    &args[0], registry, classes, span,
                )?))
            }
            "Dict" => {
                check_arity(ctor, args, 2, span)?;
                let key = lower_annotation(&args[0], registry, classes, span)?;
                ensure_valid_dict_key(&key, span)?;
                let value = lower_annotation(&args[1], registry, classes, span)?;
                Ok(Ty::dict(key, value))
            }
            "Tuple" => {
                let elems = args
                    .iter()
                    .map(|a| lower_annotation(a, registry, classes, span))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Ty::tuple(elems))
            }
            "Union" => {
                if args.is_empty() {
                    return Err(TypeError::MalformedAnnotation {
                        ctor: ctor.clone(),
                        expected: "at least 1".to_string(),
                        found: 0,
                        span,
                    });
                }
                let members = args
                    .iter()
                    .map(|a| lower_annotation(a, registry, classes, span))
                    .collect::<Result<Vec<_>, _>>()?;
                normalize_union(members, classes)
            }
            _ => Err(TypeError::UnknownTypeName {
                name: ctor.clone(),
                span,
            }),
        },
    }
}

fn lower_name(
    name: &str,
    registry: &dyn NominalRegistry,
    span: TextRange,
) -> Result<Ty, TypeError> {
    match name {
        "int" => Ok(Ty::int()),
        "float" => Ok(Ty::float()),
        "complex" => Ok(Ty::complex()),
        "bool" => Ok(Ty::bool()),
        "str" => Ok(Ty::str()),
        "Tensor" => Ok(Ty::tensor()),
        "None" | "NoneType" => Ok(Ty::none()),
        other => match registry.kind_of(other) {
            Some(kind) => Ok(Ty::Nominal(NominalTy {
                name: other.to_string(),
                kind,
            })),
            None => Err(TypeError::UnknownTypeName {
                name: other.to_string(),
                span,
            }),
        },
    }
}

fn check_arity(
    ctor: &str,
    args: &[Annotation],
    expected: usize,
    span: TextRange,
) -> Result<(), TypeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(TypeError::MalformedAnnotation {
            ctor: ctor.to_string(),
            expected: format!("exactly {}", expected),
            found: args.len(),
            span,
        })
    }
}

/// Unions are not yet usable as mapping keys; only a fixed set of
/// hashable primitive kinds is accepted.
fn ensure_valid_dict_key(key: &Ty, span: TextRange) -> Result<(), TypeError> {
    match key {
        Ty::Union(_) | Ty::Optional(_) => Err(TypeError::UnsupportedUnionUsage {
            key: key.clone(),
            span,
        }),
        Ty::Prim(p) if is_valid_dict_key_prim(*p) => Ok(()),
        // Non-union invalid keys (e.g. List) are rejected upstream by the
        // annotation parser; only union usage is policed here.
        _ => Ok(()),
    }
}
