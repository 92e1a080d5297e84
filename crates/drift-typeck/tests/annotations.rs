//! Integration tests for annotation lowering.
//!
//! Lowering validates constructor arity, resolves nominal names through
//! the registry, normalizes unions on construction, and enforces the
//! Dict key policy.

use rowan::TextRange;
use rustc_hash::FxHashMap;

use drift_typeck::annot::{lower_annotation, Annotation, EmptyRegistry, NominalRegistry};
use drift_typeck::error::TypeError;
use drift_typeck::subtype::NoHierarchy;
use drift_typeck::ty::{NominalKind, Ty};

// ── Helpers ────────────────────────────────────────────────────────────

struct FakeRegistry {
    kinds: FxHashMap<String, NominalKind>,
}

impl FakeRegistry {
    fn new(entries: &[(&str, NominalKind)]) -> Self {
        FakeRegistry {
            kinds: entries
                .iter()
                .map(|(n, k)| (n.to_string(), *k))
                .collect(),
        }
    }
}

impl NominalRegistry for FakeRegistry {
    fn kind_of(&self, qualified_name: &str) -> Option<NominalKind> {
        self.kinds.get(qualified_name).copied()
    }
}

fn span() -> TextRange {
    TextRange::new(0.into(), 20.into())
}

fn lower(annot: &Annotation) -> Result<Ty, TypeError> {
    lower_annotation(annot, &EmptyRegistry, &NoHierarchy, span())
}

// ── Names & Containers ─────────────────────────────────────────────────

#[test]
fn test_primitive_names_lower() {
    assert_eq!(lower(&Annotation::name("int")).unwrap(), Ty::int());
    assert_eq!(lower(&Annotation::name("str")).unwrap(), Ty::str());
    assert_eq!(lower(&Annotation::name("Tensor")).unwrap(), Ty::tensor());
    assert_eq!(lower(&Annotation::name("None")).unwrap(), Ty::none());
    assert_eq!(lower(&Annotation::name("NoneType")).unwrap(), Ty::none());
}

#[test]
fn test_nested_containers_lower() {
    // List[Dict[str, Optional[int]]]
    let annot = Annotation::generic(
        "List",
        vec![Annotation::generic(
            "Dict",
            vec![
                Annotation::name("str"),
                Annotation::generic("Optional", vec![Annotation::name("int")]),
            ],
        )],
    );
    assert_eq!(
        lower(&annot).unwrap(),
        Ty::list(Ty::dict(Ty::str(), Ty::optional(Ty::int())))
    );
}

#[test]
fn test_nominal_names_resolve_through_registry() {
    let registry = FakeRegistry::new(&[
        ("test.Color", NominalKind::Enum),
        ("app.Dog", NominalKind::Class),
    ]);
    let color = lower_annotation(
        &Annotation::name("test.Color"),
        &registry,
        &NoHierarchy,
        span(),
    )
    .unwrap();
    assert_eq!(color, Ty::enum_ty("test.Color"));

    let dog =
        lower_annotation(&Annotation::name("app.Dog"), &registry, &NoHierarchy, span()).unwrap();
    assert_eq!(dog, Ty::class_ty("app.Dog"));
}

#[test]
fn test_unknown_name_is_an_error() {
    let err = lower(&Annotation::name("Mystery")).unwrap_err();
    assert!(matches!(err, TypeError::UnknownTypeName { .. }));
    assert_eq!(err.to_string(), "unknown type name `Mystery`");
}

// ── Union Lowering Normalizes ──────────────────────────────────────────

#[test]
fn test_union_annotation_is_normalized_on_construction() {
    // Union[Union[int, str], float] -> Union[float, int, str]
    let annot = Annotation::generic(
        "Union",
        vec![
            Annotation::generic(
                "Union",
                vec![Annotation::name("int"), Annotation::name("str")],
            ),
            Annotation::name("float"),
        ],
    );
    let t = lower(&annot).unwrap();
    assert_eq!(format!("{}", t), "Union[float, int, str]");
}

#[test]
fn test_union_of_one_vanishes() {
    let annot = Annotation::generic("Union", vec![Annotation::name("int")]);
    assert_eq!(lower(&annot).unwrap(), Ty::int());
}

#[test]
fn test_union_int_none_lowers_to_optional() {
    let annot = Annotation::generic(
        "Union",
        vec![Annotation::name("int"), Annotation::name("None")],
    );
    assert_eq!(lower(&annot).unwrap(), Ty::optional(Ty::int()));
}

#[test]
fn test_optional_of_union_lowers_flat() {
    let annot = Annotation::generic(
        "Optional",
        vec![Annotation::generic(
            "Union",
            vec![Annotation::name("int"), Annotation::name("str")],
        )],
    );
    let t = lower(&annot).unwrap();
    assert_eq!(format!("{}", t), "Union[int, NoneType, str]");
}

// ── Malformed Shapes ───────────────────────────────────────────────────

#[test]
fn test_wrong_arity_is_rejected() {
    let err = lower(&Annotation::generic(
        "List",
        vec![Annotation::name("int"), Annotation::name("str")],
    ))
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed annotation: `List` expects exactly 1 type argument(s), found 2"
    );

    let err = lower(&Annotation::generic("Dict", vec![Annotation::name("int")])).unwrap_err();
    assert!(matches!(
        err,
        TypeError::MalformedAnnotation { found: 1, .. }
    ));

    let err = lower(&Annotation::generic("Optional", vec![])).unwrap_err();
    assert!(matches!(
        err,
        TypeError::MalformedAnnotation { found: 0, .. }
    ));
}

#[test]
fn test_empty_union_annotation_is_rejected() {
    let err = lower(&Annotation::generic("Union", vec![])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed annotation: `Union` expects at least 1 type argument(s), found 0"
    );
}

// ── Dict Key Policy ────────────────────────────────────────────────────

#[test]
fn test_union_as_dict_key_is_rejected() {
    // Dict[Union[int, str], str]
    let annot = Annotation::generic(
        "Dict",
        vec![
            Annotation::generic(
                "Union",
                vec![Annotation::name("int"), Annotation::name("str")],
            ),
            Annotation::name("str"),
        ],
    );
    let err = lower(&annot).unwrap_err();
    assert!(matches!(err, TypeError::UnsupportedUnionUsage { .. }));
    assert!(err
        .to_string()
        .contains("only int, float, complex, Tensor and string keys are supported"));
}

#[test]
fn test_optional_as_dict_key_is_rejected() {
    let annot = Annotation::generic(
        "Dict",
        vec![
            Annotation::generic("Optional", vec![Annotation::name("int")]),
            Annotation::name("str"),
        ],
    );
    assert!(matches!(
        lower(&annot).unwrap_err(),
        TypeError::UnsupportedUnionUsage { .. }
    ));
}

#[test]
fn test_union_as_dict_value_is_fine() {
    let annot = Annotation::generic(
        "Dict",
        vec![
            Annotation::name("str"),
            Annotation::generic(
                "Union",
                vec![Annotation::name("int"), Annotation::name("str")],
            ),
        ],
    );
    let t = lower(&annot).unwrap();
    assert_eq!(format!("{}", t), "Dict(str, Union[int, str])");
}
