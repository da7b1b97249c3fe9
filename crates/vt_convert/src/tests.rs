//! Behavior of the conversion engine, end to end.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use vt_reflect::Reflect;
use vt_reflect::derive::Reflect;
use vt_reflect::hook::{ConvertFrom, ConvertTo, HookError};
use vt_reflect::info::ReflectKind;
use vt_reflect::ops::{DynamicStruct, Struct};

use crate::{ConvertError, ConvertOptions, Converter, convert, convert_into, must_convert};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Reflect, Default, Debug, Clone, PartialEq)]
struct User {
    id: u64,
    name: String,
    email: Option<String>,
    tags: Vec<String>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct UserCopy {
    id: u64,
    name: String,
    email: Option<String>,
    tags: Vec<String>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct UserSummary {
    id: u64,
    name: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct UserDetails {
    id: u64,
    name: String,
    email: Option<String>,
    tags: Vec<String>,
    karma: i32,
}

#[derive(Reflect, Default, Debug, Clone, PartialEq)]
struct Label {
    text: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct MaybeLabel {
    text: Option<String>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Profile {
    user: User,
    label: Label,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct ProfileView {
    user: UserSummary,
    label: MaybeLabel,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct ProfileRef {
    user: Option<Box<UserSummary>>,
    label: Box<MaybeLabel>,
}

fn sample_user() -> User {
    User {
        id: 42,
        name: "ada".to_string(),
        email: Some("ada@example.com".to_string()),
        tags: vec!["admin".to_string(), "ops".to_string()],
    }
}

fn label(text: &str) -> Label {
    Label {
        text: text.to_string(),
    }
}

// -----------------------------------------------------------------------------
// Projection

#[test]
fn identical_fields_are_cloned() {
    let user = sample_user();
    let copy: UserCopy = convert_into(&user).unwrap();

    assert_eq!(copy.id, user.id);
    assert_eq!(copy.name, user.name);
    assert_eq!(copy.email, user.email);
    assert_eq!(copy.tags, user.tags);
}

#[test]
fn subset_projection() {
    let summary: UserSummary = convert_into(&sample_user()).unwrap();
    assert_eq!(
        summary,
        UserSummary {
            id: 42,
            name: "ada".to_string(),
        }
    );
}

#[test]
fn superset_keeps_unmatched_fields() {
    let mut details = UserDetails {
        karma: 5,
        ..UserDetails::default()
    };
    convert(&sample_user(), &mut details).unwrap();

    assert_eq!(details.id, 42);
    assert_eq!(details.tags.len(), 2);
    assert_eq!(details.karma, 5);
}

#[test]
fn same_type_is_copied() {
    let mut value = 0_i32;
    convert(&7_i32, &mut value).unwrap();
    assert_eq!(value, 7);

    let mut user = User::default();
    convert(&sample_user(), &mut user).unwrap();
    assert_eq!(user, sample_user());
}

// -----------------------------------------------------------------------------
// Indirection

#[test]
fn value_into_indirection() {
    let mut maybe = MaybeLabel::default();
    convert(&label("a"), &mut maybe).unwrap();
    assert_eq!(maybe.text.as_deref(), Some("a"));

    let mut number: Option<Box<u8>> = None;
    convert(&3_u8, &mut number).unwrap();
    assert_eq!(number, Some(Box::new(3)));
}

#[test]
fn indirection_into_value() {
    let maybe = MaybeLabel {
        text: Some("b".to_string()),
    };
    let plain: Label = convert_into(&maybe).unwrap();
    assert_eq!(plain.text, "b");
}

#[test]
fn absent_source_leaves_destination() {
    let mut plain = label("keep");
    convert(&MaybeLabel::default(), &mut plain).unwrap();
    assert_eq!(plain.text, "keep");

    let absent: Option<User> = None;
    let mut summary = UserSummary {
        id: 1,
        name: "old".to_string(),
    };
    convert(&absent, &mut summary).unwrap();
    assert_eq!(summary.id, 1);
    assert_eq!(summary.name, "old");
}

#[test]
fn nested_structs() {
    let profile = Profile {
        user: sample_user(),
        label: label("hello"),
    };

    let view: ProfileView = convert_into(&profile).unwrap();
    assert_eq!(view.user.id, 42);
    assert_eq!(view.label.text.as_deref(), Some("hello"));

    let by_ref: ProfileRef = convert_into(&profile).unwrap();
    let user = by_ref.user.unwrap();
    assert_eq!(user.name, "ada");
    assert_eq!(by_ref.label.text.as_deref(), Some("hello"));
}

// -----------------------------------------------------------------------------
// Sequence

#[test]
fn sequence_keeps_order() {
    let source = vec![label("a"), label("b"), label("c")];
    let mut destination = vec![MaybeLabel::default()];
    convert(&source, &mut destination).unwrap();

    let texts = destination
        .iter()
        .map(|item| item.text.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(texts, [Some("a"), Some("b"), Some("c")]);
}

#[test]
fn sequence_of_indirections() {
    let source = vec![Box::new(label("x")), Box::new(label("y"))];
    let destination: Vec<Option<MaybeLabel>> = convert_into(&source).unwrap();

    assert_eq!(destination.len(), 2);
    let second = destination[1].as_ref().unwrap();
    assert_eq!(second.text.as_deref(), Some("y"));
}

#[test]
fn absent_items_become_zero() {
    let source = vec![Some(label("x")), None];
    let destination: Vec<MaybeLabel> = convert_into(&source).unwrap();
    assert_eq!(
        destination,
        [
            MaybeLabel {
                text: Some("x".to_string())
            },
            MaybeLabel::default(),
        ]
    );
}

#[test]
fn same_item_type_across_lists() {
    let source = vec!["a".to_string(), "b".to_string()];
    let mut destination: VecDeque<String> = VecDeque::from(["z".to_string()]);
    convert(&source, &mut destination).unwrap();
    assert_eq!(destination, ["a", "b"]);

    let mut emptied = vec![label("old")];
    convert(&Vec::<Label>::new(), &mut emptied).unwrap();
    assert!(emptied.is_empty());
}

#[test]
fn mismatched_scalar_items_are_skipped() {
    let mut destination = vec![7_i64];
    convert(&vec![1_i32, 2], &mut destination).unwrap();
    assert_eq!(destination, [7]);
}

#[derive(Reflect, Default, Debug)]
struct Tags {
    tags: Vec<String>,
}

#[derive(Reflect, Default, Debug)]
struct MaybeTags {
    tags: Vec<Option<String>>,
}

#[test]
fn scalar_items_convert_through_indirections() {
    let source = Tags {
        tags: vec!["a".to_string(), "b".to_string()],
    };
    let maybe: MaybeTags = convert_into(&source).unwrap();
    assert_eq!(maybe.tags, [Some("a".to_string()), Some("b".to_string())]);

    let source = MaybeTags {
        tags: vec![Some("x".to_string()), None],
    };
    let tags: Tags = convert_into(&source).unwrap();
    assert_eq!(tags.tags, ["x", ""]);
}

// -----------------------------------------------------------------------------
// Hooks

#[derive(Reflect, Default, Debug)]
#[reflect(convert_to)]
struct Celsius {
    degrees: f64,
}

#[derive(Reflect, Default, Debug)]
#[reflect(convert_from)]
struct Fahrenheit {
    degrees: f64,
}

#[derive(Reflect, Default, Debug)]
struct Kelvin {
    degrees: f64,
}

#[derive(Reflect, Default, Debug)]
struct Plain {
    degrees: f64,
}

#[derive(Reflect, Default, Debug)]
struct Sensor {
    degrees: f64,
}

#[derive(Reflect, Default, Debug)]
struct Weather {
    temperature: Celsius,
}

#[derive(Reflect, Default, Debug)]
struct Report {
    temperature: Option<Fahrenheit>,
}

#[derive(Debug)]
struct Frozen;

impl fmt::Display for Frozen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sensor is frozen")
    }
}

impl core::error::Error for Frozen {}

impl ConvertTo for Celsius {
    fn convert_to(&self, target: &mut dyn Reflect) -> Result<bool, HookError> {
        if let Some(reading) = target.downcast_mut::<f64>() {
            *reading = self.degrees;
            return Ok(true);
        }
        match target.downcast_mut::<Fahrenheit>() {
            Some(out) => {
                out.degrees = self.degrees * 1.8 + 32.0;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ConvertFrom for Fahrenheit {
    fn convert_from(&mut self, source: &dyn Reflect) -> Result<bool, HookError> {
        if source.is::<Celsius>() {
            self.degrees = -1.0;
            return Ok(true);
        }
        if let Some(kelvin) = source.downcast_ref::<Kelvin>() {
            self.degrees = (kelvin.degrees - 273.15) * 1.8 + 32.0;
            return Ok(true);
        }
        if source.is::<Sensor>() {
            return Err(Box::new(Frozen));
        }
        Ok(false)
    }
}

#[test]
fn convert_to_runs_first() {
    let mut f = Fahrenheit::default();
    convert(&Celsius { degrees: 100.0 }, &mut f).unwrap();
    assert_eq!(f.degrees, 212.0);
}

#[test]
fn convert_to_wins_over_mismatched_shapes() {
    let mut reading = 0.0_f64;
    let err = convert(&Plain { degrees: 21.5 }, &mut reading).unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));

    convert(&Celsius { degrees: 21.5 }, &mut reading).unwrap();
    assert_eq!(reading, 21.5);

    let mut lazy: Option<f64> = None;
    convert(&Celsius { degrees: 3.0 }, &mut lazy).unwrap();
    assert_eq!(lazy, Some(3.0));
}

#[test]
fn unhandled_hooks_fall_through() {
    let plain: Plain = convert_into(&Celsius { degrees: 30.0 }).unwrap();
    assert_eq!(plain.degrees, 30.0);

    let f: Fahrenheit = convert_into(&Plain { degrees: 5.0 }).unwrap();
    assert_eq!(f.degrees, 5.0);
}

#[test]
fn convert_from_runs_without_convert_to() {
    let f: Fahrenheit = convert_into(&Kelvin { degrees: 273.15 }).unwrap();
    assert_eq!(f.degrees, 32.0);
}

#[test]
fn hooks_on_nested_values() {
    let weather = Weather {
        temperature: Celsius { degrees: 100.0 },
    };
    let report: Report = convert_into(&weather).unwrap();
    assert_eq!(report.temperature.unwrap().degrees, 212.0);
}

#[test]
fn hook_errors_pass_through() {
    let mut f = Fahrenheit { degrees: 1.0 };
    let err = convert(&Sensor { degrees: 0.0 }, &mut f).unwrap_err();
    assert_eq!(err.to_string(), "sensor is frozen");

    let hook_err = err.into_hook_error().unwrap();
    assert!(hook_err.downcast_ref::<Frozen>().is_some());
    assert_eq!(f.degrees, 1.0);
}

// -----------------------------------------------------------------------------
// Errors

#[derive(Reflect, Default, Debug)]
struct Named {
    label: Label,
}

#[derive(Reflect, Default, Debug)]
struct NamedText {
    label: Option<String>,
}

#[derive(Reflect, Default, Debug)]
struct TextId {
    id: String,
}

#[derive(Reflect, Default, Debug)]
struct SharedHolder {
    user: Arc<UserSummary>,
}

#[test]
fn unsupported_leaves_destination() {
    let mut text: Option<String> = None;
    let err = convert(&label("a"), &mut text).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Unsupported {
            from: ReflectKind::Struct,
            to: ReflectKind::Opaque,
            ..
        }
    ));
    assert!(text.is_none());

    let mut named = NamedText::default();
    let err = convert(&Named { label: label("a") }, &mut named).unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));
    assert!(named.label.is_none());

    let err = convert_into::<TextId>(&sample_user()).unwrap_err();
    assert!(err.to_string().contains("u64"));
}

#[test]
fn declined_hooks_leave_destination() {
    let mut bytes: Option<Box<Vec<u8>>> = None;
    let err = convert(&Celsius { degrees: 1.0 }, &mut bytes).unwrap_err();
    assert!(matches!(err, ConvertError::Unsupported { .. }));
    assert!(bytes.is_none());

    let mut report: Option<Fahrenheit> = None;
    let err = convert(&Sensor { degrees: 0.0 }, &mut report).unwrap_err();
    assert!(err.into_hook_error().is_ok());
    assert!(report.is_none());
}

#[test]
fn shared_destination_is_invalid() {
    let user = sample_user();

    let mut destination = Arc::new(UserSummary::default());
    let other = Arc::clone(&destination);
    let err = convert(&user, &mut destination).unwrap_err();
    assert!(err.is_invalid_target());
    assert_eq!(*other, UserSummary::default());

    drop(other);
    convert(&user, &mut destination).unwrap();
    assert_eq!(destination.id, 42);
}

#[test]
fn shared_nested_destination_is_invalid() {
    let mut holder = SharedHolder::default();
    let other = Arc::clone(&holder.user);

    let profile = Profile {
        user: sample_user(),
        label: label("l"),
    };
    let err = convert(&profile, &mut holder).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidTarget { .. }));
    assert_eq!(other.id, 0);
}

#[test]
fn depth_limit() {
    let profile = Profile::default();
    let shallow = Converter::with_options(ConvertOptions::default().with_max_depth(1));

    let err = shallow.convert_into::<ProfileView>(&profile).unwrap_err();
    assert!(matches!(err, ConvertError::DepthLimit { limit: 1 }));

    let deep = Converter::with_options(ConvertOptions::default().with_max_depth(2));
    assert!(deep.convert_into::<ProfileView>(&profile).is_ok());
}

#[test]
#[should_panic(expected = "cannot convert")]
fn must_convert_panics() {
    let mut text = String::new();
    must_convert(&1_u8, &mut text);
}

#[test]
fn converter_is_shareable() {
    fn assert_shareable<T: Send + Sync + Copy + 'static>() {}
    assert_shareable::<Converter>();

    let converter = Converter::new();
    assert_eq!(converter.options().max_depth, ConvertOptions::DEFAULT_MAX_DEPTH);
    let summary: UserSummary = converter.convert_into(&sample_user()).unwrap();
    assert_eq!(summary.id, 42);
}

// -----------------------------------------------------------------------------
// Dynamic structs

#[test]
fn dynamic_struct_source_and_destination() {
    let mut dynamic = DynamicStruct::new();
    dynamic.insert("id", 7_u64);
    dynamic.insert("name", "dyn".to_string());
    dynamic.insert("unknown", 1_u8);

    let summary: UserSummary = convert_into(&dynamic).unwrap();
    assert_eq!(summary.id, 7);
    assert_eq!(summary.name, "dyn");

    let mut target = DynamicStruct::new();
    target.insert("name", String::new());
    target.insert("email", Option::<String>::None);
    convert(&sample_user(), &mut target).unwrap();

    let target: &dyn Struct = &target;
    assert_eq!(target.field_as::<String>("name").unwrap(), "ada");
    assert_eq!(
        target.field_as::<Option<String>>("email").unwrap().as_deref(),
        Some("ada@example.com")
    );
    assert!(target.field("id").is_none());
}

// -----------------------------------------------------------------------------
// Embedded fields

#[derive(Reflect, Default, Debug, PartialEq)]
struct Audit {
    created_by: String,
    revision: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Document {
    #[reflect(embed)]
    audit: Audit,
    title: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct LazyDocument {
    #[reflect(embed)]
    audit: Option<Box<Audit>>,
    title: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct FlatDocument {
    created_by: String,
    revision: u32,
    title: String,
}

#[derive(Reflect, Default, Debug)]
struct Titled {
    title: String,
}

fn flat_document() -> FlatDocument {
    FlatDocument {
        created_by: "bob".to_string(),
        revision: 3,
        title: "notes".to_string(),
    }
}

#[test]
fn embedded_source_fields_are_promoted() {
    let document = Document {
        audit: Audit {
            created_by: "bob".to_string(),
            revision: 3,
        },
        title: "notes".to_string(),
    };
    let flat: FlatDocument = convert_into(&document).unwrap();
    assert_eq!(flat, flat_document());
}

#[test]
fn embedded_destination_fields_are_promoted() {
    let document: Document = convert_into(&flat_document()).unwrap();
    assert_eq!(document.audit.created_by, "bob");
    assert_eq!(document.audit.revision, 3);
    assert_eq!(document.title, "notes");
}

#[test]
fn absent_embedded_destination_is_allocated_on_write() {
    let document: LazyDocument = convert_into(&flat_document()).unwrap();
    assert_eq!(
        document.audit,
        Some(Box::new(Audit {
            created_by: "bob".to_string(),
            revision: 3,
        }))
    );

    let untouched: LazyDocument = convert_into(&Titled {
        title: "t".to_string(),
    })
    .unwrap();
    assert!(untouched.audit.is_none());
    assert_eq!(untouched.title, "t");

    let mut flat = flat_document();
    convert(&LazyDocument::default(), &mut flat).unwrap();
    assert_eq!(flat.created_by, "bob");
    assert_eq!(flat.title, "");
}

#[derive(Reflect, Default, Debug)]
struct Owner {
    id: u64,
}

#[derive(Reflect, Default, Debug)]
struct Editor {
    id: u64,
}

#[derive(Reflect, Default, Debug)]
struct Shared {
    #[reflect(embed)]
    owner: Owner,
    #[reflect(embed)]
    editor: Editor,
    note: String,
}

#[derive(Reflect, Default, Debug)]
struct Shadowed {
    id: u64,
    #[reflect(embed)]
    owner: Owner,
}

#[derive(Reflect, Default, Debug)]
struct IdNote {
    id: u64,
    note: String,
}

#[test]
fn ambiguous_promoted_names_are_skipped() {
    let shared = Shared {
        owner: Owner { id: 1 },
        editor: Editor { id: 2 },
        note: "n".to_string(),
    };
    let mut id_note = IdNote {
        id: 9,
        note: String::new(),
    };
    convert(&shared, &mut id_note).unwrap();
    assert_eq!(id_note.id, 9);
    assert_eq!(id_note.note, "n");

    let mut shared = Shared::default();
    convert(
        &IdNote {
            id: 5,
            note: "m".to_string(),
        },
        &mut shared,
    )
    .unwrap();
    assert_eq!(shared.owner.id, 0);
    assert_eq!(shared.editor.id, 0);
    assert_eq!(shared.note, "m");
}

#[test]
fn shallow_names_shadow_promoted_ones() {
    let shadowed = Shadowed {
        id: 1,
        owner: Owner { id: 2 },
    };
    let id_note: IdNote = convert_into(&shadowed).unwrap();
    assert_eq!(id_note.id, 1);

    let shadowed: Shadowed = convert_into(&IdNote {
        id: 3,
        note: String::new(),
    })
    .unwrap();
    assert_eq!(shadowed.id, 3);
    assert_eq!(shadowed.owner.id, 0);
}

#[derive(Reflect, Default, Debug)]
struct Handover {
    #[reflect(embed)]
    owner: Owner,
    #[reflect(embed)]
    editor: Option<Box<Editor>>,
    note: String,
}

#[test]
fn promoted_names_ignore_absent_values() {
    let mut id_note = IdNote {
        id: 9,
        note: String::new(),
    };
    let handover = Handover {
        owner: Owner { id: 7 },
        editor: None,
        note: "n".to_string(),
    };
    convert(&handover, &mut id_note).unwrap();
    assert_eq!(id_note.id, 9);
    assert_eq!(id_note.note, "n");

    let handover = Handover {
        editor: Some(Box::new(Editor { id: 8 })),
        ..handover
    };
    convert(&handover, &mut id_note).unwrap();
    assert_eq!(id_note.id, 9);
}

#[derive(Reflect, Default, Debug)]
struct Node {
    value: u32,
    #[reflect(embed)]
    next: Option<Box<Node>>,
}

#[derive(Reflect, Default, Debug)]
struct Value {
    value: u32,
}

#[test]
fn self_embedding_types_terminate() {
    let node: Node = convert_into(&Value { value: 4 }).unwrap();
    assert_eq!(node.value, 4);
    assert!(node.next.is_none());

    let chain = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: None,
        })),
    };
    let value: Value = convert_into(&chain).unwrap();
    assert_eq!(value.value, 1);
}
