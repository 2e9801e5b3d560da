//! Options declared on records and bound to their fields.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use clitree::tags::{tagged_opts, tagged_opts_with_types, Field, Tagged};
use clitree::{CliError, Command, OptType, TagError, TypeRegistry, Value};
use common::{args, captured};

struct Settings {
    name: String,
    level: i64,
    verbose: bool,
    scale: f64,
}

impl Tagged for Settings {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::string("name", |s: &mut Settings| &mut s.name).tag("name=name aliases=n"),
            Field::int("level", |s: &mut Settings| &mut s.level).tag("name=level default='7'"),
            Field::bool("verbose", |s: &mut Settings| &mut s.verbose)
                .tag("name=verbose aliases=v desc='say more'"),
            Field::float("scale", |s: &mut Settings| &mut s.scale).tag("default=1.5"),
        ]
    }
}

fn settings() -> Rc<RefCell<Settings>> {
    Rc::new(RefCell::new(Settings {
        name: String::new(),
        level: 0,
        verbose: false,
        scale: 0.0,
    }))
}

#[test]
fn test_default_installed_before_parsing_then_overwritten() {
    let record = settings();
    let opts = tagged_opts(&record).unwrap();
    assert_eq!(record.borrow().level, 7);
    assert_eq!(record.borrow().scale, 1.5);

    let tree = Command::new("tool").with_opts(opts).build();
    let mut cap = captured();
    let rest = tree
        .root()
        .parse(&mut cap.ctx, &args(&["-level", "9", "-v", "-n", "wilma", "left"]))
        .into_result()
        .unwrap();
    assert_eq!(rest, args(&["left"]));

    let rec = record.borrow();
    assert_eq!(rec.level, 9);
    assert!(rec.verbose);
    assert_eq!(rec.name, "wilma");
    assert_eq!(tree.root().opt("level").unwrap().default(), Some(&Value::Int(7)));
}

#[test]
fn test_bad_value_leaves_field_alone() {
    let record = settings();
    let tree = Command::new("tool").with_opts(tagged_opts(&record).unwrap()).build();
    let mut cap = captured();
    let err = tree
        .root()
        .parse(&mut cap.ctx, &args(&["-level", "lots"]))
        .into_result()
        .unwrap_err();
    assert!(matches!(
        err.iter().next(),
        Some(CliError::InvalidOptionValue { option, .. }) if option == "level"
    ));
    assert_eq!(record.borrow().level, 7);
}

struct Pairs {
    last: Value,
}

impl Tagged for Pairs {
    fn fields() -> Vec<Field<Self>> {
        vec![Field::any("last", |p: &mut Pairs| &mut p.last)
            .tag("name=kv type=pair desc='key=value'")]
    }
}

#[test]
fn test_custom_type_writes_through_value_field() {
    let types = TypeRegistry::new().with_type(
        "pair",
        OptType::func("pair", |text| match text.split_once('=') {
            Some((k, v)) => Ok(Value::Str(format!("{k}:{v}"))),
            None => Err(CliError::usage("-kv expected key=value")),
        }),
    );
    let record = Rc::new(RefCell::new(Pairs { last: Value::Unit }));
    let opts = tagged_opts_with_types(&record, &types).unwrap();
    let tree = Command::new("tool").with_opts(opts).build();
    let mut cap = captured();

    let parsed = tree.root().parse(&mut cap.ctx, &args(&["-kv", "a=b"]));
    assert!(parsed.is_ok());
    assert_eq!(record.borrow().last, Value::Str("a:b".into()));

    let err = tree
        .root()
        .parse(&mut cap.ctx, &args(&["-kv", "oops"]))
        .into_result()
        .unwrap_err();
    assert!(err.is_usage());
}

struct Mismatched {
    count: i64,
}

impl Tagged for Mismatched {
    fn fields() -> Vec<Field<Self>> {
        vec![Field::int("count", |m: &mut Mismatched| &mut m.count)
            .tag("name=count type=string")]
    }
}

#[test]
fn test_declared_type_must_agree_with_field() {
    let record = Rc::new(RefCell::new(Mismatched { count: 0 }));
    let err = tagged_opts(&record).unwrap_err();
    assert!(matches!(err, TagError::TypeConflict { inferred: "int", .. }));
    assert_eq!(record.borrow().count, 0);
}
