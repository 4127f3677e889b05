//! End-to-end runs through the full pipeline: JSON configuration in,
//! pre-condition pass, compilation, dispatch, and reports out.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;

use formcheck::prelude::*;

fn config_from_json(raw: serde_json::Value) -> FormConfig {
    FormConfig::new(FormConfig::fields_from_json(&raw).unwrap())
}

#[test]
fn required_field_with_empty_value_fails() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [{ "type": "required", "message": "${id} required" }]
    }]));
    let engine = Engine::new(StaticValues::new().with("u", ""));

    let report = engine.run_report(&config).unwrap();
    assert!(!report.passed);

    let field = &report.fields[0];
    assert_eq!(field.status, FieldStatus::Errors);
    assert_eq!(field.error_message.len(), 1);
    assert_eq!(field.error_message[0].rule, "required");
    assert_eq!(field.error_message[0].message, "u required");
}

#[test]
fn required_field_with_value_passes() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [{ "type": "required", "message": "${id} required" }]
    }]));
    let engine = Engine::new(StaticValues::new().with("u", "abc"));

    let report = engine.run_report(&config).unwrap();
    assert!(report.passed);
    assert_eq!(report.fields[0].status, FieldStatus::Success);
    assert!(report.fields[0].error_message.is_empty());
}

#[test]
fn empty_rules_abort_before_any_business_check() {
    let config = FormConfig::new([FieldDescriptor::new("u", "text", [])]);
    let engine = Engine::new(StaticValues::new().with("u", "abc"));

    let err = engine.run(&config).unwrap_err();
    match err {
        EngineError::Precondition { field_id, detail } => {
            assert_eq!(field_id, "u");
            assert_eq!(detail, "rules must not be empty");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn callback_receives_only_the_first_failing_field() {
    let seen: Rc<RefCell<Vec<FieldReport>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let fields = FormConfig::fields_from_json(&json!([
        {
            "id": "first",
            "type": "text",
            "rules": [{ "type": "required", "message": "${id} required" }]
        },
        {
            "id": "second",
            "type": "text",
            "rules": [{ "type": "minlength", "message": "min {length}", "length": 5 }]
        }
    ]))
    .unwrap();
    let config =
        FormConfig::new(fields).with_callback(move |report| sink.borrow_mut().push(report.clone()));

    let engine = Engine::new(StaticValues::new().with("first", "ok").with("second", "ab"));
    assert!(!engine.run(&config).unwrap());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].source.id, "second");
    assert_eq!(seen[0].error_message[0].message, "min 5");
}

#[test]
fn no_callback_on_a_passing_run() {
    let fired = Rc::new(RefCell::new(0_u32));
    let sink = Rc::clone(&fired);

    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [{ "type": "digits", "message": "digits only" }]
    }]));
    let config = FormConfig::new(config.fields).with_callback(move |_| *sink.borrow_mut() += 1);

    let engine = Engine::new(StaticValues::new().with("u", "0042"));
    assert!(engine.run(&config).unwrap());
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn report_echoes_declared_rules_and_strips_them_from_source() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [
            { "type": "required", "message": "r" },
            { "type": "zzz", "message": "never compiled" }
        ]
    }]));
    let engine = Engine::new(StaticValues::new().with("u", "abc"));

    let report = engine.run_report(&config).unwrap();
    let field = &report.fields[0];

    // The rule list is echoed as declared, unknown rules included.
    assert_eq!(field.rules.len(), 2);
    assert_eq!(field.rules[1].name, "zzz");

    let source = serde_json::to_value(&field.source).unwrap();
    assert_eq!(source, json!({ "id": "u", "type": "text" }));
}

#[test]
fn unknown_rule_only_field_passes_trivially() {
    let config = config_from_json(json!([{
        "id": "ghost",
        "type": "text",
        "rules": [{ "type": "zzz", "message": "never runs" }]
    }]));
    let engine = Engine::new(StaticValues::new());

    let report = engine.run_report(&config).unwrap();
    assert!(report.passed);
    assert_eq!(report.fields[0].status, FieldStatus::Success);
}

#[test]
fn repeated_runs_yield_identical_reports() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [
            { "type": "required", "message": "${id} required" },
            { "type": "maxlength", "message": "max {length}", "length": 2 }
        ]
    }]));
    let engine = Engine::new(StaticValues::new().with("u", "abc"));

    let first = engine.run_report(&config).unwrap();
    let second = engine.run_report(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn checkbox_group_counts_selections() {
    let config = config_from_json(json!([{
        "id": "toppings",
        "type": "checkbox",
        "rules": [
            { "type": "required", "message": "pick at least one" },
            { "type": "maxlength", "message": "at most {length}", "length": 3 }
        ]
    }]));

    let engine = Engine::new(
        StaticValues::new().with("toppings", FieldValue::Multi(vec!["onion".into()])),
    );
    assert!(engine.run(&config).unwrap());

    let engine = Engine::new(StaticValues::new().with("toppings", FieldValue::Multi(vec![])));
    let report = engine.run_report(&config).unwrap();
    assert!(!report.passed);
    assert_eq!(report.fields[0].error_message[0].rule, "required");

    let selections: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
    let engine = Engine::new(StaticValues::new().with("toppings", FieldValue::Multi(selections)));
    let report = engine.run_report(&config).unwrap();
    assert_eq!(report.fields[0].error_message[0].rule, "maxlength");
    assert_eq!(report.fields[0].error_message[0].message, "at most 3");
}

#[test]
fn duplicate_ids_mask_the_later_field() {
    // Both declared fields report, but both run the first field's checker.
    let config = config_from_json(json!([
        {
            "id": "twin",
            "type": "text",
            "rules": [{ "type": "digits", "message": "digits only" }]
        },
        {
            "id": "twin",
            "type": "text",
            "rules": [{ "type": "email", "message": "address only" }]
        }
    ]));
    let engine = Engine::new(StaticValues::new().with("twin", "1234"));

    let report = engine.run_report(&config).unwrap();
    assert!(report.passed);
    assert_eq!(report.fields.len(), 2);
    assert_eq!(report.fields[1].status, FieldStatus::Success);
}

#[test]
fn strict_numeric_bounds_reject_the_boundary_value() {
    let config = config_from_json(json!([
        {
            "id": "low",
            "type": "text",
            "rules": [{ "type": "min", "message": "must exceed {value}", "value": 10 }]
        },
        {
            "id": "high",
            "type": "text",
            "rules": [{ "type": "max", "message": "must stay below {value}", "value": 10 }]
        }
    ]));
    let engine = Engine::new(StaticValues::new().with("low", "10").with("high", "10"));

    let report = engine.run_report(&config).unwrap();
    assert!(!report.passed);
    assert_eq!(report.fields[0].error_message[0].message, "must exceed 10");
    assert_eq!(
        report.fields[1].error_message[0].message,
        "must stay below 10"
    );
}

#[test]
fn unresolvable_placeholder_is_left_intact() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [{ "type": "required", "message": "{foo} missing for ${id}" }]
    }]));
    let engine = Engine::new(StaticValues::new());

    let report = engine.run_report(&config).unwrap();
    assert_eq!(
        report.fields[0].error_message[0].message,
        "{foo} missing for u"
    );
}

#[test]
fn fields_from_json_rejects_malformed_configurations() {
    let missing_keys = json!([{ "id": "u" }]);
    assert!(matches!(
        FormConfig::fields_from_json(&missing_keys),
        Err(EngineError::Precondition { .. })
    ));

    let empty_rules = json!([{ "id": "u", "type": "text", "rules": [] }]);
    let err = FormConfig::fields_from_json(&empty_rules).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration for field 'u': rules must not be empty"
    );

    let not_an_array = json!({ "id": "u" });
    assert!(FormConfig::fields_from_json(&not_an_array).is_err());
}

#[test]
fn wire_report_shape_matches_the_declarative_form() {
    let config = config_from_json(json!([{
        "id": "u",
        "type": "text",
        "rules": [{ "type": "required", "message": "${id} required" }]
    }]));
    let engine = Engine::new(StaticValues::new());

    let report = engine.run_report(&config).unwrap();
    let wire = serde_json::to_value(&report.fields[0]).unwrap();
    assert_eq!(
        wire,
        json!({
            "source": { "id": "u", "type": "text" },
            "rules": [{ "type": "required", "message": "${id} required" }],
            "status": "errors",
            "errorMessage": [{ "type": "required", "message": "u required" }]
        })
    );
}
