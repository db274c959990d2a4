//! End-to-end validation through an explicit registry.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tessera_validator::prelude::*;

struct Person;
struct Address;
struct Customer;
struct Shipment;
struct Parcel;

fn person_registry() -> PipelineRegistry {
    let registry = PipelineRegistry::new();
    let person = registry.class_of::<Person>();
    person.field("name", DeclaredType::String).type_checked();
    person.field("age", DeclaredType::Number).type_checked();
    registry
}

fn validate(registry: &PipelineRegistry, class: ClassRef, data: &Value) -> Outcome<Instance> {
    Validator::new(registry)
        .create_instance(class, data)
        .expect("class is registered and data is an object")
}

fn messages(outcome: Outcome<Instance>) -> Vec<String> {
    outcome.expect_err("validation should fail").messages()
}

// ============================================================================
// TYPE CHECKS
// ============================================================================

#[test]
fn valid_person_is_accepted() {
    let registry = person_registry();
    let data = json!({"name": "Test", "age": -1});

    let instance = validate(&registry, ClassRef::of::<Person>(), &data).expect("valid");

    assert!(instance.is_instance_of::<Person>());
    assert_eq!(instance.to_value(), data);
}

#[test]
fn type_errors_are_reported_in_field_order() {
    let registry = person_registry();

    let outcome = validate(&registry, ClassRef::of::<Person>(), &json!({"name": 12}));

    assert_eq!(
        messages(outcome),
        vec![
            "validate-design-type(name): Expected `String`, but got `12`",
            "validate-design-type(age): Expected `Number`, but got `undefined`",
        ]
    );
}

#[test]
fn custom_rule_message_is_reported() {
    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("age", DeclaredType::Number)
        .custom_rule(|age: Option<&Value>| {
            Check::ensure(
                age.and_then(Value::as_f64).is_some_and(|age| age > 18.0),
                "Min Age 18",
            )
        });

    let class = ClassRef::of::<Person>();
    assert_eq!(
        messages(validate(&registry, class, &json!({"age": 12}))),
        vec!["custom-rule(age): Min Age 18"]
    );
    assert!(validate(&registry, class, &json!({"age": 30})).is_ok());
}

#[test]
fn rules_do_not_short_circuit_each_other() {
    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("name", DeclaredType::String)
        .validate_with(min_length(3))
        .validate_with(pattern("^[A-Z]").expect("valid regex"))
        .validate_with(one_of(vec![json!("Alice"), json!("Bob")]));

    let outcome = validate(&registry, ClassRef::of::<Person>(), &json!({"name": "al"}));

    assert_eq!(
        messages(outcome),
        vec![
            "min-length(name): must have a length of at least 3, got 2",
            "pattern(name): must match pattern `^[A-Z]`",
            r#"one-of(name): must be one of ["Alice", "Bob"], got "al""#,
        ]
    );
}

// ============================================================================
// PARSERS
// ============================================================================

#[test]
fn parser_runs_once_before_presence_short_circuit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("age", DeclaredType::Number)
        .custom_parser(move |age: Option<Value>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(Some(age.filter(Value::is_number).unwrap_or(Value::Null)))
        })
        .nullable()
        .type_checked();

    let instance = validate(&registry, ClassRef::of::<Person>(), &json!({})).expect("valid");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(instance.to_value(), json!({"age": null}));
}

#[test]
fn optional_field_still_runs_parsers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("nick", DeclaredType::String)
        .custom_parser(move |nick: Option<Value>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(nick)
        })
        .type_checked()
        .optional();

    let instance = validate(&registry, ClassRef::of::<Person>(), &json!({})).expect("valid");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!instance.contains("nick"));
}

#[test]
fn parsed_value_reaches_rules_and_instance() {
    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("age", DeclaredType::Number)
        .parse_with(to_number())
        .type_checked()
        .validate_with(in_range(0.0, 150.0));

    let class = ClassRef::of::<Person>();
    let instance = validate(&registry, class, &json!({"age": " 42 "})).expect("valid");
    assert_eq!(instance.to_value(), json!({"age": 42}));

    assert_eq!(
        messages(validate(&registry, class, &json!({"age": "old"}))),
        vec![r#"to-number(age): cannot convert "old" to a number"#]
    );
    assert_eq!(
        messages(validate(&registry, class, &json!({"age": "200"}))),
        vec!["in-range(age): must be between 0 and 150, got 200"]
    );
}

#[test]
fn default_parser_fills_missing_field() {
    let registry = PipelineRegistry::new();
    registry
        .class_of::<Person>()
        .field("role", DeclaredType::String)
        .parse_with(trim())
        .parse_with(default_to("member"))
        .type_checked();

    let instance = validate(&registry, ClassRef::of::<Person>(), &json!({})).expect("valid");

    assert_eq!(
        instance.get("role").and_then(FieldValue::as_json),
        Some(&json!("member"))
    );
}

// ============================================================================
// NESTED CLASSES
// ============================================================================

fn nested_registry() -> PipelineRegistry {
    let registry = PipelineRegistry::new();
    let address = registry.class_of::<Address>();
    address.field("street", DeclaredType::String).type_checked();
    address
        .field("zip", DeclaredType::String)
        .type_checked()
        .validate_with(min_length(4));

    let customer = registry.class_of::<Customer>();
    customer.field("name", DeclaredType::String).type_checked();
    customer
        .field("address", DeclaredType::class::<Address>())
        .type_checked();
    registry
}

#[test]
fn nested_object_becomes_nested_instance() {
    let registry = nested_registry();
    let data = json!({"name": "Ann", "address": {"street": "Main", "zip": "0150"}});

    let instance = validate(&registry, ClassRef::of::<Customer>(), &data).expect("valid");

    let address = instance
        .get("address")
        .and_then(FieldValue::as_instance)
        .expect("nested instance");
    assert!(address.is_instance_of::<Address>());
    assert_eq!(instance.to_value(), data);
}

#[test]
fn nested_errors_carry_field_prefix() {
    let registry = nested_registry();
    let data = json!({"name": 1, "address": {"zip": "01"}});

    let errors = validate(&registry, ClassRef::of::<Customer>(), &data).expect_err("invalid");

    assert_eq!(
        errors.messages(),
        vec![
            "validate-design-type(name): Expected `String`, but got `1`",
            "validate-nested-class(address): validate-design-type(street): Expected `String`, but got `undefined`",
            "validate-nested-class(address): min-length(zip): must have a length of at least 4, got 2",
        ]
    );
    let paths: Vec<String> = errors.iter().map(ValidationError::field_path).collect();
    assert_eq!(paths, vec!["name", "address.street", "address.zip"]);
}

#[test]
fn wrong_kind_for_nested_class_is_single_type_error() {
    let registry = nested_registry();
    let data = json!({"name": "Ann", "address": ["Main"]});

    let outcome = validate(&registry, ClassRef::of::<Customer>(), &data);

    assert_eq!(
        messages(outcome),
        vec![r#"validate-design-type(address): Expected `Address`, but got `["Main"]`"#]
    );
}

fn shipment_registry() -> PipelineRegistry {
    let registry = nested_registry();
    let shipment = registry.class_of::<Shipment>();
    shipment
        .field("billing", DeclaredType::class::<Address>())
        .type_checked()
        .nullable();
    shipment
        .field("delivery", DeclaredType::class::<Address>())
        .type_checked()
        .optional();
    shipment
        .field("origin", DeclaredType::class::<Address>())
        .type_checked();
    registry
}

#[test]
fn presence_flags_skip_nested_validation() {
    let registry = shipment_registry();
    let data = json!({"billing": null, "origin": {"street": "Main", "zip": "0150"}});

    let instance = validate(&registry, ClassRef::of::<Shipment>(), &data).expect("valid");

    assert_eq!(
        instance.get("billing").and_then(FieldValue::as_json),
        Some(&Value::Null)
    );
    assert!(!instance.contains("delivery"));
    assert!(
        instance
            .get("origin")
            .and_then(FieldValue::as_instance)
            .is_some_and(|origin| origin.is_instance_of::<Address>())
    );
}

#[test]
fn null_class_field_without_flag_is_single_type_error() {
    let registry = shipment_registry();
    let data = json!({"billing": null, "delivery": null, "origin": null});

    let outcome = validate(&registry, ClassRef::of::<Shipment>(), &data);

    assert_eq!(
        messages(outcome),
        vec![
            "validate-design-type(delivery): Expected `Address`, but got `null`",
            "validate-design-type(origin): Expected `Address`, but got `null`",
        ]
    );
}

#[test]
fn parser_shapes_class_field_before_recursion() {
    let registry = nested_registry();
    registry
        .class_of::<Parcel>()
        .field("address", DeclaredType::class::<Address>())
        .custom_parser(|value: Option<Value>| match value {
            Some(Value::String(s)) => match s.split_once('|') {
                Some((street, zip)) => Ok(Some(json!({"street": street, "zip": zip}))),
                None => Err(format!("expected `street|zip`, got {s:?}")),
            },
            other => Ok(other),
        })
        .type_checked();
    let class = ClassRef::of::<Parcel>();

    let instance = validate(&registry, class, &json!({"address": "Main|0150"})).expect("valid");
    let address = instance
        .get("address")
        .and_then(FieldValue::as_instance)
        .expect("nested instance");
    assert_eq!(address.to_value(), json!({"street": "Main", "zip": "0150"}));

    assert_eq!(
        messages(validate(&registry, class, &json!({"address": "Main|01"}))),
        vec!["validate-nested-class(address): min-length(zip): must have a length of at least 4, got 2"]
    );
    assert_eq!(
        messages(validate(&registry, class, &json!({"address": "Main"}))),
        vec![r#"custom-parser(address): expected `street|zip`, got "Main""#]
    );
}

// ============================================================================
// USAGE ERRORS
// ============================================================================

#[test]
fn usage_errors_are_not_field_errors() {
    let registry = person_registry();
    let validator = Validator::new(&registry);

    assert_eq!(
        validator
            .create_instance(ClassRef::of::<Address>(), &json!({}))
            .expect_err("unregistered"),
        UsageError::Unregistered { class: "Address" }
    );
    assert_eq!(
        validator
            .create_instance(ClassRef::of::<Person>(), &json!("Ann"))
            .expect_err("not an object"),
        UsageError::NotAnObject {
            class: "Person",
            found: "a string",
        }
    );
}

#[test]
fn errors_serialize_as_message_list() {
    let registry = person_registry();
    let errors = validate(&registry, ClassRef::of::<Person>(), &json!({"name": "Ann"}))
        .expect_err("age missing");

    assert_eq!(
        serde_json::to_value(&errors).expect("serializable"),
        json!(["validate-design-type(age): Expected `Number`, but got `undefined`"])
    );
}
