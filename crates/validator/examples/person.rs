//! Registers a small model and validates a few inputs.
//!
//! Engine events are printed at debug level.

use serde::Deserialize;
use tessera_validator::prelude::*;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Person {
    name: String,
    age: f64,
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Address {
    street: String,
    zip: String,
}

impl Validated for Person {
    fn describe(class: &ClassBuilder<'_>) {
        class
            .field("name", DeclaredType::String)
            .parse_with(trim())
            .type_checked()
            .validate_with(not_empty());
        class
            .field("age", DeclaredType::Number)
            .parse_with(to_number())
            .type_checked()
            .custom_rule(|age: Option<&Value>| {
                Check::ensure(
                    age.and_then(Value::as_f64).is_some_and(|age| age > 18.0),
                    "Min Age 18",
                )
            });
        class.nested::<Address>("address").type_checked().optional();
    }
}

impl Validated for Address {
    fn describe(class: &ClassBuilder<'_>) {
        class.field("street", DeclaredType::String).type_checked();
        class
            .field("zip", DeclaredType::String)
            .type_checked()
            .validate_with(min_length(4));
    }
}

fn main() -> Result<(), UsageError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    register::<Person>();

    let inputs = [
        json!({"name": " Ann ", "age": "42", "address": {"street": "Main", "zip": "0150"}}),
        json!({"name": 12}),
        json!({"name": "Bob", "age": 12, "address": {"zip": "01"}}),
    ];

    for input in &inputs {
        match create_validated::<Person>(input)? {
            Ok(person) => println!("valid: {person:?}"),
            Err(errors) => println!("{errors}"),
        }
    }

    Ok(())
}
