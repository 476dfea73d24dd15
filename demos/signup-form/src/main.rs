//! Signup form validation demo
//!
//! Loads a schema from JSON, validates a handful of submitted forms and
//! prints either the accepted fields or the API error body.
//!
//! Run with: `RUST_LOG=fieldcheck=debug cargo run -p signup-form`
//! Pass a path to a JSON file holding an array of objects to validate your
//! own submissions.

use fieldcheck::{Record, Schema, SchemaDefinition, Validator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"{
    "fields": [
        {
            "name": "username",
            "alias": "User name",
            "rules": [
                { "rule": "required", "message": "Pick a user name" },
                { "rule": "alphaDash", "message": "Letters, digits, - and _ only" },
                { "rule": "betweenLen", "message": "3 to 16 characters", "args": [3, 16] }
            ]
        },
        {
            "name": "email",
            "alias": "Email",
            "rules": [
                { "rule": "required", "message": "Email is required" },
                { "rule": "email", "message": "That does not look like an email address" }
            ]
        },
        {
            "name": "password",
            "alias": "Password",
            "rules": [
                { "rule": "required", "message": "Choose a password" },
                { "rule": "lengthMin", "message": "At least 8 characters", "args": [8] }
            ]
        },
        {
            "name": "password_confirm",
            "alias": "Confirm password",
            "rules": [
                { "rule": "equalWithColumn", "message": "Passwords do not match", "args": ["password"] }
            ]
        },
        {
            "name": "age",
            "alias": "Age",
            "rules": [
                { "rule": "integer", "message": "Age must be a whole number" },
                { "rule": "between", "message": "You must be between 13 and 120", "args": [13, 120] }
            ]
        },
        {
            "name": "website",
            "alias": "Website",
            "rules": [
                { "rule": "url", "message": "Enter a valid URL" }
            ]
        }
    ]
}"#;

const SUBMISSIONS: &str = r#"[
    {
        "username": "ada_lovelace",
        "email": "ada@example.com",
        "password": "analytical-engine",
        "password_confirm": "analytical-engine",
        "age": 36,
        "newsletter": true
    },
    {
        "username": "grace",
        "email": "grace@example.com",
        "password": "cobol1959",
        "password_confirm": "cobol1960"
    },
    {
        "username": "al",
        "email": "al@example.com",
        "password": "short"
    },
    {
        "username": "linus",
        "email": "linus@example.org",
        "password": "penguin-power",
        "password_confirm": "penguin-power",
        "age": "nine",
        "website": "https://kernel.org"
    }
]"#;

fn load_submissions() -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SUBMISSIONS.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let schema = Schema::from_json_str(SCHEMA)?;
    info!(fields = schema.len(), "Loaded signup schema");
    println!("{}", SchemaDefinition::from_schema(&schema).pretty_print());
    println!();

    let validator = Validator::from_schema(schema);

    for (i, submission) in load_submissions()?.iter().enumerate() {
        match validator.validate(submission).into_result() {
            Ok(data) => {
                info!(submission = i, "Accepted");
                println!("#{i} accepted: {}", serde_json::to_string(&data)?);
            }
            Err(err) => {
                warn!(submission = i, field = err.field(), rule = %err.rule(), "Rejected");
                println!(
                    "#{i} rejected: {}",
                    serde_json::to_string_pretty(&err.to_api_error())?
                );
            }
        }
    }

    Ok(())
}
