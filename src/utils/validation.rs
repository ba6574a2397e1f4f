// file: src/utils/validation.rs
// description: MongoDB naming rules checked before any server round-trip
// reference: https://www.mongodb.com/docs/manual/reference/limits/#naming-restrictions

use crate::error::{InitError, Result};

const MAX_DATABASE_NAME_BYTES: usize = 63;
const MAX_NAMESPACE_BYTES: usize = 255;
const DATABASE_FORBIDDEN: &[char] = &['/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?'];

pub struct Validator;

impl Validator {
    pub fn validate_database_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(InitError::Validation(
                "Database name cannot be empty".to_string(),
            ));
        }

        if name.len() > MAX_DATABASE_NAME_BYTES {
            return Err(InitError::Validation(format!(
                "Database name too long ({} bytes, max {}): {}",
                name.len(),
                MAX_DATABASE_NAME_BYTES,
                name
            )));
        }

        if let Some(c) = name
            .chars()
            .find(|c| *c == '\0' || DATABASE_FORBIDDEN.contains(c))
        {
            return Err(InitError::Validation(format!(
                "Database name {:?} contains forbidden character {:?}",
                name, c
            )));
        }

        Ok(())
    }

    pub fn validate_collection_name(database: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(InitError::Validation(
                "Collection name cannot be empty".to_string(),
            ));
        }

        if name.contains('$') || name.contains('\0') {
            return Err(InitError::Validation(format!(
                "Collection name {:?} contains '$' or a null character",
                name
            )));
        }

        if name.starts_with("system.") {
            return Err(InitError::Validation(format!(
                "Collection name {:?} uses the reserved 'system.' prefix",
                name
            )));
        }

        // "<db>.<collection>"
        let namespace_len = database.len() + 1 + name.len();
        if namespace_len > MAX_NAMESPACE_BYTES {
            return Err(InitError::Validation(format!(
                "Namespace {}.{} exceeds {} bytes",
                database, name, MAX_NAMESPACE_BYTES
            )));
        }

        Ok(())
    }

    pub fn validate_distinct(names: &[&str]) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(InitError::Validation(format!(
                    "Collection {} is configured more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn validate_uri(uri: &str) -> Result<()> {
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(InitError::Validation(format!(
                "Invalid MongoDB URI scheme: {}",
                Self::redact_uri(uri)
            )));
        }
        Ok(())
    }

    /// Strips credentials so a URI can be logged.
    pub fn redact_uri(uri: &str) -> String {
        let Some((scheme, rest)) = uri.split_once("://") else {
            return uri.to_string();
        };

        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
            None => uri.to_string(),
        }
    }
}
