pub mod comment;
pub mod create;
pub mod delete;
pub mod get;
pub mod models;
pub mod rating;
pub mod routes;
pub mod update;

use crate::error::ApiError;

pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

fn blog_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Blog not found with id of {id}"))
}

/// Trims a text field that is present in the submission. Blank values are
/// rejected with `missing`, overlong ones name the `field` and its limit.
fn trimmed_text(
    value: String,
    max_chars: usize,
    missing: &str,
    field: &str,
) -> Result<String, ApiError> {
    let value = value.trim().to_string();

    if value.is_empty() {
        return Err(ApiError::Validation(missing.into()));
    }

    if value.chars().count() > max_chars {
        return Err(ApiError::Validation(format!(
            "{field} can not be more than {max_chars} characters"
        )));
    }

    Ok(value)
}

fn required_text(
    value: Option<String>,
    max_chars: usize,
    missing: &str,
    field: &str,
) -> Result<String, ApiError> {
    match value {
        Some(value) => trimmed_text(value, max_chars, missing, field),
        None => Err(ApiError::Validation(missing.into())),
    }
}

fn optional_text(
    value: Option<String>,
    max_chars: usize,
    missing: &str,
    field: &str,
) -> Result<Option<String>, ApiError> {
    value
        .map(|value| trimmed_text(value, max_chars, missing, field))
        .transpose()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_is_trimmed_and_bounded() {
        assert_eq!(
            required_text(Some("  hi  ".into()), 5, "missing", "Name").unwrap(),
            "hi"
        );
        assert_eq!(
            required_text(None, 5, "missing", "Name").unwrap_err(),
            ApiError::Validation("missing".into())
        );
        assert_eq!(
            required_text(Some("   ".into()), 5, "missing", "Name").unwrap_err(),
            ApiError::Validation("missing".into())
        );
        assert_eq!(
            required_text(Some("toolong".into()), 5, "missing", "Name").unwrap_err(),
            ApiError::Validation("Name can not be more than 5 characters".into())
        );
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        assert!(required_text(Some("ééééé".into()), 5, "missing", "Name").is_ok());
    }

    #[test]
    fn optional_text_skips_absent_fields() {
        assert_eq!(optional_text(None, 5, "missing", "Name").unwrap(), None);
        assert!(optional_text(Some("".into()), 5, "missing", "Name").is_err());
    }
}
