//! Field rules shared by the record types.
//!
//! Each check appends to a `ValidationErrors` instead of returning early so a
//! caller sees every problem of a write at once.

use crate::error::ValidationErrors;

/// AWS account ids are exactly twelve digits.
pub const ACCOUNT_ID_LENGTH: usize = 12;
pub const VPC_ID_PREFIX: &str = "vpc-";
/// `vpc-` followed by 17 hex digits.
pub const VPC_ID_MAX_LENGTH: usize = 21;
pub const SUBNET_ID_PREFIX: &str = "subnet-";
/// Leaves room past `subnet-` plus 17 hex digits for hand-made ids such as
/// `subnet-pending_activation`.
pub const SUBNET_ID_MAX_LENGTH: usize = 32;
pub const NAME_MAX_LENGTH: usize = 256;
pub const ARN_MAX_LENGTH: usize = 2000;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const SLUG_MAX_LENGTH: usize = 100;

pub const REQUIRED: &str = "This field is required.";

pub fn check_max_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
    }
}

pub fn check_required(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    }
}

pub fn check_account_id(errors: &mut ValidationErrors, value: &str) {
    if value.len() != ACCOUNT_ID_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        errors.add(
            "account_id",
            format!("AWS account ID must be exactly {ACCOUNT_ID_LENGTH} digits."),
        );
    }
}

/// `vpc-…` / `subnet-…` style identifiers.
pub fn check_resource_id(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    prefix: &str,
    max: usize,
) {
    if value.len() <= prefix.len() || !value.starts_with(prefix) {
        errors.add(field, format!("Identifier must start with \"{prefix}\"."));
    }
    if value.chars().any(char::is_whitespace) {
        errors.add(field, "Identifier may not contain whitespace.");
    }
    check_max_length(errors, field, value, max);
}

pub fn check_arn(errors: &mut ValidationErrors, value: Option<&str>) {
    let Some(arn) = value else {
        return;
    };
    if !arn.starts_with("arn:") {
        errors.add("arn", "ARN must start with \"arn:\".");
    }
    check_max_length(errors, "arn", arn, ARN_MAX_LENGTH);
}

pub fn check_slug(errors: &mut ValidationErrors, value: &str) {
    check_required(errors, "slug", value);
    if !value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        errors.add(
            "slug",
            "Enter a valid slug consisting of lowercase letters, numbers, underscores or hyphens.",
        );
    }
    check_max_length(errors, "slug", value, SLUG_MAX_LENGTH);
}
