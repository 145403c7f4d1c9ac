use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::api::dto::account::SignUpDTO;

/// Mirrors the length assertion on the account table.
const MAX_NAME_LENGTH: usize = 30;

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub struct Rule {
    pub field: &'static str,
    pub check: fn(&SignUpDTO) -> bool,
    pub message: &'static str,
}

fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC.is_match(value)
}

fn has_first_name(dto: &SignUpDTO) -> bool {
    !dto.first_name.is_empty()
}

fn alphanumeric_first_name(dto: &SignUpDTO) -> bool {
    is_alphanumeric(&dto.first_name)
}

fn short_first_name(dto: &SignUpDTO) -> bool {
    dto.first_name.chars().count() <= MAX_NAME_LENGTH
}

fn has_surname(dto: &SignUpDTO) -> bool {
    !dto.surname.is_empty()
}

fn alphanumeric_surname(dto: &SignUpDTO) -> bool {
    is_alphanumeric(&dto.surname)
}

fn short_surname(dto: &SignUpDTO) -> bool {
    dto.surname.chars().count() <= MAX_NAME_LENGTH
}

fn valid_email(dto: &SignUpDTO) -> bool {
    dto.email.validate_email()
}

fn email_confirmed(dto: &SignUpDTO) -> bool {
    dto.confirm_email == dto.email
}

fn long_password(dto: &SignUpDTO) -> bool {
    dto.password.chars().count() >= 6
}

fn password_confirmed(dto: &SignUpDTO) -> bool {
    dto.confirm_password == dto.password
}

#[rustfmt::skip]
pub static SIGN_UP_RULES: [Rule; 10] = [
    Rule { field: "first_name", check: has_first_name, message: "First Name must be specified." },
    Rule { field: "first_name", check: alphanumeric_first_name, message: "First Name must be Alphanumeric" },
    Rule { field: "first_name", check: short_first_name, message: "First Name must not exceed 30 characters." },
    Rule { field: "surname", check: has_surname, message: "Surname must be specified." },
    Rule { field: "surname", check: alphanumeric_surname, message: "Surname must be Alphanumeric" },
    Rule { field: "surname", check: short_surname, message: "Surname must not exceed 30 characters." },
    Rule { field: "email", check: valid_email, message: "Invalid E-Mail Address" },
    Rule { field: "confirm_email", check: email_confirmed, message: "E-Mail does not match!" },
    Rule { field: "password", check: long_password, message: "Password must be min. 6 characters!" },
    Rule { field: "confirm_password", check: password_confirmed, message: "Passwords do not match!" },
];

/// Runs every rule against the raw submission, keeping table order.
pub fn sign_up_failures(dto: &SignUpDTO) -> Vec<FieldError> {
    SIGN_UP_RULES
        .iter()
        .filter(|rule| !(rule.check)(dto))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// Trims and HTML-escapes a submitted value.
pub fn sanitize(value: &str) -> String {
    let value = value.trim();
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn sign_up() -> SignUpDTO {
        SignUpDTO {
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "ada@lets-travel.com".to_string(),
            confirm_email: "ada@lets-travel.com".to_string(),
            password: "p4ssw0rd".to_string(),
            confirm_password: "p4ssw0rd".to_string(),
        }
    }

    fn messages(dto: &SignUpDTO) -> Vec<&'static str> {
        sign_up_failures(dto)
            .into_iter()
            .map(|error| error.message)
            .collect()
    }

    #[rstest]
    fn test_valid_sign_up(sign_up: SignUpDTO) {
        assert!(sign_up_failures(&sign_up).is_empty());
    }

    #[test]
    fn test_empty_submission_collects_in_order() {
        let failures = sign_up_failures(&SignUpDTO::default());

        let fields: Vec<&str> = failures.iter().map(|error| error.field).collect();

        assert_eq!(
            fields,
            vec!["first_name", "first_name", "surname", "surname", "email", "password"]
        );
    }

    #[rstest]
    fn test_mismatched_confirmations(mut sign_up: SignUpDTO) {
        sign_up.confirm_email = "ada@lets-travel.org".to_string();
        sign_up.confirm_password = "password".to_string();

        assert_eq!(
            messages(&sign_up),
            vec!["E-Mail does not match!", "Passwords do not match!"]
        );
    }

    #[rstest]
    #[case::short("p4ss", vec!["Password must be min. 6 characters!"])]
    #[case::six_chars("p4ssw0", vec![])]
    fn test_password_length(
        mut sign_up: SignUpDTO,
        #[case] password: &str,
        #[case] expected: Vec<&'static str>,
    ) {
        sign_up.password = password.to_string();
        sign_up.confirm_password = password.to_string();

        assert_eq!(messages(&sign_up), expected);
    }

    #[rstest]
    #[case::space("Ada Mary")]
    #[case::hyphen("Ada-Mary")]
    #[case::accent("Adé")]
    fn test_first_name_must_be_alphanumeric(mut sign_up: SignUpDTO, #[case] first_name: &str) {
        sign_up.first_name = first_name.to_string();

        assert_eq!(messages(&sign_up), vec!["First Name must be Alphanumeric"]);
    }

    #[rstest]
    #[case::at_limit(30, vec![])]
    #[case::over_limit(31, vec!["First Name must not exceed 30 characters.", "Surname must not exceed 30 characters."])]
    fn test_name_length(
        mut sign_up: SignUpDTO,
        #[case] length: usize,
        #[case] expected: Vec<&'static str>,
    ) {
        sign_up.first_name = "A".repeat(length);
        sign_up.surname = "L".repeat(length);

        assert_eq!(messages(&sign_up), expected);
    }

    #[rstest]
    fn test_apostrophe_email_is_valid(mut sign_up: SignUpDTO) {
        sign_up.email = "o'brien@lets-travel.com".to_string();
        sign_up.confirm_email = "o'brien@lets-travel.com".to_string();

        assert!(sign_up_failures(&sign_up).is_empty());
    }

    #[rstest]
    fn test_invalid_email(mut sign_up: SignUpDTO) {
        sign_up.email = "not-an-email".to_string();
        sign_up.confirm_email = "not-an-email".to_string();

        assert_eq!(messages(&sign_up), vec!["Invalid E-Mail Address"]);
    }

    #[rstest]
    #[case::trims("  Ada  ", "Ada")]
    #[case::markup("<b>\"Ada\" & 'Co'</b>", "&lt;b&gt;&quot;Ada&quot; &amp; &#x27;Co&#x27;&lt;&#x2F;b&gt;")]
    #[case::slashes("a\\b`c", "a&#x5C;b&#96;c")]
    fn test_sanitize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize(raw), expected);
    }
}
