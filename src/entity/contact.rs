use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name must be at least 2 characters.")]
    Name,

    #[error("Please enter a valid email address.")]
    Email,

    #[error("Message must be at least 10 characters.")]
    Message,
}

impl FieldError {
    // フォーム上のどの欄の横にエラーを出すか
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldError::Name => "name",
            FieldError::Email => "email",
            FieldError::Message => "message",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, phone: Option<&str>, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            // 空欄の電話番号は未入力として扱う
            phone: phone
                .filter(|p| !p.trim().is_empty())
                .map(|p| p.to_string()),
            message: message.to_string(),
        }
    }

    // 不正な欄を name, email, message の順に全て返す
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = vec![];

        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::Name);
        }

        if !is_well_formed_email(&self.email) {
            errors.push(FieldError::Email);
        }

        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::Message);
        }

        errors
    }
}

pub fn is_well_formed_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }

    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
fn valid_contact() -> ContactFields {
    ContactFields::new(
        "Jo Lee",
        "jo@example.com",
        None,
        "I would like to join this class please.",
    )
}

#[test]
fn test_validate_正常系() {
    assert!(valid_contact().validate().is_empty());
}

#[test]
fn test_validate_名前が1文字の場合() {
    let contact = ContactFields {
        name: "A".to_string(),
        ..valid_contact()
    };

    assert_eq!(contact.validate(), vec![FieldError::Name]);
}

#[test]
fn test_validate_名前は文字数で数えること() {
    let contact = ContactFields {
        name: "李明".to_string(),
        ..valid_contact()
    };

    assert!(contact.validate().is_empty());
}

#[test]
fn test_validate_メールアドレスの形式が不正な場合() {
    let contact = ContactFields {
        email: "not-an-email".to_string(),
        ..valid_contact()
    };

    assert_eq!(contact.validate(), vec![FieldError::Email]);
}

#[test]
fn test_validate_メッセージが短い場合() {
    let contact = ContactFields {
        message: "Hi there".to_string(),
        ..valid_contact()
    };

    assert_eq!(contact.validate(), vec![FieldError::Message]);
}

#[test]
fn test_validate_複数の欄が不正な場合は全て欄の順に返すこと() {
    let contact = ContactFields::new("", "jo@", Some("0123"), "");

    assert_eq!(
        contact.validate(),
        vec![FieldError::Name, FieldError::Email, FieldError::Message]
    );
}

#[test]
fn test_validate_電話番号は何でもよいこと() {
    let contact = ContactFields {
        phone: Some("not a number".to_string()),
        ..valid_contact()
    };

    assert!(contact.validate().is_empty());
}

#[test]
#[allow(non_snake_case)]
fn test_new_空欄の電話番号はNoneになること() {
    let contact = ContactFields::new("Jo Lee", "jo@example.com", Some("  "), "message text");
    assert_eq!(contact.phone, None);
}

#[test]
fn test_is_well_formed_email() {
    assert!(is_well_formed_email("jo@example.com"));
    assert!(is_well_formed_email("jo.lee+class@mail.example.co.uk"));

    assert!(!is_well_formed_email("jo@example"));
    assert!(!is_well_formed_email("jo@@example.com"));
    assert!(!is_well_formed_email(".jo@example.com"));
    assert!(!is_well_formed_email("jo..lee@example.com"));
    assert!(!is_well_formed_email("jo lee@example.com"));
}

#[test]
fn test_field_error_field_name() {
    assert_eq!(FieldError::Email.field_name(), "email");
    assert_eq!(FieldError::Email.to_string(), "Please enter a valid email address.");
}
