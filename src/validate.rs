//! Contact form validation.
//!
//! All three checks run on every attempt so the user sees every problem at
//! once rather than fixing them one submit at a time.

#[derive(Clone, PartialEq, Default, Debug)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IssueKind {
    Required,
    InvalidFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Issue {
    pub field: Field,
    pub kind: IssueKind,
}

impl Issue {
    pub fn message(self) -> &'static str {
        match (self.field, self.kind) {
            (Field::Name, _) => "Name is required",
            (Field::Email, IssueKind::Required) => "Email is required",
            (Field::Email, IssueKind::InvalidFormat) => "Please enter a valid email",
            (Field::Message, _) => "Message is required",
        }
    }
}

pub fn validate(input: &ContactInput) -> Vec<Issue> {
    let mut issues = Vec::new();

    if input.name.trim().is_empty() {
        issues.push(Issue {
            field: Field::Name,
            kind: IssueKind::Required,
        });
    }

    if input.email.trim().is_empty() {
        issues.push(Issue {
            field: Field::Email,
            kind: IssueKind::Required,
        });
    } else if !email_shape_ok(&input.email) {
        issues.push(Issue {
            field: Field::Email,
            kind: IssueKind::InvalidFormat,
        });
    }

    if input.message.trim().is_empty() {
        issues.push(Issue {
            field: Field::Message,
            kind: IssueKind::Required,
        });
    }

    issues
}

/// Permissive email shape check: non-space non-`@` characters around a
/// single `@`, with a `.` somewhere inside the domain. Deliberately not RFC
/// validation.
pub fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut halves = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (halves.next(), halves.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // A dot with at least one character on each side of it.
    let bytes = domain.as_bytes();
    bytes.len() >= 3 && bytes[1..bytes.len() - 1].contains(&b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, message: &str) -> ContactInput {
        ContactInput {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn all_blank_collects_every_issue() {
        let issues = validate(&input("", "", ""));
        assert_eq!(
            issues,
            vec![
                Issue {
                    field: Field::Name,
                    kind: IssueKind::Required
                },
                Issue {
                    field: Field::Email,
                    kind: IssueKind::Required
                },
                Issue {
                    field: Field::Message,
                    kind: IssueKind::Required
                },
            ]
        );
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let issues = validate(&input("   ", "a@b.c", "\t\n"));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, Field::Name);
        assert_eq!(issues[1].field, Field::Message);
    }

    #[test]
    fn malformed_email_reported_alongside_other_issues() {
        let issues = validate(&input("", "not-an-email", "hello"));
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[1],
            Issue {
                field: Field::Email,
                kind: IssueKind::InvalidFormat
            }
        );
    }

    #[test]
    fn blank_email_is_required_not_invalid() {
        let issues = validate(&input("Ada", "  ", "hello"));
        assert_eq!(
            issues,
            vec![Issue {
                field: Field::Email,
                kind: IssueKind::Required
            }]
        );
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate(&input("Ada", "a@b.c", "hello")).is_empty());
    }

    #[test]
    fn email_shapes() {
        assert!(email_shape_ok("a@b.c"));
        assert!(email_shape_ok("user@mail.example.com"));
        assert!(email_shape_ok("first.last@sub.domain.io"));

        assert!(!email_shape_ok("not-an-email"));
        assert!(!email_shape_ok("a@b"));
        assert!(!email_shape_ok("@b.c"));
        assert!(!email_shape_ok("a@.c"));
        assert!(!email_shape_ok("a@b."));
        assert!(!email_shape_ok("a b@c.d"));
        assert!(!email_shape_ok("a@b@c.d"));
    }

    #[test]
    fn issue_messages() {
        let issue = Issue {
            field: Field::Email,
            kind: IssueKind::InvalidFormat,
        };
        assert_eq!(issue.message(), "Please enter a valid email");
    }
}
