/// Check whether an email may hold the admin role
///
/// Returns true if the email is on the configured allow-list. Matching is
/// case-insensitive; email casing is not significant.
pub fn is_admin_email(email: &str, admin_emails: &[String]) -> bool {
    admin_emails
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_email() {
        let admin_emails = vec![
            "admin@example.com".to_string(),
            "ops@example.com".to_string(),
        ];

        assert!(is_admin_email("admin@example.com", &admin_emails));
        assert!(is_admin_email("ops@example.com", &admin_emails));
        assert!(!is_admin_email("user@example.com", &admin_emails));
    }

    #[test]
    fn test_case_insensitive_match() {
        let admin_emails = vec!["Admin@Example.com".to_string()];

        assert!(is_admin_email("admin@example.com", &admin_emails));
        assert!(is_admin_email("ADMIN@EXAMPLE.COM", &admin_emails));
        assert!(is_admin_email("Admin@Example.com", &admin_emails));
    }

    #[test]
    fn test_empty_list_rejects_everyone() {
        assert!(!is_admin_email("admin@example.com", &[]));
    }
}
