//! Domain extraction from email addresses.

/// Extracts the lowercased domain part of an email address.
///
/// The domain is everything after the last `@`, matching how mail routing
/// treats quoted local parts containing `@`.
///
/// Returns `None` for addresses with no `@`, an empty local part, or an
/// empty domain.
///
/// # Examples
///
/// ```
/// use linkhub_jobs::utils::email::domain_of;
///
/// assert_eq!(domain_of("user@Example.COM"), Some("example.com".to_string()));
/// assert_eq!(domain_of("not-an-address"), None);
/// ```
pub fn domain_of(address: &str) -> Option<String> {
    let at = address.rfind('@')?;
    let (local, domain) = address.split_at(at);
    let domain = &domain[1..];

    if local.is_empty() || domain.is_empty() {
        return None;
    }

    Some(domain.to_ascii_lowercase())
}
