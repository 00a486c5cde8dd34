use std::sync::LazyLock;

use regex::Regex;

pub mod contact;
pub mod content;
pub mod gallery;

/// Basic `local@domain.tld` shape: no whitespace, exactly one `@` with a `.`
/// somewhere after it. Deliverability is the delivery service's problem.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
