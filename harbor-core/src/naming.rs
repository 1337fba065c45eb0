//! Naming conventions shared by handler types and handler units.

/// Separator between segments of a handler type path.
pub const PATH_SEPARATOR: &str = "::";

/// Convert a type-style identifier into its conventional unit name.
///
/// ```text
/// Foo       => foo
/// FooBar    => foo_bar
/// FooBarBaz => foo_bar_baz
/// ```
///
/// A leading run of capitals folds into the first word (`WEBrick` becomes
/// `webrick`). Every later run of capitals starts a new word, provided it is
/// followed by a non-capital character; a trailing run stays in the current
/// word (`FastCGI` becomes `fastcgi`). Only ASCII `A`-`Z` count as capitals.
pub fn underscore(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut i = 0;

    while i < chars.len() && chars[i].is_ascii_uppercase() {
        out.push(chars[i]);
        i += 1;
    }

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_uppercase() {
            i += 1;
        }
        if i < chars.len() {
            out.push('_');
        }
        out.extend(&chars[start..i]);
    }

    out.to_lowercase()
}

/// Check whether `segment` can appear in a handler type path.
pub fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Join a namespace and a relative path.
pub fn join_path(namespace: &str, path: &str) -> String {
    if namespace.is_empty() {
        path.to_string()
    } else {
        format!("{namespace}{PATH_SEPARATOR}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_conventions() {
        assert_eq!(underscore("Foo"), "foo");
        assert_eq!(underscore("FooBar"), "foo_bar");
        assert_eq!(underscore("FooBarBaz"), "foo_bar_baz");
    }

    #[test]
    fn test_underscore_leading_capital_run() {
        assert_eq!(underscore("WEBrick"), "webrick");
        assert_eq!(underscore("ABCFoo"), "abcfoo");
        assert_eq!(underscore("LSWS"), "lsws");
    }

    #[test]
    fn test_underscore_trailing_capital_run() {
        assert_eq!(underscore("FastCGI"), "fastcgi");
        assert_eq!(underscore("FooBAR"), "foobar");
    }

    #[test]
    fn test_underscore_inner_runs() {
        assert_eq!(underscore("UnRegistered"), "un_registered");
        assert_eq!(underscore("UnregisteredLongOne"), "unregistered_long_one");
        assert_eq!(underscore("EventedMongrel"), "evented_mongrel");
        assert_eq!(underscore("MyHTTPServer"), "my_httpserver");
    }

    #[test]
    fn test_underscore_passes_lowercase_through() {
        assert_eq!(underscore("cgi"), "cgi");
        assert_eq!(underscore("rock_lobster"), "rock_lobster");
        assert_eq!(underscore(""), "");
    }

    #[test]
    fn test_valid_segments() {
        assert!(is_valid_segment("Cgi"));
        assert!(is_valid_segment("boom"));
        assert!(is_valid_segment("_private2"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment("2fast"));
        assert!(!is_valid_segment("not-a-name"));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("harbor::handler", "Cgi"), "harbor::handler::Cgi");
        assert_eq!(join_path("", "Cgi"), "Cgi");
    }
}
