//! Shared escaping helpers.

use std::borrow::Cow;

/// Escape a string for use inside an HTML attribute value.
///
/// Encodes `&`, `<`, `>`, `"` and `'`. Returns the input unchanged (borrowed)
/// when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"a "b" <c>"#), "a &quot;b&quot; &lt;c&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    })
}

/// Escape a string for use as element text: only `&`, `<` and `>`.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// URL schemes allowed in escape mode.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whether a link or image URL is safe to emit for untrusted input.
///
/// Relative URLs, fragments and the `http`, `https`, `mailto` and `tel`
/// schemes are safe. Whitespace and control characters are ignored when
/// reading the scheme, as browsers do.
///
/// # Examples
///
/// ```
/// use folio_renderer::is_safe_url;
///
/// assert!(is_safe_url("https://example.com"));
/// assert!(is_safe_url("../about.md#team"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// ```
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    // `./a:b` and `?q=a:b` are paths, not schemes.
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
}

fn escape_with(s: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = s.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match entity(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_entities() {
        assert_eq!(escape_html(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text(r#"if a < b && c > "d""#), r#"if a &lt; b &amp;&amp; c &gt; "d""#);
    }

    #[test]
    fn test_safe_urls() {
        for url in [
            "http://x.dev",
            "HTTPS://x.dev",
            "mailto:hi@x.dev",
            "tel:+123",
            "/blog/post",
            "./other.md",
            "#top",
            "img.png",
            "?q=a:b",
        ] {
            assert!(is_safe_url(url), "{url}");
        }
    }

    #[test]
    fn test_unsafe_urls() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            " javascript:alert(1)",
            "java\tscript:alert(1)",
            "data:text/html;base64,PHNjcmlwdD4=",
            "vbscript:msgbox(1)",
        ] {
            assert!(!is_safe_url(url), "{url}");
        }
    }

    #[test]
    fn test_no_escape_borrows() {
        assert!(matches!(escape_html("hello"), Cow::Borrowed("hello")));
        assert!(matches!(escape_text("héllo wörld"), Cow::Borrowed(_)));
    }
}
