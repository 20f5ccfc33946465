//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::settings::Settings;

/// Characters left unescaped inside a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Join the site URL with a path, avoiding doubled slashes
///
/// # Examples
/// ```ignore
/// full_url_for(&settings, "/about/") // -> "https://example.org/about/"
/// ```
pub fn full_url_for(settings: &Settings, path: &str) -> String {
    let base = settings.site_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Public URL of a post
///
/// Slugs are not validated on write, so the slug is percent-encoded here.
pub fn post_url(settings: &Settings, blog_path: &str, slug: &str) -> String {
    let blog_path = blog_path.trim_matches('/');
    let slug = encode_segment(slug);
    if blog_path.is_empty() {
        full_url_for(settings, &slug)
    } else {
        full_url_for(settings, &format!("{}/{}", blog_path, slug))
    }
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            site_url: "https://example.org/".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_full_url_for() {
        let settings = test_settings();
        assert_eq!(
            full_url_for(&settings, "/about/"),
            "https://example.org/about/"
        );
        assert_eq!(full_url_for(&settings, ""), "https://example.org/");
    }

    #[test]
    fn test_post_url() {
        let settings = test_settings();
        assert_eq!(
            post_url(&settings, "blog", "hello-world"),
            "https://example.org/blog/hello-world"
        );
        assert_eq!(
            post_url(&settings, "/", "hello-world"),
            "https://example.org/hello-world"
        );
    }

    #[test]
    fn test_unsafe_slug_encoded() {
        let settings = test_settings();
        assert_eq!(
            post_url(&settings, "blog", "a b/c"),
            "https://example.org/blog/a%20b%2Fc"
        );
    }
}
