//! Page-URL ingestion.
//!
//! `?packages=` carries bulk descriptors and wins over `?order=`, which
//! asks for the demo set of an order number. With neither, a session opens
//! with its initial package.

/// What a URL asks the editor to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlLoad {
    /// Raw descriptor batch from `?packages=`.
    Packages(String),
    /// Order number from `?order=`.
    Order(String),
    Initial,
}

impl UrlLoad {
    pub fn from_href(href: &str) -> Self {
        let params = query_params(href);
        let find = |key: &str| {
            params
                .iter()
                .find(|(k, v)| k == key && !v.trim().is_empty())
                .map(|(_, v)| v.clone())
        };
        if let Some(packages) = find("packages") {
            UrlLoad::Packages(packages)
        } else if let Some(order) = find("order") {
            UrlLoad::Order(order)
        } else {
            UrlLoad::Initial
        }
    }
}

/// Decoded `key=value` pairs of the query string, in order. A `#fragment`
/// is ignored; a key without `=` maps to an empty value.
pub fn query_params(href: &str) -> Vec<(String, String)> {
    let without_fragment = href.split('#').next().unwrap_or_default();
    let Some((_, query)) = without_fragment.split_once('?') else {
        return Vec::new();
    };
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(k), percent_decode(v))
        })
        .collect()
}

/// Form-style decoding: `+` is a space, `%XX` a byte. Malformed escapes are
/// kept as written; invalid UTF-8 is replaced.
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let params = query_params("https://host/plan?order=1234&flag&x=a%20b#top");
        assert_eq!(
            params,
            vec![
                ("order".to_string(), "1234".to_string()),
                ("flag".to_string(), String::new()),
                ("x".to_string(), "a b".to_string()),
            ]
        );
        assert!(query_params("https://host/plan").is_empty());
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("A%2C1%3B"), "A,1;");
        assert_eq!(percent_decode("Pallet+A"), "Pallet A");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz%4"), "%zz%4");
        assert_eq!(percent_decode("%C3%A9"), "é");
    }

    #[test]
    fn test_packages_take_precedence() {
        assert_eq!(
            UrlLoad::from_href("/?order=77&packages=A,1,1,1,100"),
            UrlLoad::Packages("A,1,1,1,100".into())
        );
        assert_eq!(UrlLoad::from_href("/?order=77"), UrlLoad::Order("77".into()));
        assert_eq!(UrlLoad::from_href("/?order=&packages="), UrlLoad::Initial);
        assert_eq!(UrlLoad::from_href("/"), UrlLoad::Initial);
    }
}
