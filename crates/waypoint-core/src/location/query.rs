//! Query string reading and writing.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Parsed query parameters; duplicate keys keep the last value.
pub type QueryParameters = HashMap<String, String>;

/// Everything except RFC 3986 unreserved characters gets encoded, so `&`,
/// `=` and `+` inside keys or values survive a round trip.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-decode `raw`, keeping it as written if the bytes are not UTF-8.
pub(super) fn decode(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}

/// Ordered `(key, value)` pairs of `query`, duplicates kept.
///
/// Components without `=` are skipped. Keys and values are percent-decoded;
/// text that does not decode to UTF-8 is kept as written.
pub fn parse_query_items(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|component| {
            let (key, value) = component.split_once('=')?;
            Some((decode(key), decode(value)))
        })
        .collect()
}

/// Query parameters of `query` with last-value-wins for duplicate keys.
pub fn parse_query(query: &str) -> QueryParameters {
    parse_query_items(query).into_iter().collect()
}

/// Encodes `parameters` as `k=v&k=v`, sorted by key so the output is stable.
pub fn query_string<K, V>(parameters: &HashMap<K, V>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<&str, &str> = parameters
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();
    sorted
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_COMPONENT),
                utf8_percent_encode(v, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pairs() {
        let params = parse_query("id=1&tag=ab");
        assert_eq!(params.len(), 2);
        assert_eq!(params["id"], "1");
        assert_eq!(params["tag"], "ab");
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let params = parse_query("id=1&id=2");
        assert_eq!(params.len(), 1);
        assert_eq!(params["id"], "2");
        assert_eq!(
            parse_query_items("id=1&id=2"),
            vec![
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn skips_components_without_separator() {
        let params = parse_query("flag&name=Ada&=empty-key");
        assert_eq!(params.get("flag"), None);
        assert_eq!(params["name"], "Ada");
        assert_eq!(params[""], "empty-key");
    }

    #[test]
    fn value_split_on_first_equals_only() {
        let params = parse_query("expr=a=b");
        assert_eq!(params["expr"], "a=b");
    }

    #[test]
    fn percent_decodes_values() {
        let params = parse_query("name=Ada%20Lovelace&city=%E5%8C%97%E4%BA%AC&plus=a+b");
        assert_eq!(params["name"], "Ada Lovelace");
        assert_eq!(params["city"], "北京");
        assert_eq!(params["plus"], "a+b");
    }

    #[test]
    fn invalid_utf8_is_kept_raw() {
        let params = parse_query("bad=%FF");
        assert_eq!(params["bad"], "%FF");
    }

    #[test]
    fn writes_sorted_encoded_pairs() {
        let mut params = HashMap::new();
        params.insert("month", "January");
        params.insert("day", "Tuesday");
        assert_eq!(query_string(&params), "day=Tuesday&month=January");

        let mut tricky = HashMap::new();
        tricky.insert("q", "a&b=c d");
        assert_eq!(query_string(&tricky), "q=a%26b%3Dc%20d");
        assert_eq!(parse_query(&query_string(&tricky))["q"], "a&b=c d");
    }

    #[test]
    fn empty_parameters_write_empty_string() {
        let params: HashMap<String, String> = HashMap::new();
        assert_eq!(query_string(&params), "");
        assert!(parse_query("").is_empty());
    }
}
