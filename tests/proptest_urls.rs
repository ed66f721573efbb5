//! Property-based tests using proptest
//!
//! These tests verify URL joining, query option application and
//! query-parameter encoding using randomized inputs.

use proptest::prelude::*;
use reqwest::Method;
use up_sdk::endpoints::auth::exchange_form;
use up_sdk::http::client::join_url;
use up_sdk::http::options::apply_all;
use up_sdk::http::{with_page, with_size, HttpClient};
use up_sdk::kube::{ListOptions, ParameterCodec};
use url::{form_urlencoded, Url};

/// A path segment safe to put in a URL unescaped
fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,15}"
}

/// Segments joined with one or more slashes, optionally with a leading and
/// trailing slash
fn arb_slashed(segments: Vec<String>) -> impl Strategy<Value = String> {
    let n = segments.len();
    (
        prop::collection::vec("/{1,3}", n.saturating_sub(1)),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(seps, lead, trail)| {
            let mut out = String::new();
            if lead {
                out.push('/');
            }
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    out.push_str(&seps[i - 1]);
                }
                out.push_str(segment);
            }
            if trail {
                out.push('/');
            }
            out
        })
}

fn arb_path() -> impl Strategy<Value = (Vec<String>, String)> {
    prop::collection::vec(arb_segment(), 0..4)
        .prop_flat_map(|segments| (Just(segments.clone()), arb_slashed(segments)))
}

fn base() -> Url {
    Url::parse("https://api.example.com/").unwrap()
}

proptest! {
    /// Extra slashes never change the joined URL
    #[test]
    fn join_url_is_slash_insensitive(
        (prefix_segments, prefix) in arb_path(),
        (sub_segments, subpath) in arb_path(),
    ) {
        let joined = join_url(&base(), &prefix, &subpath).unwrap();
        let canonical = join_url(
            &base(),
            &prefix_segments.join("/"),
            &sub_segments.join("/"),
        )
        .unwrap();
        prop_assert_eq!(joined.as_str(), canonical.as_str());
    }

    /// The joined path never contains an empty segment
    #[test]
    fn join_url_has_no_empty_segments(
        (_, prefix) in arb_path(),
        (_, subpath) in arb_path(),
    ) {
        let joined = join_url(&base(), &prefix, &subpath).unwrap();
        prop_assert!(!joined.path().contains("//"));
        prop_assert!(joined.path().starts_with('/'));
    }

    /// The base URL's own path is kept in front of the prefix
    #[test]
    fn join_url_keeps_base_path(
        base_segment in arb_segment(),
        (prefix_segments, prefix) in arb_path(),
    ) {
        let base = Url::parse(&format!("https://api.example.com/{}/", base_segment)).unwrap();
        let joined = join_url(&base, &prefix, "").unwrap();
        let expected = std::iter::once(base_segment)
            .chain(prefix_segments)
            .collect::<Vec<_>>()
            .join("/");
        prop_assert_eq!(joined.path(), format!("/{}", expected));
    }

    /// The last page option wins and applying options twice changes nothing
    #[test]
    fn page_options_last_wins(pages in prop::collection::vec(any::<u32>(), 1..6), size in any::<u32>()) {
        let http = HttpClient::new("https://api.example.com").unwrap();
        let mut options: Vec<_> = pages.iter().copied().map(with_page).collect();
        options.push(with_size(size));

        let mut req = http.new_request(Method::GET, "v1/repositories", "acme").unwrap();
        apply_all(&mut req, &options);
        let once = req.url().clone();
        apply_all(&mut req, &options);

        prop_assert_eq!(req.url(), &once);
        let last_page = pages.last().unwrap().to_string();
        prop_assert_eq!(req.query("page"), Some(last_page));
        prop_assert_eq!(req.url().query_pairs().filter(|(k, _)| k == "page").count(), 1);
    }

    /// Selectors with reserved characters survive query encoding
    #[test]
    fn selectors_decode_back(labels in "[a-z=,!:/ ]{1,32}", fields in "[a-z.=,!]{1,32}") {
        let query = ListOptions::default().labels(&labels).fields(&fields).to_query();
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        prop_assert!(pairs.contains(&("labelSelector".to_string(), labels)));
        prop_assert!(pairs.contains(&("fieldSelector".to_string(), fields)));
    }

    /// The exchange form always has six pairs and scopes to the org
    #[test]
    fn exchange_form_shape(org in "[a-z0-9-]{1,20}", token in "\\PC{1,64}") {
        let form = exchange_form(&org, &token);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(form.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let scope = format!("upbound:org:{}", org);
        prop_assert_eq!(pairs.len(), 6);
        prop_assert!(pairs.contains(&("scope".to_string(), scope)));
        prop_assert!(pairs.contains(&("subject_token".to_string(), token)));
    }
}
