use vellum::http::headers::{
    CacheControl, ContentType, ETag, HeadersExt, MutableHeadersExt, Vary, accessors,
};
use vellum::http::{Headers, MutableHeaders, dep::http, header};

#[test]
fn build_and_transform_never_touch_the_source() {
    let original = Headers::build(|h| {
        h.typed_insert(ContentType::json());
        accessors::CONTENT_LENGTH.set(h, 42_u64);
    });

    let updated = original.transform(|h| {
        accessors::CONTENT_LENGTH.set(h, None);
        h.typed_insert(ETag::strong("v2").unwrap());
    });

    assert_eq!(accessors::CONTENT_LENGTH.get(&original).unwrap(), Some(42));
    assert!(!original.typed_contains::<ETag>());
    assert!(!accessors::CONTENT_LENGTH.is_set(&updated));
    assert_eq!(updated.typed_get::<ETag>().unwrap().tag(), "v2");
    assert_eq!(updated.typed_get::<ContentType>(), Some(ContentType::json()));
}

#[test]
fn content_length_scenario() {
    let headers = Headers::build(|h| accessors::CONTENT_LENGTH.set(h, 42_u64));
    assert_eq!(accessors::CONTENT_LENGTH.require(&headers).unwrap(), 42);

    let cleared = headers.transform(|h| accessors::CONTENT_LENGTH.set(h, None));
    assert!(!accessors::CONTENT_LENGTH.is_set(&cleared));
    assert_eq!(accessors::CONTENT_LENGTH.get(&cleared).unwrap(), None);
}

#[test]
fn empty_value_list_is_absent() {
    let headers = Headers::from_map([("vary", Vec::<String>::new())]).unwrap();
    assert!(!headers.typed_contains::<Vary>());
    assert!(headers.is_empty());

    let mut builder = MutableHeaders::new();
    builder
        .set_str("x-custom", std::iter::empty::<&str>())
        .unwrap();
    assert!(builder.get_str("x-custom").is_none());
}

#[test]
fn lookups_ignore_case() {
    let headers = Headers::from_map([("Cache-Control", ["no-store"])]).unwrap();
    assert!(headers.get_str("cache-control").is_some());
    assert!(headers.get_str("CACHE-CONTROL").is_some());
    assert!(headers.typed_get::<CacheControl>().unwrap().no_store());
}

#[test]
fn values_of_repeated_names_are_merged_in_order() {
    let headers = Headers::from_map([
        ("Vary", vec!["accept"]),
        ("vary", vec!["accept-encoding", "origin"]),
    ])
    .unwrap();
    let raw = headers.get(&header::VARY).unwrap();
    assert_eq!(raw.len(), 3);
    assert_eq!(raw.joined(), "accept, accept-encoding, origin");

    let vary: Vary = headers.typed_get().unwrap();
    assert!(vary.contains(&header::ORIGIN));
}

#[test]
fn http_header_map_interop() {
    let mut map = http::HeaderMap::new();
    map.append(http::header::ETAG, http::HeaderValue::from_static("W/\"a\""));
    map.append(http::header::VARY, http::HeaderValue::from_static("accept"));
    map.append(http::header::VARY, http::HeaderValue::from_static("origin"));

    let headers = Headers::try_from(&map).unwrap();
    assert!(headers.typed_get::<ETag>().unwrap().is_weak());
    assert_eq!(headers.get(&header::VARY).unwrap().len(), 2);

    let back = http::HeaderMap::from(&headers);
    assert_eq!(back.get_all(http::header::VARY).iter().count(), 2);
}

#[test]
fn serde_snapshot() {
    let headers = Headers::build(|h| {
        h.typed_insert(CacheControl::new().with_no_cache());
        accessors::USER_AGENT.set(h, "vellum-test".to_owned());
    });
    let json = serde_json::to_value(&headers).unwrap();
    assert_eq!(json["user-agent"], serde_json::json!(["vellum-test"]));

    let back: Headers = serde_json::from_value(json).unwrap();
    assert_eq!(back, headers);
    assert!(back.typed_get::<CacheControl>().unwrap().no_cache());
}
