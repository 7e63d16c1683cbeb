use std::collections::HashMap;

use watch_io::prelude::*;

#[test]
fn canonical_json_sorts_object_keys() {
    let mut m = HashMap::new();
    m.insert("b", 2);
    m.insert("a", 1);

    let s = canonical_json::to_canonical_json_string(&m).expect("canonical json");
    assert_eq!(s, "{\"a\":1,\"b\":2}");
}

#[test]
fn canonical_preserves_array_order() {
    let s = canonical_json::to_canonical_json_string(&serde_json::json!([3, {"b": 1, "a": 2}]))
        .expect("canonical json");
    assert_eq!(s, "[3,{\"a\":2,\"b\":1}]");
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let w = Watch::new("Prim", 250000, "Fountain watch", b"gif".to_vec()).with_id(1);
    let f1 = hashing::fingerprint(&w).expect("fingerprint");
    let f2 = hashing::fingerprint(&w.clone()).expect("fingerprint");
    assert_eq!(f1, f2);
    assert!(f1.starts_with("sha256:"));
    assert_eq!(f1.len(), "sha256:".len() + 64);

    let mut cheaper = w.clone();
    cheaper.price = Some(250);
    assert_ne!(hashing::fingerprint(&cheaper).expect("fingerprint"), f1);
}

#[test]
fn sha256_of_empty_input() {
    assert_eq!(
        hashing::sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
