use serde_json::json;

use watch_io::core::from_structural_str;
use watch_io::prelude::*;

fn svc_with_one() -> (WatchService<InMemoryWatchRepository>, WatchId) {
    let mut svc = WatchService::new(InMemoryWatchRepository::new());
    let w = svc
        .create(Watch::new("Prim", 250000, "Fountain watch", b"gif".to_vec()))
        .unwrap();
    (svc, w.id.unwrap())
}

#[test]
fn validation_errors_flatten_to_field_messages() {
    let (mut svc, id) = svc_with_one();
    let err = svc.patch(id, &json!({"title": "pri", "price": 0})).unwrap_err();
    let body = ErrorBody::from(&err).at_path(version::resource_path(id));

    assert_eq!(body.status, 400);
    assert_eq!(body.kind, "validation");
    assert_eq!(body.path.as_deref(), Some("/api/v1/watches/1"));
    assert_eq!(
        body.errors,
        vec!["title:size must be between 4 and 256", "price:must be greater than 0"]
    );
}

#[test]
fn conversion_error_names_the_field() {
    let (mut svc, id) = svc_with_one();
    let err = svc.patch(id, &json!({"price": "250"})).unwrap_err();
    let body = ErrorBody::from(&err);
    assert_eq!(body.kind, "conversion");
    assert_eq!(body.errors.len(), 1);
    assert!(body.errors[0].contains("'price'"), "{}", body.errors[0]);
}

#[test]
fn not_found_uses_message_and_type_key() {
    let (svc, _) = svc_with_one();
    let err = svc.get(5).unwrap_err();
    let v = serde_json::to_value(ErrorBody::from(&err)).unwrap();
    assert_eq!(v["status"], 404);
    assert_eq!(v["type"], "not_found");
    assert_eq!(v["message"], "Watch with id 5 doesn't exist.");
    assert!(v.get("path").is_none());
}

#[test]
fn merge_patch_media_type_is_exposed() {
    assert_eq!(version::MERGE_PATCH_MEDIA_TYPE, "application/merge-patch+json");
    assert_eq!(version::watches_path(), "/api/v1/watches");
    assert_eq!(version::resource_path(42), "/api/v1/watches/42");
}

#[test]
fn unreadable_watch_document_is_a_conversion_body() {
    let err = from_structural_str::<Watch>(r#"{"id": 1, "price": "x"}"#).unwrap_err();
    let v = serde_json::to_value(ErrorBody::from(&err)).unwrap();
    assert_eq!(v["status"], 400);
    assert_eq!(v["type"], "conversion");
    assert_eq!(v["message"], "Watch cannot be read.");
    assert_eq!(v["errors"], json!(["field 'price': expected integer, found string"]));
}
