//! API constants.

/// Version segment of the resource paths.
pub const API_VERSION: u8 = 1;

/// Media type a merge-patch request body must be sent with.
pub const MERGE_PATCH_MEDIA_TYPE: &str = "application/merge-patch+json";

/// Collection path of the Watch resource, `/api/v{API_VERSION}/watches`.
pub fn watches_path() -> String {
    format!("/api/v{API_VERSION}/watches")
}

/// Path of a single watch.
pub fn resource_path(id: i64) -> String {
    format!("{}/{id}", watches_path())
}
