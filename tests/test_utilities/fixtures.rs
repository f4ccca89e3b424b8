//! JSON builders for hub resources served by the mock fetcher

use super::mocks::BASE_URL;
use serde_json::{json, Value};

pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

pub fn projects_url() -> String {
    url("/api/projects")
}

pub fn code_locations_url() -> String {
    url("/api/codelocations")
}

pub fn notifications_url() -> String {
    url("/api/notifications")
}

pub fn project(name: &str, id: &str) -> Value {
    json!({
        "name": name,
        "_meta": {
            "href": url(&format!("/api/projects/{}", id)),
            "links": [
                {"rel": "versions", "href": url(&format!("/api/projects/{}/versions", id))}
            ]
        }
    })
}

pub fn project_version(name: &str, href: &str) -> Value {
    json!({
        "versionName": name,
        "distribution": "EXTERNAL",
        "phase": "DEVELOPMENT",
        "license": {"licenseDisplay": "Apache License 2.0"},
        "_meta": {
            "href": href,
            "links": [
                {"rel": "policy-status", "href": format!("{}/policy-status", href)},
                {"rel": "components", "href": format!("{}/components", href)},
                {"rel": "codelocations", "href": format!("{}/codelocations", href)}
            ]
        }
    })
}

pub fn bom_code_location(id: &str, mapped_version: &str) -> Value {
    json!({
        "name": format!("bom-{}", id),
        "type": "BOM_IMPORT",
        "mappedProjectVersion": mapped_version,
        "_meta": {
            "href": url(&format!("/api/codelocations/{}", id)),
            "links": [
                {"rel": "scans", "href": scans_url(id)}
            ]
        }
    })
}

pub fn scans_url(code_location_id: &str) -> String {
    url(&format!("/api/codelocations/{}/scans", code_location_id))
}

pub fn scan_url(id: &str) -> String {
    url(&format!("/api/scans/{}", id))
}

pub fn scan(id: &str, status: &str) -> Value {
    json!({
        "status": status,
        "createdAt": "2024-05-01T10:00:00.000Z",
        "_meta": {"href": scan_url(id)}
    })
}

pub fn failed_scan(id: &str, status: &str, message: &str) -> Value {
    json!({
        "status": status,
        "statusMessage": message,
        "_meta": {"href": scan_url(id)}
    })
}

pub fn component_version(version_name: &str, href: &str) -> Value {
    json!({
        "versionName": version_name,
        "license": {"licenseDisplay": "MIT License"},
        "_meta": {"href": href}
    })
}

pub fn policy_rule(name: &str, href: &str) -> Value {
    json!({
        "name": name,
        "enabled": true,
        "overridable": true,
        "_meta": {"href": href}
    })
}

pub fn bom_policy_status(href: &str, rule_urls: &[&str]) -> Value {
    let links: Vec<Value> = rule_urls
        .iter()
        .map(|rule| json!({"rel": "policy-rule", "href": rule}))
        .collect();
    json!({
        "approvalStatus": "IN_VIOLATION",
        "_meta": {"href": href, "links": links}
    })
}

pub fn notification(type_tag: &str, created_at: &str, content: Value) -> Value {
    json!({
        "type": type_tag,
        "createdAt": created_at,
        "contentType": "application/json",
        "content": content
    })
}
