//! Generic CRUD client
//!
//! The five operations every collection supports, parameterized by
//! [`ResourceDef`]. Each operation issues exactly one request and awaits
//! the full response before acting; nothing is retried.

use super::registry::ResourceDef;
use crate::api::client::ApiClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// One entry of a populated select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Record id, submitted as the field value
    pub value: String,
    /// Visible text, taken from the source resource's name field
    pub label: String,
}

/// Fetch the whole collection. The response must be a top-level JSON array.
pub async fn list_records(api: &ApiClient, def: &ResourceDef) -> Result<Vec<Value>> {
    let response = api.get(&api.collection_url(&def.collection_path)).await?;

    let items = response
        .as_array()
        .cloned()
        .with_context(|| format!("Expected a JSON array from /{}", def.collection_path))?;

    tracing::debug!("Listed {} records from /{}", items.len(), def.collection_path);
    Ok(items)
}

/// Fetch one record by id, used to preload the edit form
pub async fn fetch_record(api: &ApiClient, def: &ResourceDef, id: &str) -> Result<Value> {
    anyhow::ensure!(!id.is_empty(), "Record id must not be empty");
    api.get(&api.record_url(&def.collection_path, id)).await
}

/// Create a record from submitted form fields
pub async fn create_record(api: &ApiClient, def: &ResourceDef, fields: Value) -> Result<Value> {
    api.post(&api.collection_url(&def.collection_path), &fields)
        .await
}

/// Update a record in place from submitted form fields
pub async fn update_record(
    api: &ApiClient,
    def: &ResourceDef,
    id: &str,
    fields: Value,
) -> Result<Value> {
    anyhow::ensure!(!id.is_empty(), "Record id must not be empty");
    api.patch(&api.record_url(&def.collection_path, id), &fields)
        .await
}

/// Delete a record by id. Confirmation is the caller's responsibility;
/// this function always issues the request.
pub async fn delete_record(api: &ApiClient, def: &ResourceDef, id: &str) -> Result<Value> {
    anyhow::ensure!(!id.is_empty(), "Record id must not be empty");
    api.delete(&api.record_url(&def.collection_path, id)).await
}

/// Fetch the source collection of a select field and map each record to an
/// option: value = record id, label = the source's name field.
pub async fn fetch_select_options(
    api: &ApiClient,
    source: &ResourceDef,
) -> Result<Vec<SelectOption>> {
    let records = list_records(api, source).await?;

    Ok(records
        .iter()
        .map(|record| SelectOption {
            value: extract_json_value(record, &source.id_field),
            label: extract_json_value(record, &source.name_field),
        })
        .collect())
}

/// Extract a value from JSON using a dot-notation path
pub fn extract_json_value(item: &Value, path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = item;

    for part in parts {
        // Handle array index
        if let Ok(idx) = part.parse::<usize>() {
            current = match current.get(idx) {
                Some(v) => v,
                None => return "-".to_string(),
            };
        } else {
            current = match current.get(part) {
                Some(v) => v,
                None => return "-".to_string(),
            };
        }
    }

    match current {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}

/// Extract a record's id for building actions against it. Returns `None`
/// when the id is absent or empty; such records cannot be edited or
/// deleted.
pub fn record_id(item: &Value, def: &ResourceDef) -> Option<String> {
    match extract_json_value(item, &def.id_field) {
        id if id.is_empty() || id == "-" => None,
        id => Some(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::get_resource;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_api(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_list_rejects_non_array_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "array"})))
            .mount(&server)
            .await;

        let api = mock_api(&server).await;
        let def = get_resource("categorias").unwrap();
        let result = list_records(&api, def).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_posts_exact_body() {
        let server = MockServer::start().await;
        let body = json!({"nomeCategoria": "Fiction", "descricaoCategoria": "desc"});

        Mock::given(method("POST"))
            .and(path("/categorias"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "1", "nomeCategoria": "Fiction", "descricaoCategoria": "desc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = mock_api(&server).await;
        let def = get_resource("categorias").unwrap();
        let created = create_record(&api, def, body).await.unwrap();
        assert_eq!(created["id"], "1");
    }

    #[tokio::test]
    async fn test_delete_targets_record_url() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/livros/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let api = mock_api(&server).await;
        let def = get_resource("livros").unwrap();
        delete_record(&api, def, "42").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_without_request() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404 the mock server, but the
        // guard must fail before a request is built.
        let api = mock_api(&server).await;
        let def = get_resource("livros").unwrap();

        assert!(fetch_record(&api, def, "").await.is_err());
        assert!(delete_record(&api, def, "").await.is_err());
        assert!(update_record(&api, def, "", json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_select_options_map_id_and_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "nomeCategoria": "Fiction", "descricaoCategoria": "a"},
                {"id": "2", "nomeCategoria": "History", "descricaoCategoria": "b"}
            ])))
            .mount(&server)
            .await;

        let api = mock_api(&server).await;
        let source = get_resource("categorias").unwrap();
        let options = fetch_select_options(&api, source).await.unwrap();

        assert_eq!(
            options,
            vec![
                SelectOption { value: "1".into(), label: "Fiction".into() },
                SelectOption { value: "2".into(), label: "History".into() },
            ]
        );
    }

    #[test]
    fn test_extract_json_value_paths() {
        let item = json!({"id": 7, "nested": {"name": "x"}, "arr": ["a", "b"]});
        assert_eq!(extract_json_value(&item, "id"), "7");
        assert_eq!(extract_json_value(&item, "nested.name"), "x");
        assert_eq!(extract_json_value(&item, "arr.1"), "b");
        assert_eq!(extract_json_value(&item, "missing"), "-");
    }

    #[test]
    fn test_record_id_requires_non_empty() {
        let def = get_resource("categorias").unwrap();
        assert_eq!(record_id(&json!({"id": "9"}), def), Some("9".into()));
        assert_eq!(record_id(&json!({"id": ""}), def), None);
        assert_eq!(record_id(&json!({}), def), None);
    }
}
