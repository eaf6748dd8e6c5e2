//! In-memory resource.
//!
//! Records are JSON objects kept in insertion order. Filters match when the
//! field's text contains the filter value, ignoring case.

use crate::record::BaseRecord;
use crate::resource::{BaseProperty, Resource};
use adminkit_core::{Filter, FindOptions, ResourceOptions, SortDirection};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tokio::sync::RwLock;

pub struct MemoryResource {
    id: String,
    id_property: String,
    properties: Vec<BaseProperty>,
    records: RwLock<Vec<Map<String, Value>>>,
}

impl MemoryResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_property: "id".to_string(),
            properties: Vec::new(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Build a resource from configured options.
    pub fn from_options(id: impl Into<String>, options: &ResourceOptions) -> Self {
        let mut resource = Self::new(id);
        if let Some(id_property) = &options.id_property {
            resource = resource.with_id_property(id_property);
        }
        for (path, target) in &options.references {
            resource = resource.with_property(BaseProperty::new(path).referencing(target));
        }
        resource.with_records(options.records.iter().cloned())
    }

    /// Use a different field as the record id. Must be called before any
    /// property or record is added.
    pub fn with_id_property(mut self, path: impl Into<String>) -> Self {
        self.id_property = path.into();
        self
    }

    /// Declare a property. Declared properties keep their position ahead of
    /// properties inferred from records.
    pub fn with_property(mut self, property: BaseProperty) -> Self {
        if property.path() == self.id_property && !property.is_id() {
            self.properties.push(BaseProperty::id(property.path()));
        } else {
            self.properties.push(property);
        }
        self
    }

    /// Seed records. Non-object values are ignored; fields not declared yet
    /// become properties.
    pub fn with_records<I, V>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let maps = records_into_maps(records);
        let stored = self.records.get_mut();
        for value in maps {
            for key in value.keys() {
                if !self.properties.iter().any(|p| p.path() == key) {
                    let property = if *key == self.id_property {
                        BaseProperty::id(key.as_str())
                    } else {
                        BaseProperty::new(key.as_str())
                    };
                    self.properties.push(property);
                }
            }
            stored.push(value);
        }
        self
    }

    /// Insert a record at runtime.
    pub async fn insert(&self, record: Map<String, Value>) {
        self.records.write().await.push(record);
    }

    fn record_id(&self, params: &Map<String, Value>) -> Option<String> {
        match params.get(&self.id_property)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn to_record(&self, params: &Map<String, Value>) -> Option<BaseRecord> {
        let id = self.record_id(params)?;
        Some(BaseRecord::new(id, params.clone()))
    }
}

fn records_into_maps<I, V>(records: I) -> Vec<Map<String, Value>>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    records
        .into_iter()
        .filter_map(|v| match v.into() {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn matches(params: &Map<String, Value>, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| {
        let Some(actual) = params.get(field) else {
            return false;
        };
        text(actual)
            .to_lowercase()
            .contains(&text(expected).to_lowercase())
    })
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => text(x).cmp(&text(y)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl Resource for MemoryResource {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> Vec<BaseProperty> {
        self.properties.clone()
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<usize> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| matches(r, filter)).count())
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> anyhow::Result<Vec<BaseRecord>> {
        let records = self.records.read().await;
        let mut found: Vec<&Map<String, Value>> =
            records.iter().filter(|r| matches(r, filter)).collect();

        if let Some(sort) = &options.sort {
            found.sort_by(|a, b| {
                let ordering = compare(a.get(&sort.sort_by), b.get(&sort.sort_by));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        Ok(found
            .into_iter()
            .skip(options.offset)
            .take(limit)
            .filter_map(|params| self.to_record(params))
            .collect())
    }

    async fn find_one(&self, id: &str) -> anyhow::Result<Option<BaseRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| self.record_id(r).as_deref() == Some(id))
            .and_then(|params| self.to_record(params)))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| self.record_id(r).as_deref() != Some(id));
        if records.len() == before {
            anyhow::bail!("record '{}' does not exist in resource '{}'", id, self.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminkit_core::Sort;
    use serde_json::json;

    fn users() -> MemoryResource {
        MemoryResource::new("users").with_records(vec![
            json!({ "id": "3", "name": "Bob", "age": 40 }),
            json!({ "id": "1", "name": "Ann A", "age": 31 }),
            json!({ "id": "2", "name": "Anna B", "age": 9 }),
            json!("not a record"),
        ])
    }

    fn ids(records: &[BaseRecord]) -> Vec<&str> {
        records.iter().map(BaseRecord::id).collect()
    }

    #[test]
    fn test_properties_inferred_from_records() {
        let resource = users();
        let properties = resource.properties();
        let paths: Vec<&str> = properties.iter().map(BaseProperty::path).collect();

        assert_eq!(paths, vec!["age", "id", "name"]);
        assert!(properties[1].is_id());
    }

    #[tokio::test]
    async fn test_find_filters_case_insensitively() {
        let resource = users();
        let records = resource
            .find(&Filter::new().with("name", "ANN"), &FindOptions::new())
            .await
            .unwrap();

        assert_eq!(ids(&records), vec!["1", "2"]);
        assert_eq!(resource.count(&Filter::new().with("name", "ann")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_sorts_and_pages() {
        let resource = users();

        let by_age = resource
            .find(&Filter::new(), &FindOptions::new().sort(Sort::asc("age")))
            .await
            .unwrap();
        assert_eq!(ids(&by_age), vec!["2", "1", "3"]);

        let page = resource
            .find(
                &Filter::new(),
                &FindOptions::new().sort(Sort::desc("name")).offset(1).limit(1),
            )
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[tokio::test]
    async fn test_find_one_and_delete() {
        let resource = users();

        assert_eq!(resource.find_one("1").await.unwrap().unwrap().param_text("name"), "Ann A");
        assert!(resource.find_one("99").await.unwrap().is_none());

        resource.delete("1").await.unwrap();
        assert!(resource.find_one("1").await.unwrap().is_none());
        assert!(resource.delete("1").await.is_err());
    }

    #[tokio::test]
    async fn test_numeric_ids_and_custom_id_property() {
        let resource = MemoryResource::new("orders")
            .with_id_property("number")
            .with_records(vec![json!({ "number": 42, "total": 10 })]);

        let record = resource.find_one("42").await.unwrap().unwrap();
        assert_eq!(record.id(), "42");
        assert!(resource.properties().iter().any(|p| p.is_id() && p.path() == "number"));
    }

    #[tokio::test]
    async fn test_from_options() {
        let options = ResourceOptions {
            references: [("user_id".to_string(), "users".to_string())].into(),
            records: vec![json!({ "id": "42", "user_id": "1" }).as_object().cloned().unwrap()],
            ..Default::default()
        };
        let resource = MemoryResource::from_options("orders", &options);

        let user_id = resource
            .properties()
            .into_iter()
            .find(|p| p.path() == "user_id")
            .unwrap();
        assert_eq!(user_id.reference(), Some("users"));

        resource
            .insert(json!({ "id": "43" }).as_object().cloned().unwrap())
            .await;
        assert_eq!(resource.count(&Filter::new()).await.unwrap(), 2);
    }
}
