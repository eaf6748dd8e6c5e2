//! Resource decoration: the registered actions and display metadata of a
//! resource.

use crate::action::{Action, ActionJson, ActionScope};
use crate::default_actions;
use crate::record::{BaseRecord, RecordJson};
use crate::registry::AdminRegistry;
use crate::resource::{BaseProperty, Resource};
use adminkit_core::{CurrentAdmin, ResourceOptions};
use serde_json::Map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A resource together with its actions and title property.
#[derive(Clone)]
pub struct ResourceDecorator {
    resource: Arc<dyn Resource>,
    properties: Vec<BaseProperty>,
    title_property: BaseProperty,
    actions: BTreeMap<String, Action>,
}

impl ResourceDecorator {
    /// Decorate a resource with no actions. The title property is the first
    /// title-named property, else the id property, else the first property.
    pub fn new(resource: Arc<dyn Resource>) -> Self {
        let properties = resource.properties();
        let title_property = properties
            .iter()
            .find(|p| p.is_title())
            .or_else(|| properties.iter().find(|p| p.is_id()))
            .or_else(|| properties.first())
            .cloned()
            .unwrap_or_else(|| BaseProperty::id("id"));

        Self {
            resource,
            properties,
            title_property,
            actions: BTreeMap::new(),
        }
    }

    /// Override the title property.
    pub fn with_title_property(mut self, path: &str) -> Self {
        self.title_property = self
            .property(path)
            .cloned()
            .unwrap_or_else(|| BaseProperty::new(path));
        self
    }

    /// Register an action, replacing any action with the same name.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.insert(action.name().to_string(), action);
        self
    }

    /// Register the built-in `list`, `show` and `delete` actions. Actions
    /// already registered under those names are kept.
    pub fn with_default_actions(mut self) -> Self {
        for action in default_actions::all() {
            self.actions
                .entry(action.name().to_string())
                .or_insert(action);
        }
        self
    }

    /// Apply configured options.
    pub fn with_options(self, options: &ResourceOptions) -> Self {
        match &options.title_property {
            Some(path) => self.with_title_property(path),
            None => self,
        }
    }

    pub fn id(&self) -> &str {
        self.resource.id()
    }

    pub fn resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }

    pub fn properties(&self) -> &[BaseProperty] {
        &self.properties
    }

    pub fn property(&self, path: &str) -> Option<&BaseProperty> {
        self.properties.iter().find(|p| p.path() == path)
    }

    pub fn title_property(&self) -> &BaseProperty {
        &self.title_property
    }

    /// Display title of a record. Runs no accessibility predicate.
    pub fn title_of(&self, record: &BaseRecord) -> String {
        record.param_text(self.title_property.path())
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Record actions the admin may run on the given record.
    pub fn record_actions(
        &self,
        record: &BaseRecord,
        current_admin: Option<&CurrentAdmin>,
    ) -> Vec<ActionJson> {
        self.actions
            .values()
            .filter(|a| a.scope() == ActionScope::Record)
            .filter(|a| a.is_accessible(current_admin, Some(record)))
            .map(Action::to_json)
            .collect()
    }

    /// Serialize a record for the given admin. Populated relations are
    /// serialized with their own resource's decorator, one level deep.
    pub fn record_json(
        &self,
        record: &BaseRecord,
        current_admin: Option<&CurrentAdmin>,
        admin: &AdminRegistry,
    ) -> RecordJson {
        let mut json = self.shallow_record_json(record, current_admin);

        for (path, related) in record.populated_all() {
            let target = self
                .property(path)
                .and_then(BaseProperty::reference)
                .and_then(|id| admin.find_resource(id).ok());

            if let Some(target) = target {
                json.populated
                    .insert(path.clone(), target.shallow_record_json(related, current_admin));
            }
        }

        json
    }

    fn shallow_record_json(
        &self,
        record: &BaseRecord,
        current_admin: Option<&CurrentAdmin>,
    ) -> RecordJson {
        RecordJson {
            id: record.id().to_string(),
            title: self.title_of(record),
            params: record.params().clone(),
            populated: BTreeMap::new(),
            record_actions: self.record_actions(record, current_admin),
            errors: Map::new(),
        }
    }
}

impl fmt::Debug for ResourceDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDecorator")
            .field("id", &self.id())
            .field("title_property", &self.title_property.path())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}
