use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use uuid::Uuid;

use crate::error::HustleError;
use crate::error::Result;

pub const STRIPE_PLANS: [&str; 3] = ["starter", "boss", "ceo"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub posts: Vec<Post>,
    pub tasks: Vec<Task>,
    pub contacts: Vec<Contact>,
    pub goals: Vec<Goal>,
    pub notes_vault: String,
    pub quick_notes: String,
    pub metrics: Metrics,
    #[serde(deserialize_with = "null_links_as_empty")]
    pub stripe_links: BTreeMap<String, String>,
    // Unknown top-level keys ride along so a save never drops another client's data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            tasks: Vec::new(),
            contacts: Vec::new(),
            goals: Vec::new(),
            notes_vault: String::new(),
            quick_notes: String::new(),
            metrics: Metrics::default(),
            stripe_links: STRIPE_PLANS
                .iter()
                .map(|plan| (plan.to_string(), String::new()))
                .collect(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub post_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(deserialize_with = "null_as_default")]
    pub due: String,
    #[serde(deserialize_with = "null_as_default")]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub clicks: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub deals: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub leads: f64,
}

pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Goal {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Posts,
    Tasks,
    Contacts,
    Goals,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [Self::Posts, Self::Tasks, Self::Contacts, Self::Goals];

    pub fn label(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Tasks => "tasks",
            Self::Contacts => "contacts",
            Self::Goals => "goals",
        }
    }

    pub fn confirm_clear_prompt(self) -> &'static str {
        match self {
            Self::Posts => "Clear all scheduled posts?",
            Self::Tasks => "Clear all tasks?",
            Self::Contacts => "Clear all contacts?",
            Self::Goals => "Clear all goals?",
        }
    }

    pub fn cleared_message(self) -> &'static str {
        match self {
            Self::Posts => "Posts cleared",
            Self::Tasks => "Tasks cleared",
            Self::Contacts => "Contacts cleared",
            Self::Goals => "Goals cleared",
        }
    }

    pub fn removed_message(self) -> &'static str {
        match self {
            Self::Posts => "Post removed",
            Self::Tasks => "Task removed",
            Self::Contacts => "Contact removed",
            Self::Goals => "Goal removed",
        }
    }
}

impl Document {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::merged_over_defaults(value)
    }

    // Shallow: each present key replaces the default wholesale. Nulls, top-level
    // or inside a record, keep the default.
    pub fn merged_over_defaults(value: Value) -> Result<Self> {
        let Value::Object(overrides) = value else {
            return Err(HustleError::NotAnObject(value_kind(&value)));
        };

        let mut merged = match serde_json::to_value(Self::default())? {
            Value::Object(map) => map,
            other => return Err(HustleError::NotAnObject(value_kind(&other))),
        };
        for (key, value) in overrides {
            if value.is_null() {
                continue;
            }
            merged.insert(key, value);
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len_of(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Posts => self.posts.len(),
            ListKind::Tasks => self.tasks.len(),
            ListKind::Contacts => self.contacts.len(),
            ListKind::Goals => self.goals.len(),
        }
    }

    pub fn clear(&mut self, kind: ListKind) {
        match kind {
            ListKind::Posts => self.posts.clear(),
            ListKind::Tasks => self.tasks.clear(),
            ListKind::Contacts => self.contacts.clear(),
            ListKind::Goals => self.goals.clear(),
        }
    }

    pub fn remove(&mut self, kind: ListKind, id: &str) -> bool {
        match kind {
            ListKind::Posts => remove_by_id(&mut self.posts, id),
            ListKind::Tasks => remove_by_id(&mut self.tasks, id),
            ListKind::Contacts => remove_by_id(&mut self.contacts, id),
            ListKind::Goals => remove_by_id(&mut self.goals, id),
        }
    }

    pub fn open_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    pub fn stripe_link(&self, plan: &str) -> Option<&str> {
        self.stripe_links
            .get(plan)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}

pub fn remove_by_id<T: Record>(list: &mut Vec<T>, id: &str) -> bool {
    match list.iter().position(|record| record.id() == id) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_links_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let links = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(links
        .into_iter()
        .map(|(plan, url)| (plan, url.unwrap_or_default()))
        .collect())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn post(id: &str, date: &str) -> Post {
        Post {
            id: id.to_string(),
            date: date.to_string(),
            title: format!("post {id}"),
            ..Post::default()
        }
    }

    #[test]
    fn defaults_have_empty_lists_and_three_plans() {
        let doc = Document::default();
        assert!(doc.posts.is_empty());
        assert!(doc.goals.is_empty());
        assert_eq!(doc.metrics, Metrics::default());
        assert_eq!(
            doc.stripe_links.keys().cloned().collect::<Vec<_>>(),
            vec!["boss", "ceo", "starter"]
        );
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let mut doc = Document::default();
        doc.posts.push(Post {
            post_type: "Pin".to_string(),
            ..post("a", "2026-01-02")
        });
        let value = serde_json::to_value(&doc).expect("serialize");
        assert!(value.get("notesVault").is_some());
        assert!(value.get("quickNotes").is_some());
        assert!(value.get("stripeLinks").is_some());
        assert_eq!(value["posts"][0]["type"], json!("Pin"));
    }

    #[test]
    fn partial_metrics_replace_the_whole_object() {
        let doc = Document::merged_over_defaults(json!({
            "metrics": { "revenue": 100 },
            "stripeLinks": { "boss": "https://pay.example/boss" }
        }))
        .expect("merge");

        assert_eq!(doc.metrics.revenue, 100.0);
        assert_eq!(doc.metrics.clicks, 0.0);
        // The default plans are not merged back in.
        assert_eq!(doc.stripe_links.len(), 1);
        assert_eq!(doc.stripe_link("boss"), Some("https://pay.example/boss"));
        assert_eq!(doc.stripe_link("starter"), None);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let doc = Document::merged_over_defaults(json!({
            "quickNotes": "hello",
            "tasks": [{ "id": "t1", "text": "film" }]
        }))
        .expect("merge");

        assert_eq!(doc.quick_notes, "hello");
        assert_eq!(doc.tasks.len(), 1);
        assert_eq!(doc.tasks[0].priority, "");
        assert!(!doc.tasks[0].done);
        assert!(doc.posts.is_empty());
        assert_eq!(doc.stripe_links.len(), 3);
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let doc = Document::merged_over_defaults(json!({ "theme": "gold" })).expect("merge");
        let text = serde_json::to_string(&doc).expect("serialize");
        let back = Document::from_json_str(&text).expect("parse");
        assert_eq!(back.extra.get("theme"), Some(&json!("gold")));
        assert_eq!(back, doc);
    }

    #[test]
    fn null_values_keep_the_default() {
        let doc = Document::merged_over_defaults(json!({ "posts": null })).expect("merge");
        assert!(doc.posts.is_empty());
    }

    #[test]
    fn nulls_inside_records_keep_field_defaults() {
        let doc = Document::merged_over_defaults(json!({
            "tasks": [{ "id": "t1", "text": "film", "due": null, "done": null }],
            "goals": [{ "id": "g1", "title": "Followers", "target": 500, "progress": null }],
            "metrics": { "revenue": 80, "leads": null },
            "stripeLinks": { "boss": null, "ceo": "https://pay.example/ceo" }
        }))
        .expect("merge");

        assert_eq!(doc.tasks[0].due, "");
        assert!(!doc.tasks[0].done);
        assert_eq!(doc.goals[0].progress, 0.0);
        assert_eq!(doc.goals[0].target, 500.0);
        assert_eq!(doc.metrics.revenue, 80.0);
        assert_eq!(doc.metrics.leads, 0.0);
        assert_eq!(doc.stripe_links.get("boss").map(String::as_str), Some(""));
        assert_eq!(doc.stripe_link("ceo"), Some("https://pay.example/ceo"));
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        assert!(matches!(
            Document::from_json_str("[1, 2]"),
            Err(HustleError::NotAnObject("an array"))
        ));
        assert!(matches!(
            Document::from_json_str("not json"),
            Err(HustleError::Json(_))
        ));
    }

    #[test]
    fn wrongly_shaped_key_is_an_error() {
        assert!(Document::merged_over_defaults(json!({ "posts": "nope" })).is_err());
    }

    #[test]
    fn remove_by_id_removes_only_the_match_and_keeps_order() {
        let mut posts = vec![post("a", "1"), post("b", "2"), post("c", "3"), post("d", "4")];
        assert!(remove_by_id(&mut posts, "b"));
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);

        assert!(!remove_by_id(&mut posts, "zzz"));
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn document_remove_dispatches_by_list() {
        let mut doc = Document::default();
        doc.goals.push(Goal {
            id: "g1".to_string(),
            ..Goal::default()
        });
        doc.posts.push(post("g1", "2026-01-01"));

        assert!(doc.remove(ListKind::Goals, "g1"));
        assert_eq!(doc.len_of(ListKind::Goals), 0);
        assert_eq!(doc.len_of(ListKind::Posts), 1);
    }

    #[test]
    fn new_ids_are_distinct() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
