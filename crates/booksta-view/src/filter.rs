//! Filter panel state.
//!
//! A panel is described by a list of [`FilterField`]s. Edits go to a draft
//! copy; [`FilterState::apply`] promotes the draft to the applied copy that
//! projections and API queries read.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One control in a filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    Text {
        name: String,
        label: String,
        placeholder: String,
    },
    Number {
        name: String,
        label: String,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Two number keys edited together.
    Range {
        name_min: String,
        name_max: String,
        label: String,
        min: Option<i64>,
        max: Option<i64>,
    },
    Select {
        name: String,
        label: String,
        options: Vec<FilterOption>,
    },
    MultiSelect {
        name: String,
        label: String,
        options: Vec<FilterOption>,
    },
}

impl FilterField {
    pub fn label(&self) -> &str {
        match self {
            Self::Text { label, .. }
            | Self::Number { label, .. }
            | Self::Range { label, .. }
            | Self::Select { label, .. }
            | Self::MultiSelect { label, .. } => label,
        }
    }

    /// Keys this field owns, each with its empty value.
    fn defaults(&self) -> Vec<(&str, FilterValue)> {
        match self {
            Self::Text { name, .. } => vec![(name.as_str(), FilterValue::Text(String::new()))],
            Self::Number { name, .. } => vec![(name.as_str(), FilterValue::Number(None))],
            Self::Range {
                name_min, name_max, ..
            } => vec![
                (name_min.as_str(), FilterValue::Number(None)),
                (name_max.as_str(), FilterValue::Number(None)),
            ],
            Self::Select { name, .. } => vec![(name.as_str(), FilterValue::Select(None))],
            Self::MultiSelect { name, .. } => vec![(name.as_str(), FilterValue::Ids(Vec::new()))],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(Option<i64>),
    Select(Option<String>),
    Ids(Vec<i64>),
}

impl FilterValue {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Text(_) => FilterKind::Text,
            Self::Number(_) => FilterKind::Number,
            Self::Select(_) => FilterKind::Select,
            Self::Ids(_) => FilterKind::Ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(number) => number.is_none(),
            Self::Select(choice) => choice.as_deref().is_none_or(str::is_empty),
            Self::Ids(ids) => ids.is_empty(),
        }
    }

    /// Query-string form; `None` when empty.
    fn to_query(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            Self::Text(text) => Some(text.trim().to_string()),
            Self::Number(number) => number.map(|n| n.to_string()),
            Self::Select(choice) => choice.clone(),
            Self::Ids(ids) => Some(
                ids.iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Number,
    Select,
    Ids,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Ids => "id list",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter: {0}")]
    UnknownField(String),

    #[error("filter {name} expects a {expected} value, got {found}")]
    KindMismatch {
        name: String,
        expected: FilterKind,
        found: FilterKind,
    },
}

#[derive(Debug, Clone)]
pub struct FilterState {
    fields: Vec<FilterField>,
    /// Key order as declared by the fields.
    keys: Vec<String>,
    defaults: BTreeMap<String, FilterValue>,
    draft: BTreeMap<String, FilterValue>,
    applied: BTreeMap<String, FilterValue>,
    search: String,
}

impl FilterState {
    pub fn from_fields(fields: Vec<FilterField>) -> Self {
        let mut keys = Vec::new();
        let mut defaults = BTreeMap::new();
        for field in &fields {
            for (key, value) in field.defaults() {
                keys.push(key.to_string());
                defaults.insert(key.to_string(), value);
            }
        }
        Self {
            fields,
            keys,
            draft: defaults.clone(),
            applied: defaults.clone(),
            defaults,
            search: String::new(),
        }
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn draft(&self, name: &str) -> Option<&FilterValue> {
        self.draft.get(name)
    }

    pub fn applied(&self, name: &str) -> Option<&FilterValue> {
        self.applied.get(name)
    }

    pub fn applied_text(&self, name: &str) -> &str {
        match self.applied.get(name) {
            Some(FilterValue::Text(text)) => text.trim(),
            _ => "",
        }
    }

    pub fn applied_number(&self, name: &str) -> Option<i64> {
        match self.applied.get(name) {
            Some(FilterValue::Number(number)) => *number,
            _ => None,
        }
    }

    pub fn applied_ids(&self, name: &str) -> &[i64] {
        match self.applied.get(name) {
            Some(FilterValue::Ids(ids)) => ids,
            _ => &[],
        }
    }

    fn check(&self, name: &str, value: &FilterValue) -> Result<(), FilterError> {
        let current = self
            .draft
            .get(name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))?;
        if current.kind() != value.kind() {
            return Err(FilterError::KindMismatch {
                name: name.to_string(),
                expected: current.kind(),
                found: value.kind(),
            });
        }
        Ok(())
    }

    pub fn update_filter(&mut self, name: &str, value: FilterValue) -> Result<(), FilterError> {
        self.check(name, &value)?;
        self.draft.insert(name.to_string(), value);
        Ok(())
    }

    /// Applies every update or none of them.
    pub fn update_filters<I, K>(&mut self, updates: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = (K, FilterValue)>,
        K: Into<String>,
    {
        let updates: Vec<(String, FilterValue)> = updates
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        for (name, value) in &updates {
            self.check(name, value)?;
        }
        self.draft.extend(updates);
        Ok(())
    }

    /// Adds `id` to an id-list filter, or removes it if already present.
    pub fn toggle_array_filter(&mut self, name: &str, id: i64) -> Result<(), FilterError> {
        match self.draft.get_mut(name) {
            Some(FilterValue::Ids(ids)) => {
                if let Some(pos) = ids.iter().position(|&existing| existing == id) {
                    ids.remove(pos);
                } else {
                    ids.push(id);
                }
                Ok(())
            }
            Some(other) => Err(FilterError::KindMismatch {
                name: name.to_string(),
                expected: other.kind(),
                found: FilterKind::Ids,
            }),
            None => Err(FilterError::UnknownField(name.to_string())),
        }
    }

    /// Free-text search; takes effect immediately.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    /// Clears draft, applied values and the search text.
    pub fn reset(&mut self) {
        self.draft = self.defaults.clone();
        self.applied = self.defaults.clone();
        self.search.clear();
    }

    /// Whether the draft differs from an empty panel.
    pub fn has_active_filters(&self) -> bool {
        self.draft.values().any(|value| !value.is_empty())
    }

    /// Applied filters that are set; a range counts once.
    pub fn active_filter_count(&self) -> usize {
        let is_set = |key: &str| self.applied.get(key).is_some_and(|v| !v.is_empty());
        self.fields
            .iter()
            .filter(|field| match field {
                FilterField::Range {
                    name_min, name_max, ..
                } => is_set(name_min) || is_set(name_max),
                FilterField::Text { name, .. }
                | FilterField::Number { name, .. }
                | FilterField::Select { name, .. }
                | FilterField::MultiSelect { name, .. } => is_set(name),
            })
            .count()
    }

    /// Applied, non-empty values in declaration order.
    pub fn api_query(&self) -> Vec<(String, String)> {
        self.keys
            .iter()
            .filter_map(|key| {
                let value = self.applied.get(key)?.to_query()?;
                Some((key.clone(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> FilterState {
        FilterState::from_fields(vec![
            FilterField::Text {
                name: "title".into(),
                label: "Title".into(),
                placeholder: "Search by title".into(),
            },
            FilterField::Range {
                name_min: "yearMin".into(),
                name_max: "yearMax".into(),
                label: "Year".into(),
                min: Some(1000),
                max: None,
            },
            FilterField::MultiSelect {
                name: "authorIds".into(),
                label: "Authors".into(),
                options: vec![FilterOption::new("1", "Frank Herbert")],
            },
        ])
    }

    #[test]
    fn draft_is_not_applied_until_apply() {
        let mut state = panel();
        state
            .update_filter("title", FilterValue::Text("dune".into()))
            .unwrap();
        assert!(state.has_active_filters());
        assert_eq!(state.active_filter_count(), 0);
        assert!(state.api_query().is_empty());

        state.apply();
        assert_eq!(state.active_filter_count(), 1);
        assert_eq!(state.applied_text("title"), "dune");
    }

    #[test]
    fn range_counts_once() {
        let mut state = panel();
        state
            .update_filters([
                ("yearMin", FilterValue::Number(Some(1950))),
                ("yearMax", FilterValue::Number(Some(1970))),
            ])
            .unwrap();
        state.apply();
        assert_eq!(state.active_filter_count(), 1);
        assert_eq!(
            state.api_query(),
            vec![
                ("yearMin".to_string(), "1950".to_string()),
                ("yearMax".to_string(), "1970".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_unknown_and_mismatched() {
        let mut state = panel();
        assert_eq!(
            state.update_filter("genre", FilterValue::Text("x".into())),
            Err(FilterError::UnknownField("genre".into()))
        );
        assert!(matches!(
            state.update_filter("yearMin", FilterValue::Text("1950".into())),
            Err(FilterError::KindMismatch { .. })
        ));
        assert!(state.toggle_array_filter("title", 1).is_err());
    }

    #[test]
    fn update_filters_is_all_or_nothing() {
        let mut state = panel();
        let result = state.update_filters([
            ("title", FilterValue::Text("dune".into())),
            ("missing", FilterValue::Number(Some(1))),
        ]);
        assert!(result.is_err());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn toggle_keeps_insertion_order() {
        let mut state = panel();
        for id in [3, 1, 2] {
            state.toggle_array_filter("authorIds", id).unwrap();
        }
        state.toggle_array_filter("authorIds", 1).unwrap();
        state.apply();
        assert_eq!(state.applied_ids("authorIds"), &[3, 2]);
        assert_eq!(
            state.api_query(),
            vec![("authorIds".to_string(), "3,2".to_string())]
        );
    }

    #[test]
    fn reset_clears_both_copies() {
        let mut state = panel();
        state.toggle_array_filter("authorIds", 1).unwrap();
        state.apply();
        state.set_search("dune");
        state.reset();
        assert!(!state.has_active_filters());
        assert_eq!(state.active_filter_count(), 0);
        assert_eq!(state.search(), "");
    }
}
