use super::Entity;

/// A categorical filter an entity exposes, e.g. project status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facet {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

/// Selected value of a facet filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterValue {
    #[default]
    All,
    Is(String),
}

impl FilterValue {
    /// `"all"` (or blank) selects everything, anything else is an exact match
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            FilterValue::All
        } else {
            FilterValue::Is(value.to_string())
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Is(expected) => value == Some(expected.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FilterValue::All => "all",
            FilterValue::Is(value) => value,
        }
    }

    /// Step through `all` followed by each option, wrapping around
    pub fn cycle(&self, options: &[&str], forward: bool) -> Self {
        let position = match self {
            FilterValue::All => 0,
            FilterValue::Is(value) => options
                .iter()
                .position(|option| option == value)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        let len = options.len() + 1;
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        if next == 0 {
            FilterValue::All
        } else {
            FilterValue::Is(options[next - 1].to_string())
        }
    }
}

/// Search text plus facet selections, evaluated against every record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filters: Vec<(&'static str, FilterValue)>,
}

impl Query {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, key: &'static str, value: FilterValue) -> Self {
        self.set_filter(key, value);
        self
    }

    pub fn set_filter(&mut self, key: &'static str, value: FilterValue) {
        match self.filters.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.filters.push((key, value)),
        }
    }

    pub fn filter(&self, key: &str) -> &FilterValue {
        static ALL: FilterValue = FilterValue::All;
        self.filters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
            .unwrap_or(&ALL)
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term));

        matches_search
            && self
                .filters
                .iter()
                .all(|(key, value)| value.matches(record.facet_value(key).as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OPTIONS: &[&str] = &["new", "read", "replied"];

    #[test]
    fn parse_treats_all_as_wildcard() {
        assert_eq!(FilterValue::parse("all"), FilterValue::All);
        assert_eq!(FilterValue::parse(" "), FilterValue::All);
        assert_eq!(FilterValue::parse("read"), FilterValue::Is("read".into()));
    }

    #[test]
    fn cycle_wraps_through_all() {
        let mut value = FilterValue::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            value = value.cycle(OPTIONS, true);
            seen.push(value.label().to_string());
        }
        assert_eq!(seen, vec!["new", "read", "replied", "all"]);
        assert_eq!(FilterValue::All.cycle(OPTIONS, false), FilterValue::Is("replied".into()));
    }

    #[test]
    fn set_filter_replaces_existing_key() {
        let mut query = Query::default().with_filter("status", FilterValue::parse("new"));
        query.set_filter("status", FilterValue::All);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filter("status"), &FilterValue::All);
        assert_eq!(query.filter("category"), &FilterValue::All);
    }
}
