use indexmap::{IndexMap, IndexSet};

pub const SUGGESTION_LIMIT: usize = 6;

/// Precomputed sound names, keyed by id and by constant-style name.
#[derive(Debug, Clone, Default)]
pub struct SoundRegistry {
    ids: IndexSet<String>,
    constants: IndexMap<String, String>,
}

impl SoundRegistry {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for id in ids {
            let id = id.into();
            let path = id.split_once(':').map_or(id.as_str(), |(_, path)| path);
            registry
                .constants
                .entry(constant_name(path))
                .or_insert_with(|| id.clone());
            registry.ids.insert(id);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Exact id first, then the constant form of the query.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        if let Some(id) = self.ids.get(query) {
            return Some(id.as_str());
        }
        self.constants.get(&constant_name(query)).map(String::as_str)
    }

    pub fn suggest(&self, query: &str) -> Vec<String> {
        let needle = constant_name(query);
        self.constants
            .keys()
            .filter(|constant| constant.contains(&needle))
            .take(SUGGESTION_LIMIT)
            .map(|constant| title_case(constant))
            .collect()
    }
}

pub fn constant_name(name: &str) -> String {
    name.trim().to_uppercase().replace(['.', ' '], "_")
}

fn title_case(constant: &str) -> String {
    constant
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
