use crate::index::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// Cache keys are the queried skills joined by SEP. Labels are free to contain
// either control character: ESC escapes itself and any embedded SEP, so every
// skill set round-trips through its key exactly.
const SEP: char = '\u{001F}';
const ESC: char = '\u{001B}';

/// The winners recorded for one skill-set key: the ids sharing the maximum
/// overlap score, and that score. A score of 0 always carries an empty id set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub ids: Vec<String>,
    pub score: u32,
}

/// Expects the canonical (sorted, de-duplicated) skill set.
pub fn serialize_skill_set<S: AsRef<str>>(skills: &[S]) -> String {
    let mut key = String::new();
    for skill in skills {
        for c in skill.as_ref().chars() {
            if c == SEP || c == ESC {
                key.push(ESC);
            }
            key.push(c);
        }
        key.push(SEP);
    }
    key
}

pub fn deserialize_key(key: &str) -> Vec<String> {
    let mut skills = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars();
    while let Some(c) = chars.next() {
        if c == ESC {
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
        } else if c == SEP {
            skills.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    skills
}

pub trait SearchCache {
    fn get(&self, skills: &[String]) -> Option<&CacheRecord>;
    fn put(&mut self, skills: &[String], record: CacheRecord);
    /// Fold one freshly indexed candidate into every cached record. The
    /// record invariant (true maximum score, exact winner set) holds before
    /// the insert, and the new candidate is the only change to the database,
    /// so a local score comparison per key keeps it true afterwards.
    fn on_insert(&mut self, candidate: &Candidate);
}

#[derive(Default)]
pub struct MemoryCache {
    entries: HashMap<String, CacheRecord>,
}

impl MemoryCache {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SearchCache for MemoryCache {
    fn get(&self, skills: &[String]) -> Option<&CacheRecord> {
        self.entries.get(&serialize_skill_set(skills))
    }

    fn put(&mut self, skills: &[String], record: CacheRecord) {
        self.entries.insert(serialize_skill_set(skills), record);
    }

    fn on_insert(&mut self, candidate: &Candidate) {
        let skills: HashSet<&str> = candidate.skills.iter().map(String::as_str).collect();
        for (key, record) in self.entries.iter_mut() {
            let target = deserialize_key(key);
            let score = target.iter().filter(|s| skills.contains(s.as_str())).count() as u32;
            if score > record.score {
                tracing::debug!(id = %candidate.id, score, "new best for cached query");
                *record = CacheRecord { ids: vec![candidate.id.clone()], score };
            } else if score == record.score && score > 0 {
                record.ids.push(candidate.id.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_round_trips() {
        let set = skills(&["golang", "k8s", "nestjs"]);
        assert_eq!(deserialize_key(&serialize_skill_set(&set)), set);
    }

    #[test]
    fn key_round_trips_control_characters() {
        let set = skills(&["a\u{001F}b", "c\u{001B}d", "\u{001B}\u{001F}"]);
        assert_eq!(deserialize_key(&serialize_skill_set(&set)), set);
    }

    #[test]
    fn embedded_separator_does_not_split_labels() {
        // one two-label set vs. one label containing the separator
        let joined = skills(&["golang\u{001F}k8s"]);
        let split = skills(&["golang", "k8s"]);
        assert_ne!(serialize_skill_set(&joined), serialize_skill_set(&split));
    }

    #[test]
    fn empty_set_round_trips() {
        assert!(deserialize_key(&serialize_skill_set(&skills(&[]))).is_empty());
    }

    #[test]
    fn on_insert_appends_on_tied_score() {
        let mut cache = MemoryCache::new();
        let key = skills(&["golang", "k8s"]);
        cache.put(&key, CacheRecord { ids: vec!["a".into()], score: 2 });
        cache.on_insert(&Candidate::new("d", ["golang", "k8s", "kotlin"]));
        let record = cache.get(&key).unwrap();
        assert_eq!(record.score, 2);
        assert_eq!(record.ids, vec!["a".to_string(), "d".into()]);
    }

    #[test]
    fn on_insert_replaces_on_higher_score() {
        let mut cache = MemoryCache::new();
        let key = skills(&["golang", "k8s"]);
        cache.put(&key, CacheRecord { ids: vec!["a".into()], score: 1 });
        cache.on_insert(&Candidate::new("d", ["golang", "k8s"]));
        let record = cache.get(&key).unwrap();
        assert_eq!(record.score, 2);
        assert_eq!(record.ids, vec!["d".to_string()]);
    }

    #[test]
    fn on_insert_leaves_lower_scores_untouched() {
        let mut cache = MemoryCache::new();
        let key = skills(&["golang", "k8s"]);
        cache.put(&key, CacheRecord { ids: vec!["a".into()], score: 2 });
        cache.on_insert(&Candidate::new("d", ["golang"]));
        let record = cache.get(&key).unwrap();
        assert_eq!(record.score, 2);
        assert_eq!(record.ids, vec!["a".to_string()]);
    }

    #[test]
    fn on_insert_keeps_no_match_records_empty() {
        let mut cache = MemoryCache::new();
        let key = skills(&["cobol"]);
        cache.put(&key, CacheRecord { ids: vec![], score: 0 });
        cache.on_insert(&Candidate::new("d", ["golang"]));
        let record = cache.get(&key).unwrap();
        assert_eq!(record.score, 0);
        assert!(record.ids.is_empty());
    }
}
