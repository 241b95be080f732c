use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub skills: Vec<String>,
}

impl Candidate {
    pub fn new<I, S>(id: impl Into<String>, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Candidate {
            id: id.into(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Default)]
pub struct SkillIndex {
    by_skill: HashMap<String, Vec<String>>, // posting lists sorted by candidate id
    by_id: HashMap<String, Candidate>,
}

impl SkillIndex {
    pub fn new() -> Self { Self::default() }

    /// Insert a candidate, wiring its id into the posting list of each skill.
    /// A candidate with an already-known id is ignored: overwriting would
    /// strand the id in the posting lists of its previous skills, and skill
    /// removal is unsupported. Returns false when the insert was rejected.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.by_id.contains_key(&candidate.id) {
            tracing::warn!(id = %candidate.id, "duplicate candidate id, insert ignored");
            return false;
        }
        for skill in &candidate.skills {
            sorted_insert(self.by_skill.entry(skill.clone()).or_default(), &candidate.id);
        }
        self.by_id.insert(candidate.id.clone(), candidate);
        true
    }

    /// Posting lists for the queried skills, skipping skills the index has
    /// never seen (they cannot raise any candidate's score).
    pub fn posting_lists_for<'a, S: AsRef<str>>(&'a self, skills: &[S]) -> Vec<&'a [String]> {
        skills
            .iter()
            .filter_map(|s| self.by_skill.get(s.as_ref()))
            .map(Vec::as_slice)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Ordered insertion keeping the list sorted; an id already present is left
/// in place so no posting list ever holds an id twice.
fn sorted_insert(list: &mut Vec<String>, id: &str) {
    if let Err(pos) = list.binary_search_by(|probe| probe.as_str().cmp(id)) {
        list.insert(pos, id.to_string());
    }
}
