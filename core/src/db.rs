use crate::cache::{CacheRecord, MemoryCache, SearchCache};
use crate::index::{Candidate, SkillIndex};
use crate::label::normalize_label;
use crate::merge::MultiSkillIter;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};

/// Orchestrates the posting index, the result cache, and the tie-break draw.
///
/// Insert order matters: the index mutates first so the cache update observes
/// the candidate's full skill set already in place. The RNG is injected so
/// callers (and tests) can seed the tie-break deterministically.
pub struct Database<C: SearchCache = MemoryCache> {
    index: SkillIndex,
    cache: C,
    rng: Box<dyn RngCore>,
}

impl Database<MemoryCache> {
    pub fn new() -> Self {
        Self::with_cache(MemoryCache::new())
    }
}

impl Default for Database<MemoryCache> {
    fn default() -> Self { Self::new() }
}

impl<C: SearchCache> Database<C> {
    pub fn with_cache(cache: C) -> Self {
        Self::with_cache_and_rng(cache, Box::new(StdRng::from_os_rng()))
    }

    pub fn with_cache_and_rng(cache: C, rng: Box<dyn RngCore>) -> Self {
        Database { index: SkillIndex::new(), cache, rng }
    }

    /// Add candidates to the database. Skill labels are normalized and
    /// de-duplicated before they touch a posting list; a candidate whose id
    /// is already present leaves both index and cache untouched.
    pub fn add<I: IntoIterator<Item = Candidate>>(&mut self, candidates: I) {
        for candidate in candidates {
            let candidate = Candidate {
                id: candidate.id,
                skills: canonical_skill_set(&candidate.skills),
            };
            tracing::debug!(id = %candidate.id, skills = candidate.skills.len(), "adding candidate");
            if self.index.insert(candidate.clone()) {
                self.cache.on_insert(&candidate);
            }
        }
    }

    /// Get a random best-matching candidate for the queried skills, or `None`
    /// when no candidate shares any of them.
    pub fn search<S: AsRef<str>>(&mut self, skills: &[S]) -> Option<&Candidate> {
        let skills = canonical_skill_set(skills);
        if self.cache.get(&skills).is_none() {
            let record = best_match(&self.index, &skills);
            tracing::debug!(
                score = record.score,
                winners = record.ids.len(),
                "cache miss, ran posting-list merge"
            );
            self.cache.put(&skills, record);
        }
        let record = self.cache.get(&skills)?;
        if record.score == 0 {
            return None;
        }
        let id = record.ids.choose(&mut *self.rng)?;
        self.index.get(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Normalize, drop empty labels, sort, and de-duplicate, so any spelling of
/// the same skill set canonicalizes to the same query.
fn canonical_skill_set<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut set: Vec<String> = skills
        .iter()
        .map(|s| normalize_label(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    set.sort();
    set.dedup();
    set
}

/// One merge pass over the relevant posting lists, folded into the running
/// best-score / best-set accumulator.
fn best_match(index: &SkillIndex, skills: &[String]) -> CacheRecord {
    let lists = index.posting_lists_for(skills);
    let mut ids: Vec<String> = Vec::new();
    let mut score = 0;
    for (id, c_score) in MultiSkillIter::new(lists) {
        if c_score > score {
            score = c_score;
            ids = vec![id.to_string()];
        } else if c_score == score {
            ids.push(id.to_string());
        }
    }
    CacheRecord { ids, score }
}
