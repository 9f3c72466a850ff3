//! Candidate repository — pluggable storage for parsed resumes.
//!
//! Ids are positions: dense, 0-based, and reassigned after every delete so they stay
//! contiguous. `AppState` holds an `Arc<dyn CandidateRepository>`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::candidate::Candidate;
use crate::models::resume::ResumeRecord;

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Stores a record under the next id. Returns the stored candidate and the
    /// total count right after the insert.
    async fn add(&self, filename: String, data: ResumeRecord) -> (Candidate, usize);

    async fn get(&self, id: usize) -> Option<Candidate>;

    /// All candidates in id order.
    async fn list(&self) -> Vec<Candidate>;

    /// Removes `id` and renumbers the remaining candidates from 0. Returns the
    /// removed candidate and how many remain.
    async fn delete(&self, id: usize) -> Option<(Candidate, usize)>;

    /// Removes everything, returning how many candidates were dropped.
    async fn clear(&self) -> usize;

    async fn count(&self) -> usize;
}

/// Process-local store. Each call takes the lock once, so a delete and its id
/// renumbering are never observed half-done.
#[derive(Default)]
pub struct InMemoryCandidateRepository {
    candidates: RwLock<Vec<Candidate>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn add(&self, filename: String, data: ResumeRecord) -> (Candidate, usize) {
        let mut candidates = self.candidates.write().await;
        let candidate = Candidate {
            id: candidates.len(),
            filename,
            uploaded_at: Utc::now(),
            data,
        };
        candidates.push(candidate.clone());
        (candidate, candidates.len())
    }

    async fn get(&self, id: usize) -> Option<Candidate> {
        self.candidates.read().await.get(id).cloned()
    }

    async fn list(&self) -> Vec<Candidate> {
        self.candidates.read().await.clone()
    }

    async fn delete(&self, id: usize) -> Option<(Candidate, usize)> {
        let mut candidates = self.candidates.write().await;
        if id >= candidates.len() {
            return None;
        }

        let removed = candidates.remove(id);
        for (i, candidate) in candidates.iter_mut().enumerate().skip(id) {
            candidate.id = i;
        }
        Some((removed, candidates.len()))
    }

    async fn clear(&self) -> usize {
        let mut candidates = self.candidates.write().await;
        let count = candidates.len();
        candidates.clear();
        count
    }

    async fn count(&self) -> usize {
        self.candidates.read().await.len()
    }
}
