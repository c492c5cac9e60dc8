//! Recommendation pipeline: filter, score, rank, truncate, enrich.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::format::{format_event_data, format_preferences};
use super::scoring::calculate_event_score;
use crate::error::ReasoningError;
use crate::event::Event;
use crate::preferences::{Preferences, User};
use crate::reasoning::ReasoningService;
use crate::schedule::Schedule;

/// Reasoning text every recommendation starts with.
pub const PLACEHOLDER_REASONING: &str = "Basic compatibility score";
/// Prefix of the shared excerpt written on successful enrichment.
pub const ENRICHED_PREFIX: &str = "AI-enhanced reasoning: ";
/// Number of characters of the backend reply kept in the excerpt.
pub const EXCERPT_CHARS: usize = 100;
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub event: Event,
    pub score: f64,
    pub reasoning: String,
}

/// What happened to the enrichment request.
#[derive(Debug)]
pub enum EnrichmentOutcome {
    /// The backend answered in time; `excerpt` was copied into every
    /// recommendation after [`ENRICHED_PREFIX`].
    Applied { excerpt: String },
    /// The backend failed or timed out; placeholder reasoning was kept.
    Unavailable(ReasoningError),
}

impl EnrichmentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Which candidates are described to the reasoning backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentScope {
    /// Every candidate passed in, including conflicting and truncated ones.
    #[default]
    AllCandidates,
    /// Only the ranked, truncated recommendations.
    Recommended,
}

/// Ranked recommendations plus the enrichment outcome.
#[derive(Debug)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub enrichment: EnrichmentOutcome,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.recommendations.iter()
    }

}

type EnrichmentTask = JoinHandle<Result<String, ReasoningError>>;

/// Ranks candidate events for a user and reinforces interests from
/// attendance.
pub struct RecommendationEngine {
    reasoning: Arc<dyn ReasoningService>,
    enrichment_timeout: Duration,
    scope: EnrichmentScope,
}

impl RecommendationEngine {
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self {
            reasoning,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
            scope: EnrichmentScope::default(),
        }
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    pub fn with_enrichment_scope(mut self, scope: EnrichmentScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn enrichment_timeout(&self) -> Duration {
        self.enrichment_timeout
    }

    pub fn enrichment_scope(&self) -> EnrichmentScope {
        self.scope
    }

    /// Rank `available` for `user`, skipping anything that conflicts with
    /// `schedule`, and keep at most `max_recommendations`.
    ///
    /// One enrichment request is spawned per call and joined with a bounded
    /// wait. Its failure never fails the call; see
    /// [`RecommendationSet::enrichment`].
    pub async fn recommend_events(
        &self,
        user: &User,
        available: &[Event],
        schedule: &Schedule,
        max_recommendations: usize,
    ) -> RecommendationSet {
        let preferences = user.preferences();
        let preferences_text = format_preferences(preferences);

        let (mut recommendations, task) = match self.scope {
            EnrichmentScope::AllCandidates => {
                let task = self.spawn_enrichment(preferences_text, format_event_data(available));
                let ranked = rank(available, preferences, schedule, max_recommendations);
                (ranked, task)
            }
            EnrichmentScope::Recommended => {
                let ranked = rank(available, preferences, schedule, max_recommendations);
                let events_text = format_event_data(ranked.iter().map(|r| &r.event));
                (ranked, self.spawn_enrichment(preferences_text, events_text))
            }
        };

        let enrichment = match self.join_enrichment(task).await {
            Ok(content) => {
                let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
                let reasoning = format!("{ENRICHED_PREFIX}{excerpt}");
                for rec in &mut recommendations {
                    rec.reasoning.clone_from(&reasoning);
                }
                tracing::info!(
                    provider = self.reasoning.name(),
                    count = recommendations.len(),
                    "applied enrichment to recommendations"
                );
                EnrichmentOutcome::Applied { excerpt }
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.reasoning.name(),
                    error = %err,
                    "enrichment unavailable, keeping placeholder reasoning"
                );
                EnrichmentOutcome::Unavailable(err)
            }
        };

        RecommendationSet {
            recommendations,
            enrichment,
        }
    }

    /// Add one to the user's weight for every tag of every attended event.
    /// Tags that were not interests yet start at 1.
    pub fn update_user_interests(&self, user: &mut User, attended: &[Event]) {
        let preferences = user.preferences_mut();
        for event in attended {
            for tag in event.tags() {
                let weight = preferences.reinforce_interest(tag);
                tracing::debug!(tag = %tag, weight, "reinforced interest");
            }
        }
    }

    pub fn calculate_event_score(&self, event: &Event, preferences: &Preferences) -> f64 {
        calculate_event_score(event, preferences)
    }

    fn spawn_enrichment(&self, preferences_text: String, events_text: String) -> EnrichmentTask {
        let reasoning = Arc::clone(&self.reasoning);
        tokio::spawn(async move { reasoning.recommend(&preferences_text, &events_text).await })
    }

    async fn join_enrichment(&self, mut task: EnrichmentTask) -> Result<String, ReasoningError> {
        match tokio::time::timeout(self.enrichment_timeout, &mut task).await {
            Ok(joined) => joined?,
            Err(_) => {
                task.abort();
                Err(ReasoningError::Timeout {
                    timeout_ms: u64::try_from(self.enrichment_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                })
            }
        }
    }
}

/// Drop conflicting candidates, score the rest, sort descending by score and
/// truncate. Equal scores keep input order.
fn rank(
    available: &[Event],
    preferences: &Preferences,
    schedule: &Schedule,
    max_recommendations: usize,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = available
        .iter()
        .filter(|event| {
            let conflict = schedule.has_conflict(event);
            if conflict {
                tracing::debug!(event = event.name(), "dropping candidate that conflicts with schedule");
            }
            !conflict
        })
        .map(|event| Recommendation {
            event: event.clone(),
            score: calculate_event_score(event, preferences),
            reasoning: PLACEHOLDER_REASONING.to_string(),
        })
        .collect();

    recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    recommendations.truncate(max_recommendations);
    recommendations
}
