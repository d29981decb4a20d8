//! The intelligence service.
//!
//! One dependency-injected struct owns the whole per-request pipeline:
//! Resolve -> Feature gate -> Cache check -> Generate -> Cache write ->
//! Return. The host constructs it once and shares it; nothing here is a
//! global.
//!
//! Failure policy: only an unresolvable school surfaces to the caller (as
//! `None`). Cache trouble degrades to regeneration, generator trouble
//! degrades to zero starters from that source. A lookup never aborts because
//! an optimization or one data source let it down.

use scout_core::{
    rank_schools, ConversationStarter, School, ScoutConfig, ScoutResult,
};
use scout_llm::{AsyncStarterGenerator, GeneratorRegistry, StarterGenerator};
use scout_storage::{CacheKey, StarterCache};
use std::sync::Arc;

use crate::directory::{DirectoryStats, SchoolDirectory};
use crate::merger::merge_starters;

/// Sales-intelligence lookups over the school dataset.
pub struct SchoolIntelligence {
    directory: Arc<dyn SchoolDirectory>,
    cache: Arc<dyn StarterCache>,
    generators: GeneratorRegistry,
    async_financial: Option<Arc<dyn AsyncStarterGenerator>>,
    config: ScoutConfig,
}

impl SchoolIntelligence {
    pub fn new(
        directory: Arc<dyn SchoolDirectory>,
        cache: Arc<dyn StarterCache>,
        generators: GeneratorRegistry,
        config: ScoutConfig,
    ) -> Self {
        Self {
            directory,
            cache,
            generators,
            async_financial: None,
            config,
        }
    }

    /// Wire an async financial generator; without one the async lookup path
    /// falls back to the blocking generator.
    pub fn with_async_financial(mut self, generator: Arc<dyn AsyncStarterGenerator>) -> Self {
        self.async_financial = Some(generator);
        self
    }

    fn starter_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.default_starter_count)
            .clamp(1, self.config.max_starter_count)
    }

    fn run_generator(
        &self,
        generator: &Arc<dyn StarterGenerator>,
        school: &School,
        count: usize,
    ) -> Option<Vec<ConversationStarter>> {
        match generator.generate(school, count) {
            Ok(starters) => Some(starters),
            Err(e) => {
                tracing::error!(
                    urn = %school.urn,
                    source = %generator.source(),
                    error = %e,
                    "starter generation failed"
                );
                None
            }
        }
    }

    /// Look up a school and enrich it with financial conversation starters.
    ///
    /// Returns `None` only when the name does not resolve. Cached starters
    /// are served while fresh unless `force_refresh` is set.
    pub fn get_school_intelligence(
        &self,
        name: &str,
        force_refresh: bool,
        count: Option<usize>,
    ) -> Option<School> {
        let mut school = self.directory.school_by_name(name)?;
        if !self.config.features.conversation_starters {
            tracing::debug!(urn = %school.urn, "conversation starters disabled");
            return Some(school);
        }

        let count = self.starter_count(count);
        let key = CacheKey::for_school(&school.urn);
        if !force_refresh {
            if let Some(starters) = self.cache.get(&key) {
                school.conversation_starters = starters;
                return Some(school);
            }
        }

        match self.run_generator(self.generators.financial(), &school, count) {
            Some(starters) => {
                self.cache.put(&key, &starters);
                school.conversation_starters = starters;
            }
            // Failed generations are not cached, so the next lookup retries.
            None => school.conversation_starters = Vec::new(),
        }
        Some(school)
    }

    /// Lookup with Ofsted findings folded in.
    ///
    /// The Ofsted source runs first with the full budget; the financial
    /// source fills the remainder (always at least one). On a topic clash
    /// the Ofsted starter wins.
    pub fn get_school_intelligence_with_ofsted(
        &self,
        name: &str,
        force_refresh: bool,
        count: Option<usize>,
    ) -> Option<School> {
        let mut school = self.directory.school_by_name(name)?;
        if !self.config.features.conversation_starters {
            tracing::debug!(urn = %school.urn, "conversation starters disabled");
            return Some(school);
        }

        let count = self.starter_count(count);
        let key = CacheKey::for_school(&school.urn);
        if !force_refresh {
            if let Some(starters) = self.cache.get(&key) {
                school.conversation_starters = starters;
                return Some(school);
            }
        }

        let mut any_success = false;
        let ofsted_starters = match self.generators.ofsted() {
            Some(generator) if self.config.features.ofsted_analysis => self
                .run_generator(generator, &school, count)
                .inspect(|_| any_success = true)
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        let remainder = count.saturating_sub(ofsted_starters.len()).max(1);
        let financial_starters = self
            .run_generator(self.generators.financial(), &school, remainder)
            .inspect(|_| any_success = true)
            .unwrap_or_default();

        let merged = merge_starters(vec![ofsted_starters, financial_starters], count);
        if any_success {
            self.cache.put(&key, &merged);
        }
        school.conversation_starters = merged;
        Some(school)
    }

    /// Append SEND starters to a school that carries SEND data.
    ///
    /// SEND starters skip both the cache and the merger: they are appended
    /// verbatim after whatever the school already carries, so a duplicate
    /// topic from another source survives here.
    pub fn get_send_intelligence(&self, name: &str, count: Option<usize>) -> Option<School> {
        let mut school = self.directory.school_by_name(name)?;
        if !self.config.features.send_analysis {
            tracing::debug!(urn = %school.urn, "SEND analysis disabled");
            return Some(school);
        }
        if !school.send.as_ref().is_some_and(|s| s.has_data()) {
            return Some(school);
        }

        let count = self.starter_count(count);
        let send_starters = self
            .run_generator(self.generators.send(), &school, count)
            .unwrap_or_default();
        school.conversation_starters.extend(send_starters);
        Some(school)
    }

    /// Async counterpart of [`get_school_intelligence`], identical semantics.
    pub async fn get_school_intelligence_async(
        &self,
        name: &str,
        force_refresh: bool,
        count: Option<usize>,
    ) -> Option<School> {
        let mut school = self.directory.school_by_name(name)?;
        if !self.config.features.conversation_starters {
            tracing::debug!(urn = %school.urn, "conversation starters disabled");
            return Some(school);
        }

        let count = self.starter_count(count);
        let key = CacheKey::for_school(&school.urn);
        if !force_refresh {
            if let Some(starters) = self.cache.get(&key) {
                school.conversation_starters = starters;
                return Some(school);
            }
        }

        let generated = match &self.async_financial {
            Some(generator) => match generator.generate(&school, count).await {
                Ok(starters) => Some(starters),
                Err(e) => {
                    tracing::error!(
                        urn = %school.urn,
                        source = %generator.source(),
                        error = %e,
                        "starter generation failed"
                    );
                    None
                }
            },
            None => self.run_generator(self.generators.financial(), &school, count),
        };

        match generated {
            Some(starters) => {
                self.cache.put(&key, &starters);
                school.conversation_starters = starters;
            }
            None => school.conversation_starters = Vec::new(),
        }
        Some(school)
    }

    /// Drop one school's cached starters, or the whole cache.
    /// Returns the number of entries removed; an unknown name removes none.
    pub fn clear_cache(&self, name: Option<&str>) -> usize {
        match name {
            Some(name) => match self.directory.school_by_name(name) {
                Some(school) => self.cache.clear(Some(&CacheKey::for_school(&school.urn))),
                None => 0,
            },
            None => self.cache.clear(None),
        }
    }

    /// Reload the directory's backing dataset.
    pub fn refresh_data(&self) -> ScoutResult<()> {
        self.directory.refresh()
    }

    /// The highest-priority schools in the dataset, best first.
    pub fn get_high_priority(&self, limit: usize) -> Vec<School> {
        rank_schools(self.directory.all_schools(), limit)
    }

    pub fn school_names(&self) -> Vec<String> {
        self.directory.school_names()
    }

    pub fn statistics(&self) -> DirectoryStats {
        self.directory.statistics()
    }
}

// =============================================================================
// TESTS
// =============================================================================
