//! The lifecycle of the data shown to the user.
//!
//! ```text
//! Idle --begin_load--> Loading --complete_load--> Loaded --set_order--> Resorting --> Loaded
//!                         |                         |
//!                         +--fail_load--> Idle      +--begin_load--> Loading
//! ```
//!
//! Nothing interrupts a load: a second load is refused until the first one completes or
//! fails. The dataset and the ranking are replaced as a whole when a load completes.

use chrono::NaiveDate;
use log::{info, warn};

use crate::config::*;
use crate::ranking::rank_countries;
use crate::run_pipeline;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Only held inside `Session::set_order`: the re-sort completes within that call, so
    /// `state()` never returns it.
    Resorting,
}

/// Handed out by `Session::begin_load`. Completing or failing a load consumes it.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct Session {
    state: LoadState,
    order: SortOrder,
    // The order of the installed ranking.
    applied_order: Option<SortOrder>,
    dataset: Option<Dataset>,
    ranking: Vec<String>,
    generation: u64,
    last_error: Option<StatsErrors>,
}

impl Session {
    pub fn new(order: SortOrder) -> Session {
        Session {
            state: LoadState::Idle,
            order,
            applied_order: None,
            dataset: None,
            ranking: Vec::new(),
            generation: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// The countries in the current order. Empty until a load completes.
    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }

    /// The error of the last failed load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&StatsErrors> {
        self.last_error.as_ref()
    }

    pub fn begin_load(&mut self) -> Result<LoadTicket, StatsErrors> {
        match self.state {
            LoadState::Loading | LoadState::Resorting => Err(StatsErrors::LoadInProgress),
            LoadState::Idle | LoadState::Loaded => {
                self.generation += 1;
                self.state = LoadState::Loading;
                info!("begin_load: load {} started", self.generation);
                Ok(LoadTicket {
                    generation: self.generation,
                })
            }
        }
    }

    fn check_ticket(&self, ticket: &LoadTicket) -> Result<(), StatsErrors> {
        if self.state != LoadState::Loading || ticket.generation != self.generation {
            return Err(StatsErrors::NoLoadInProgress);
        }
        Ok(())
    }

    /// Builds a new dataset out of the three tables and installs it with a fresh ranking.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        tables: &SourceTables,
        today: NaiveDate,
    ) -> Result<&[String], StatsErrors> {
        self.check_ticket(&ticket)?;
        let (dataset, ranking) = run_pipeline(tables, self.order, today);
        info!(
            "complete_load: load {}: {} countries, ordered by {} {}",
            ticket.generation,
            ranking.len(),
            self.order.field,
            self.order.direction
        );

        self.dataset = Some(dataset);
        self.ranking = ranking;
        self.applied_order = Some(self.order);
        self.last_error = None;
        self.state = LoadState::Loaded;
        Ok(&self.ranking)
    }

    /// Ends a load that could not get its tables. The previous dataset, if any, stays.
    pub fn fail_load(&mut self, ticket: LoadTicket, reason: &str) -> StatsErrors {
        if let Err(e) = self.check_ticket(&ticket) {
            return e;
        }
        warn!("fail_load: load {} failed: {}", ticket.generation, reason);
        let err = StatsErrors::LoadFailed(reason.to_string());
        self.last_error = Some(err.clone());
        self.state = if self.dataset.is_some() {
            LoadState::Loaded
        } else {
            LoadState::Idle
        };
        err
    }

    /// Changes the order of the countries.
    ///
    /// Returns true if the ranking was recomputed. The data is never reloaded. Before the first
    /// load, or while a load runs, the order is only recorded and applied when the load completes.
    pub fn set_order(&mut self, order: SortOrder) -> Result<bool, StatsErrors> {
        self.order = order;
        if self.state != LoadState::Loaded || self.applied_order == Some(order) {
            return Ok(false);
        }
        let Some(dataset) = self.dataset.as_ref() else {
            return Ok(false);
        };
        self.state = LoadState::Resorting;
        self.ranking = rank_countries(&dataset.summaries, order.field, order.direction);
        self.applied_order = Some(order);
        self.state = LoadState::Loaded;
        Ok(true)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SortOrder::DEFAULT_ORDER)
    }
}
