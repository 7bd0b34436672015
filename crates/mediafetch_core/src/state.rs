use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, CardAction, CardRowView, ResultsView, StatusMessage};
use crate::{OpId, OperationKind};

/// Lifecycle of the single operation the primary control may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryState {
    #[default]
    Idle,
    Pending { op_id: OpId, kind: OperationKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Primary,
    Card {
        generation: u64,
        index: usize,
        action: CardAction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) kind: OperationKind,
    pub(crate) scope: Scope,
    pub(crate) target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    primary: PrimaryState,
    message: Option<StatusMessage>,
    results: ResultsView,
    /// Bumped whenever `results` is replaced; card scopes from older generations are stale.
    generation: u64,
    in_flight: BTreeMap<OpId, InFlight>,
    next_op_id: OpId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            submit_enabled: !self.primary_pending(),
            loading: self.primary_pending(),
            message: self.message.clone(),
            results: self.results.clone(),
            in_flight: self.in_flight.len(),
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn primary(&self) -> PrimaryState {
        self.primary
    }

    pub fn primary_pending(&self) -> bool {
        matches!(self.primary, PrimaryState::Pending { .. })
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn show_message(&mut self, message: StatusMessage) {
        self.message = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn results(&self) -> &ResultsView {
        &self.results
    }

    /// Replaces the whole result area and invalidates every card scope.
    pub(crate) fn set_results(&mut self, results: ResultsView) {
        self.results = results;
        self.generation += 1;
        self.mark_dirty();
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn card(&self, index: usize) -> Option<&CardRowView> {
        match &self.results {
            ResultsView::List(cards) => cards.get(index),
            _ => None,
        }
    }

    pub(crate) fn set_card_notice(&mut self, index: usize, notice: Option<StatusMessage>) {
        if let Some(card) = self.card_mut(index) {
            card.notice = notice;
            self.mark_dirty();
        }
    }

    fn card_mut(&mut self, index: usize) -> Option<&mut CardRowView> {
        match &mut self.results {
            ResultsView::List(cards) => cards.get_mut(index),
            _ => None,
        }
    }

    /// Acquires the primary control. Callers check `primary_pending` first.
    pub(crate) fn begin_primary(&mut self, kind: OperationKind, target: &str) -> OpId {
        let op_id = self.register(kind, Scope::Primary, target);
        self.primary = PrimaryState::Pending { op_id, kind };
        op_id
    }

    pub(crate) fn begin_card(
        &mut self,
        index: usize,
        action: CardAction,
        kind: OperationKind,
        target: &str,
    ) -> Option<OpId> {
        let generation = self.generation;
        let card = self.card_mut(index)?;
        card.set_pending(action, true);
        card.notice = None;
        let scope = Scope::Card {
            generation,
            index,
            action,
        };
        Some(self.register(kind, scope, target))
    }

    /// Removes an operation from the registry and releases whatever flag it held.
    pub(crate) fn release(&mut self, op_id: OpId) -> Option<InFlight> {
        let entry = self.in_flight.remove(&op_id)?;
        match entry.scope {
            Scope::Primary => {
                if matches!(self.primary, PrimaryState::Pending { op_id: owner, .. } if owner == op_id)
                {
                    self.primary = PrimaryState::Idle;
                }
            }
            Scope::Card {
                generation,
                index,
                action,
            } => {
                if generation == self.generation {
                    if let Some(card) = self.card_mut(index) {
                        card.set_pending(action, false);
                    }
                }
            }
        }
        self.mark_dirty();
        Some(entry)
    }

    fn register(&mut self, kind: OperationKind, scope: Scope, target: &str) -> OpId {
        self.next_op_id += 1;
        let op_id = self.next_op_id;
        self.in_flight.insert(
            op_id,
            InFlight {
                kind,
                scope,
                target: target.to_string(),
            },
        );
        self.mark_dirty();
        op_id
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
