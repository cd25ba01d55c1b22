//! Choosing which classes get accessors
//!
//! Classes that already have every requested accessor are filtered out. The
//! rest are offered to a [`Picker`] as a single request that resolves exactly
//! once: accepted with a list of labels, or dismissed.

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::GenerateError;
use crate::model::ClassModel;
use crate::options::AccessorKinds;

/// One entry of the confirmation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub picked: bool,
}

/// A pending confirmation handed to the host
///
/// Dropping the request without calling [`accept`](Self::accept) counts as a dismissal.
#[derive(Debug)]
pub struct SelectionRequest {
    pub title: String,
    pub items: Vec<PickItem>,
    responder: oneshot::Sender<Vec<String>>,
}

impl SelectionRequest {
    /// Resolve with the chosen labels
    pub fn accept(self, labels: Vec<String>) {
        // receiver gone means the pipeline was abandoned; nothing to do
        let _ = self.responder.send(labels);
    }

    /// Resolve with whatever is pre-selected
    pub fn accept_picked(self) {
        let labels = self
            .items
            .iter()
            .filter(|item| item.picked)
            .map(|item| item.label.clone())
            .collect();
        self.accept(labels);
    }

    /// Close the request without accepting
    pub fn dismiss(self) {}
}

/// The host side of the confirmation step
pub trait Picker {
    /// Show the request; answer it now or keep it and answer later
    fn present(&mut self, request: SelectionRequest);
}

/// Accepts every pre-selected candidate without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Picker for AcceptAll {
    fn present(&mut self, request: SelectionRequest) {
        request.accept_picked();
    }
}

/// The pipeline side of a confirmation
#[derive(Debug)]
pub struct PendingSelection {
    candidates: Vec<ClassModel>,
    receiver: oneshot::Receiver<Vec<String>>,
}

impl PendingSelection {
    /// Wait for the host's answer and map labels back to classes
    ///
    /// Labels are matched by class name, first match wins, in accepted order.
    pub async fn resolve(self) -> Result<Vec<ClassModel>, GenerateError> {
        let labels = self
            .receiver
            .await
            .map_err(|_| GenerateError::SelectionCancelled)?;

        // each candidate is taken at most once, so repeated labels reach
        // same-named classes in declaration order
        let mut taken = vec![false; self.candidates.len()];
        let mut selected = Vec::new();
        for label in &labels {
            let found = self
                .candidates
                .iter()
                .enumerate()
                .find(|(i, class)| !taken[*i] && &class.name == label);
            if let Some((i, class)) = found {
                taken[i] = true;
                selected.push(class.clone());
            }
        }

        debug!(accepted = labels.len(), selected = selected.len(), "selection resolved");
        Ok(selected)
    }
}

/// Filters candidates and drives the confirmation step
#[derive(Debug, Clone, Copy)]
pub struct SelectionCoordinator {
    kinds: AccessorKinds,
}

impl SelectionCoordinator {
    pub fn new(kinds: AccessorKinds) -> Self {
        Self { kinds }
    }

    /// Whether a class still misses an accessor of a requested kind
    pub fn is_candidate(&self, class: &ClassModel) -> bool {
        match (self.kinds.getters, self.kinds.setters) {
            (true, true) => !class.has_full_coverage(),
            (true, false) => !class.has_all_getters(),
            (false, true) => !class.has_all_setters(),
            (false, false) => false,
        }
    }

    /// Build the confirmation request for the classes that still need work
    pub fn request(
        &self,
        classes: Vec<ClassModel>,
    ) -> Result<(SelectionRequest, PendingSelection), GenerateError> {
        let total = classes.len();
        let candidates: Vec<ClassModel> = classes
            .into_iter()
            .filter(|class| self.is_candidate(class))
            .collect();

        debug!(total, candidates = candidates.len(), "filtered candidates");

        if candidates.is_empty() {
            return Err(GenerateError::AllAlreadyCovered);
        }

        let items = candidates
            .iter()
            .map(|class| PickItem {
                label: class.name.clone(),
                picked: true,
            })
            .collect();

        let (responder, receiver) = oneshot::channel();
        let request = SelectionRequest {
            title: format!("Select classes to generate {}", self.kinds.title()),
            items,
            responder,
        };
        let pending = PendingSelection {
            candidates,
            receiver,
        };

        Ok((request, pending))
    }

    /// Offer the candidates to `picker` and return the confirmed subset
    pub async fn select_targets<P: Picker + ?Sized>(
        &self,
        classes: Vec<ClassModel>,
        picker: &mut P,
    ) -> Result<Vec<ClassModel>, GenerateError> {
        let (request, pending) = self.request(classes)?;
        picker.present(request);
        pending.resolve().await
    }
}
