//! Choice Engine - one pending reward choice at a time
//!
//! The typing simulator calls [`ChoiceEngine::offer`] and suspends on the
//! returned receiver. An external actor resolves it through `take`, and
//! reset/shutdown drop it through `cancel`, which wakes the waiter with a
//! closed channel.

use codex_core::{ChoiceCatalog, ChoiceOption};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

use crate::error::{GameError, Result};

/// Options shown to the player for one choice branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedChoice {
    /// Monotonically increasing per game
    pub id: u64,
    /// Distinct catalog entries, in presentation order
    pub options: Vec<ChoiceOption>,
}

struct Pending {
    choice: PresentedChoice,
    resolver: oneshot::Sender<ChoiceOption>,
}

/// A pending choice taken out of the engine, not yet delivered to the waiter
pub(crate) struct ChoiceResolution {
    pub choice_id: u64,
    pub option: ChoiceOption,
    resolver: oneshot::Sender<ChoiceOption>,
}

impl ChoiceResolution {
    /// Wake the waiting simulator; false if it is gone
    pub fn complete(self) -> bool {
        self.resolver.send(self.option).is_ok()
    }
}

pub(crate) struct ChoiceEngine {
    catalog: ChoiceCatalog,
    presented: usize,
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
}

impl ChoiceEngine {
    pub fn new(catalog: ChoiceCatalog, presented: usize) -> Self {
        Self {
            catalog,
            presented,
            pending: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Present a fresh sample of the catalog and store its resolver
    ///
    /// A choice still pending from an earlier call is dropped.
    pub fn offer<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> (PresentedChoice, oneshot::Receiver<ChoiceOption>) {
        let choice = PresentedChoice {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            options: self.catalog.sample(rng, self.presented),
        };
        let (resolver, rx) = oneshot::channel();

        let replaced = self.pending.lock().replace(Pending {
            choice: choice.clone(),
            resolver,
        });
        if let Some(old) = replaced {
            log::warn!("Choice {} replaced before it was resolved", old.choice.id);
        }

        (choice, rx)
    }

    /// The choice currently waiting for an answer
    pub fn pending(&self) -> Option<PresentedChoice> {
        self.pending.lock().as_ref().map(|p| p.choice.clone())
    }

    /// Take the pending choice by option index
    ///
    /// On error the pending choice stays in place.
    pub fn take(&self, index: usize) -> Result<ChoiceResolution> {
        let mut slot = self.pending.lock();
        let available = match slot.as_ref() {
            None => return Err(GameError::NoPendingChoice),
            Some(p) => p.choice.options.len(),
        };
        if index >= available {
            return Err(GameError::InvalidChoice { index, available });
        }

        let Some(Pending { choice, resolver }) = slot.take() else {
            return Err(GameError::NoPendingChoice);
        };
        let option = choice.options[index].clone();
        Ok(ChoiceResolution {
            choice_id: choice.id,
            option,
            resolver,
        })
    }

    /// Drop the pending choice; the waiter sees a closed channel
    pub fn cancel(&self) -> bool {
        self.pending.lock().take().is_some()
    }
}
