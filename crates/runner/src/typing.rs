//! Typing Simulator - the cosmetic "developer at work" animation
//!
//! Loop: pick a corpus line, type it char by char with occasional
//! correction bursts, maybe stop for a choice branch, and clear the buffer
//! once it overflows. Cancelled by aborting its task or by cancelling the
//! pending choice it waits on.

use codex_core::{ChoiceOption, TypingBuffer};
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::config::{ChoiceConfig, DelayRange, TypingConfig};
use crate::engine::Engine;
use crate::events::GameEvent;

pub(crate) struct TypingSimulator {
    engine: Arc<Engine>,
    typing: TypingConfig,
    choices: ChoiceConfig,
    rng: StdRng,
}

impl TypingSimulator {
    pub fn new(engine: Arc<Engine>, rng: StdRng) -> Self {
        let typing = engine.config().typing.clone();
        let choices = engine.config().choices.clone();
        Self {
            engine,
            typing,
            choices,
            rng,
        }
    }

    /// Run until the pending choice is cancelled or the task is aborted
    pub async fn run(mut self) {
        info!("Typing simulator started");

        loop {
            let Some(line) = self.typing.corpus.choose(&mut self.rng).cloned() else {
                info!("Typing corpus is empty, nothing to type");
                return;
            };
            self.type_line(&line).await;

            if self.rng.gen_bool(self.choices.probability) {
                match self.choice_branch().await {
                    Some(option) => {
                        let annotation = format!("// User selected: {}", option.label);
                        self.type_line(&annotation).await;
                    }
                    None => {
                        info!("Pending choice cancelled, typing simulator stopped");
                        return;
                    }
                }
            }

            self.clear_if_overflowing().await;
        }
    }

    async fn pause(&mut self, range: DelayRange) {
        let delay = range.sample(&mut self.rng);
        self.engine.clock().sleep(delay).await;
    }

    async fn type_char(&mut self, ch: char) {
        self.engine.edit_buffer(|b| b.insert(ch)).await;
        self.pause(self.typing.char_delay_ms).await;
    }

    async fn type_line(&mut self, line: &str) {
        for ch in line.chars() {
            self.type_char(ch).await;

            if self.rng.gen_bool(self.typing.backspace_probability) {
                let burst = self.rng.gen_range(1..=self.typing.max_backspace);
                for _ in 0..burst {
                    self.engine
                        .edit_buffer(TypingBuffer::delete_before_cursor)
                        .await;
                    self.pause(self.typing.backspace_delay_ms).await;
                }
            }
        }

        self.type_char('\n').await;
        self.engine.edit_buffer(TypingBuffer::move_to_end).await;
    }

    /// Offer a choice and wait for it; `None` when it was cancelled
    async fn choice_branch(&mut self) -> Option<ChoiceOption> {
        let (choice, rx) = self.engine.choices().offer(&mut self.rng);
        debug!("Offering choice {} ({} options)", choice.id, choice.options.len());
        self.engine.emit(GameEvent::ChoiceOffered(choice));

        match self.choices.auto_choose_after() {
            None => rx.await.ok(),
            Some(after) => self.wait_or_auto_choose(rx, after).await,
        }
    }

    async fn wait_or_auto_choose(
        &mut self,
        mut rx: oneshot::Receiver<ChoiceOption>,
        after: Duration,
    ) -> Option<ChoiceOption> {
        let clock = self.engine.clock();
        tokio::select! {
            resolved = &mut rx => return resolved.ok(),
            _ = clock.sleep(after) => {}
        }

        let index = self.rng.gen_range(0..self.choices.presented);
        if let Err(e) = self.engine.resolve_choice(index).await {
            debug!("Auto-choose skipped: {}", e);
        }
        rx.await.ok()
    }

    async fn clear_if_overflowing(&mut self) {
        if self.engine.buffer_line_count().await <= self.typing.max_lines {
            return;
        }

        let pause = self.typing.clear_pause();
        self.engine.clock().sleep(pause).await;
        let placeholder = self.typing.clear_placeholder.clone();
        self.engine.edit_buffer(|b| b.replace(&placeholder)).await;
        self.engine.clock().sleep(pause).await;
        self.engine.edit_buffer(TypingBuffer::clear).await;

        debug!("Typing buffer cleared");
        self.engine.emit(GameEvent::BufferCleared);
    }
}
