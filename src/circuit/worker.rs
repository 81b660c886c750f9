//! The serial worker: sole owner of the listener sequence.
//!
//! One worker task per circuit. It owns `Vec<RegisteredEtch<I>>` outright,
//! so there are no locks anywhere: append, scan, and prune all happen on
//! this task, one command at a time, in the order commands were enqueued.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::etches::{EtchId, RegisteredEtch};
use crate::impulse::Impulse;

use super::circuit::Command;

pub(crate) struct Worker<I> {
    etches: Vec<RegisteredEtch<I>>,
    /// Weak so in-flight dispatch tasks never keep a discarded circuit
    /// alive; upgraded only to re-submit follow-ups.
    handle: mpsc::WeakUnboundedSender<Command<I>>,
}

impl<I: Impulse> Worker<I> {
    pub(crate) fn new(handle: mpsc::WeakUnboundedSender<Command<I>>) -> Self {
        Self {
            etches: Vec::new(),
            handle,
        }
    }

    pub(crate) async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command<I>>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Register(etch) => {
                    log::debug!(
                        "registered etch {:?} ({} listener(s) now)",
                        etch.id,
                        self.etches.len() + 1
                    );
                    self.etches.push(etch);
                }
                Command::Submit(impulse) => self.scan(&impulse),
                Command::Close => {
                    log::debug!(
                        "circuit closed with {} listener(s) registered",
                        self.etches.len()
                    );
                    return;
                }
            }
        }
        log::trace!("circuit worker exiting; all handles dropped");
    }

    /// One fan-out scan for one submitted impulse.
    ///
    /// Visits listeners front-to-back in registration order against the
    /// sequence as it stands when this command is dequeued. Nothing else can
    /// touch the sequence mid-scan, so iterating the live vec *is* the
    /// snapshot. Dead listeners are pruned at the end of the scan and never
    /// see this or any later impulse.
    fn scan(&mut self, impulse: &Arc<I>) {
        log::trace!("fan-out scan over {} listener(s)", self.etches.len());

        let mut dead: Vec<EtchId> = Vec::new();
        for etch in &self.etches {
            if !(*etch.alive)() {
                dead.push(etch.id);
                continue;
            }

            let Some(dispatch) = (*etch.route)(impulse) else {
                continue;
            };

            // Fire-and-forget: the scan moves on without awaiting. A panic
            // inside the dispatch body is confined to that listener; it does
            // not abort the scan, corrupt the sequence, or unregister the
            // listener (only `alive` removes).
            let id = etch.id;
            let handle = self.handle.clone();
            etch.context.run(async move {
                match AssertUnwindSafe(dispatch).catch_unwind().await {
                    Ok(followups) => {
                        if followups.is_empty() {
                            return;
                        }
                        let Some(tx) = handle.upgrade() else {
                            log::warn!(
                                "circuit gone; discarding {} follow-up impulse(s) from etch {id:?}",
                                followups.len()
                            );
                            return;
                        };
                        for followup in followups {
                            let _ = tx.send(Command::Submit(Arc::new(followup)));
                        }
                    }
                    Err(panic) => {
                        log::error!("dispatch for etch {id:?} panicked: {panic:?}");
                    }
                }
            });
        }

        if !dead.is_empty() {
            self.etches.retain(|etch| !dead.contains(&etch.id));
            log::debug!(
                "pruned {} dead etch(es), {} remain",
                dead.len(),
                self.etches.len()
            );
        }
    }
}
