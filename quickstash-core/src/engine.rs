use crate::config::StashConfig;
use crate::container::ContainerRef;
use crate::feedback::{FeedbackSink, ReportSink};
use crate::index::ContentIndex;
use crate::item::Item;
use crate::registry::ContainerRegistry;
use crate::snapshot::{Actor, InventorySnapshot, SkipReason};
use crate::types::{ContainerId, Position, SlotPos};
use serde::Serialize;
use std::sync::Arc;

/// Preference level that produced a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    /// Container already holds the same kind
    Matching,
    /// Container the actor currently has open
    InUse,
    /// Nearest container with nothing in it
    Empty,
    /// Container with the most free slots
    BestPartial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Placed { container: ContainerId, tier: Tier },
    Skipped(SkipReason),
    Failed,
}

/// What happened to a single occupied inventory slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationDecision {
    pub slot: SlotPos,
    pub kind: String,
    pub count: u32,
    pub outcome: Outcome,
}

impl AllocationDecision {
    pub fn is_placed(&self) -> bool {
        matches!(self.outcome, Outcome::Placed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped(_))
    }
}

/// Result of one stash pass: a decision for every occupied slot, in row-major order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StashReport {
    pub decisions: Vec<AllocationDecision>,
}

impl StashReport {
    /// Decisions for slots that were actually processed (placed or failed)
    pub fn processed(&self) -> impl Iterator<Item = &AllocationDecision> {
        self.decisions.iter().filter(|d| !d.is_skipped())
    }

    pub fn placed(&self) -> impl Iterator<Item = &AllocationDecision> {
        self.decisions.iter().filter(|d| d.is_placed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &AllocationDecision> {
        self.decisions.iter().filter(|d| d.is_failed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &AllocationDecision> {
        self.decisions.iter().filter(|d| d.is_skipped())
    }

    /// Nothing was placed and nothing failed
    pub fn is_noop(&self) -> bool {
        self.processed().next().is_none()
    }
}

struct IndexedContainer {
    handle: ContainerRef,
    id: ContainerId,
    distance: f32,
    index: ContentIndex,
}

struct EmptyContainer {
    handle: ContainerRef,
    id: ContainerId,
    distance: f32,
}

/// Containers in range at the start of a run
#[derive(Default)]
struct Candidates {
    non_empty: Vec<IndexedContainer>,
    /// Sorted by distance, nearest first
    empty: Vec<EmptyContainer>,
}

impl Candidates {
    fn gather(containers: Vec<ContainerRef>, origin: Position, max_distance: f32) -> Self {
        let mut out = Candidates::default();

        for handle in containers {
            let (id, distance, contents) = {
                let c = handle.lock();
                let id = c.id();
                let read = c.position().and_then(|pos| Ok((pos, c.contents()?)));
                match read {
                    Ok((pos, contents)) => (id, pos.distance(&origin), contents),
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "skipping unreadable container");
                        continue;
                    }
                }
            };

            if distance > max_distance {
                tracing::trace!(%id, distance, "container out of range");
                continue;
            }

            if contents.is_empty() {
                out.empty.push(EmptyContainer { handle, id, distance });
            } else {
                out.non_empty.push(IndexedContainer {
                    handle,
                    id,
                    distance,
                    index: ContentIndex::build(&contents),
                });
            }
        }

        out.empty.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        out
    }
}

/// Result of the capacity scan over the non-empty candidates for one item
#[derive(Default)]
struct Scan {
    /// (candidate index, matched count)
    matches: Vec<(usize, u32)>,
    /// (candidate index, free slots)
    best_partial: Option<(usize, usize)>,
    in_use: Option<usize>,
}

impl Scan {
    fn run(item: &Item, candidates: &[IndexedContainer]) -> Self {
        let mut scan = Scan::default();

        for (i, cand) in candidates.iter().enumerate() {
            let c = cand.handle.lock();
            let probe = c.can_add(item).and_then(|fits| {
                if !fits {
                    return Ok(None);
                }
                Ok(Some((c.empty_slots()?, c.is_in_use()?)))
            });

            let (free, in_use) = match probe {
                Ok(Some(v)) => v,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(id = %cand.id, error = %e, "container vanished during scan");
                    continue;
                }
            };

            if scan.best_partial.is_none_or(|(_, best)| free > best) {
                scan.best_partial = Some((i, free));
            }

            // More than one open container is unexpected; the last one seen wins
            if in_use {
                scan.in_use = Some(i);
            }

            if cand.index.contains(&item.kind) {
                scan.matches.push((i, cand.index.count(&item.kind)));
            }
        }

        // Stable sort keeps scan order for equal counts
        scan.matches.sort_by(|a, b| b.1.cmp(&a.1));
        scan
    }
}

struct Placement {
    id: ContainerId,
    distance: f32,
    tier: Tier,
}

/// Capacity-checked add. Any error or late refusal is a plain miss.
fn try_add(handle: &ContainerRef, id: ContainerId, item: &Item) -> bool {
    let mut c = handle.lock();
    match c.can_add(item) {
        Ok(true) => {}
        Ok(false) => return false,
        Err(e) => {
            tracing::warn!(%id, error = %e, "container vanished before add");
            return false;
        }
    }

    match c.add(item) {
        Ok(added) => {
            if !added {
                tracing::debug!(%id, kind = %item.kind, "container refused item after capacity check");
            }
            added
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "container vanished during add");
            false
        }
    }
}

fn place(item: &Item, candidates: &Candidates, prioritize_in_use: bool) -> Option<Placement> {
    let scan = Scan::run(item, &candidates.non_empty);
    let mut tried: Vec<usize> = Vec::with_capacity(scan.matches.len() + 2);

    let attempt = |i: usize, tier: Tier, tried: &mut Vec<usize>| -> Option<Placement> {
        if tried.contains(&i) {
            return None;
        }
        tried.push(i);

        let cand = &candidates.non_empty[i];
        try_add(&cand.handle, cand.id, item).then_some(Placement {
            id: cand.id,
            distance: cand.distance,
            tier,
        })
    };

    for &(i, _) in &scan.matches {
        if let Some(p) = attempt(i, Tier::Matching, &mut tried) {
            return Some(p);
        }
    }

    if prioritize_in_use {
        if let Some(p) = scan.in_use.and_then(|i| attempt(i, Tier::InUse, &mut tried)) {
            return Some(p);
        }
    }

    // Only the nearest empty container is tried; if it refuses, best partial is next
    if let Some(empty) = candidates.empty.first() {
        if try_add(&empty.handle, empty.id, item) {
            return Some(Placement {
                id: empty.id,
                distance: empty.distance,
                tier: Tier::Empty,
            });
        }
    }

    scan.best_partial
        .and_then(|(i, _)| attempt(i, Tier::BestPartial, &mut tried))
}

/// Runs stash passes against the containers known to a registry.
pub struct StashService {
    registry: Arc<ContainerRegistry>,
    feedback: Arc<dyn FeedbackSink>,
    reporter: Arc<dyn ReportSink>,
}

impl StashService {
    pub fn new(
        registry: Arc<ContainerRegistry>,
        feedback: Arc<dyn FeedbackSink>,
        reporter: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            registry,
            feedback,
            reporter,
        }
    }

    /// Move every eligible item of the actor's inventory into nearby containers.
    ///
    /// Each item is handled on its own: a placement is applied (added to the container,
    /// removed from the inventory) before the next item is looked at, and a failed item never
    /// undoes earlier ones.
    pub fn run_stash_pass(&self, actor: &mut dyn Actor, config: &StashConfig) -> StashReport {
        if !config.enabled {
            tracing::debug!("stash pass requested while disabled");
            return StashReport::default();
        }

        let origin = actor.position();
        let snapshot = InventorySnapshot::capture(actor.inventory(), config.excluded_slots);
        let candidates = Candidates::gather(self.registry.snapshot(), origin, config.max_distance);

        tracing::debug!(
            slots = snapshot.len(),
            containers = candidates.non_empty.len(),
            empty = candidates.empty.len(),
            "starting stash pass"
        );

        let mut report = StashReport {
            decisions: Vec::with_capacity(snapshot.len()),
        };

        for entry in snapshot.entries() {
            let item = &entry.item;
            let outcome = match entry.skip {
                Some(reason) => Outcome::Skipped(reason),
                None => match place(item, &candidates, config.prioritize_in_use) {
                    Some(p) => {
                        if actor.inventory_mut().remove_at(entry.slot).is_none() {
                            tracing::warn!(slot = %entry.slot, kind = %item.kind, "slot emptied during stash pass");
                        }

                        if config.diagnostics {
                            tracing::debug!(
                                kind = %item.kind,
                                count = item.count,
                                container = %p.id,
                                distance = p.distance,
                                tier = ?p.tier,
                                "item stashed"
                            );
                        }

                        if config.highlight.enabled {
                            self.feedback.container_received(p.id);
                        }

                        Outcome::Placed {
                            container: p.id,
                            tier: p.tier,
                        }
                    }
                    None => {
                        self.reporter.report(&format!("No storage available for {}", item.kind));
                        if config.diagnostics {
                            tracing::debug!(kind = %item.kind, count = item.count, slot = %entry.slot, "no storage available");
                        }
                        Outcome::Failed
                    }
                },
            };

            report.decisions.push(AllocationDecision {
                slot: entry.slot,
                kind: item.kind.clone(),
                count: item.count,
                outcome,
            });
        }

        tracing::info!(
            placed = report.placed().count(),
            failed = report.failed().count(),
            skipped = report.skipped().count(),
            "stash pass finished"
        );

        report
    }
}
