//! The per-map orchestrator.
//!
//! [`MapSync`] owns the engine, the readiness gate, the id allocator and
//! one record per mounted entity. The owning tree drives it through
//! [`mount`](MapSync::mount), [`update`](MapSync::update) and
//! [`unmount`](MapSync::unmount); the engine's style events arrive through
//! [`on_style_loading`](MapSync::on_style_loading) and
//! [`on_style_data`](MapSync::on_style_data).

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use crate::sync::{control, layer, marker, popup, source};
use crate::{MapRef, MapSyncConfig, ReadinessGate, ReconcileOutcome, SyncError, SyncResult};
use mapsync_engine::{MapEngine, Transform};
use mapsync_model::{Declaration, LayerProps};
use mapsync_types::{EntityKind, IdAllocator};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Opaque handle of a mounted entity. Handles increase in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntityHandle(u64);

impl EntityHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why an entity is being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Mount,
    Update,
    /// A pass started by the engine's style events.
    StyleEvent,
}

#[derive(Debug)]
struct Entry {
    kind: EntityKind,
    id: String,
    /// Latest accepted declaration.
    declared: Declaration,
    /// Declaration the engine was last reconciled to. Later passes diff
    /// against it; a deferred reconciliation leaves it behind `declared`.
    applied: Option<Declaration>,
    /// Source a child layer was mounted inside.
    parent: Option<EntityHandle>,
    /// Consecutive style-event passes spent waiting on a missing source.
    deferred_passes: u32,
}

impl Entry {
    /// What the next reconciliation diffs from.
    fn baseline(&self) -> &Declaration {
        self.applied.as_ref().unwrap_or(&self.declared)
    }
}

/// Keeps one engine in line with a set of declared entities.
pub struct MapSync<E: MapEngine> {
    engine: E,
    gate: ReadinessGate,
    ids: IdAllocator,
    config: MapSyncConfig,
    entities: BTreeMap<EntityHandle, Entry>,
    next_handle: u64,
    sink: Box<dyn DiagnosticSink>,
    /// Shadow camera reported through [`MapRef`].
    transform: Transform,
}

impl<E: MapEngine> MapSync<E> {
    /// Wraps `engine`, reporting diagnostics through `tracing`.
    pub fn new(engine: E, config: MapSyncConfig) -> Self {
        Self::with_sink(engine, config, TracingSink)
    }

    pub fn with_sink(engine: E, config: MapSyncConfig, sink: impl DiagnosticSink + 'static) -> Self {
        let gate = ReadinessGate::new(engine.is_style_loaded());
        let transform = Transform {
            center: engine.center(),
            zoom: engine.zoom(),
            bearing: engine.bearing(),
            pitch: engine.pitch(),
            padding: engine.padding(),
            ..Transform::default()
        };
        Self {
            engine,
            gate,
            ids: IdAllocator::with_prefix(config.id_prefix.clone()),
            config,
            entities: BTreeMap::new(),
            next_handle: 0,
            sink: Box::new(sink),
            transform,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access for the map owner. Calls made through it bypass
    /// reconciliation.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut ReadinessGate {
        &mut self.gate
    }

    pub fn config(&self) -> &MapSyncConfig {
        &self.config
    }

    /// The shadow transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Stages camera changes ahead of the engine.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Read-only view for outside callers.
    pub fn map_ref(&self) -> MapRef<'_, E> {
        MapRef::new(&self.engine, &self.transform)
    }

    /// Id the entity was materialized (or will be) under.
    pub fn entity_id(&self, handle: EntityHandle) -> Option<&str> {
        self.entities.get(&handle).map(|e| e.id.as_str())
    }

    pub fn declaration(&self, handle: EntityHandle) -> Option<&Declaration> {
        self.entities.get(&handle).map(|e| &e.declared)
    }

    /// Number of mounted entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Declares a new entity and tries to materialize it.
    pub fn mount(&mut self, declaration: impl Into<Declaration>) -> (EntityHandle, ReconcileOutcome) {
        self.mount_with_parent(declaration.into(), None)
    }

    /// Declares a layer inside a mounted source. The layer's `source` is
    /// always the parent's id.
    ///
    /// # Errors
    ///
    /// [`SyncError::UnknownEntity`] if `parent` is not mounted,
    /// [`SyncError::NotASource`] if it is not a source.
    pub fn mount_child(
        &mut self,
        parent: EntityHandle,
        mut layer: LayerProps,
    ) -> SyncResult<(EntityHandle, ReconcileOutcome)> {
        let entry = self
            .entities
            .get(&parent)
            .ok_or(SyncError::UnknownEntity(parent.raw()))?;
        if entry.kind != EntityKind::Source {
            return Err(SyncError::NotASource(entry.id.clone()));
        }
        layer.source = Some(entry.id.clone());
        Ok(self.mount_with_parent(Declaration::Layer(layer), Some(parent)))
    }

    fn mount_with_parent(
        &mut self,
        declaration: Declaration,
        parent: Option<EntityHandle>,
    ) -> (EntityHandle, ReconcileOutcome) {
        let kind = declaration.kind();
        let id = self.ids.resolve(kind, declaration.explicit_id());
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        debug!(%handle, %kind, id = %id, "mounting entity");

        self.entities.insert(
            handle,
            Entry {
                kind,
                id,
                declared: declaration.clone(),
                applied: None,
                parent,
                deferred_passes: 0,
            },
        );
        let outcome = self.reconcile_entity(handle, &declaration, &declaration, Trigger::Mount);
        (handle, outcome)
    }

    /// Re-declares a mounted entity and reconciles it.
    ///
    /// A change of kind or id is reported and the declaration is rejected.
    /// A deferred update is applied by the next pass that finds the style
    /// ready. Otherwise the declaration becomes the new baseline even when
    /// the update could not be applied.
    ///
    /// # Errors
    ///
    /// [`SyncError::UnknownEntity`] if `handle` is not mounted.
    pub fn update(
        &mut self,
        handle: EntityHandle,
        declaration: impl Into<Declaration>,
    ) -> SyncResult<ReconcileOutcome> {
        let mut next = declaration.into();
        let entry = self
            .entities
            .get(&handle)
            .ok_or(SyncError::UnknownEntity(handle.raw()))?;

        let violation = if next.kind() != entry.kind {
            Some(SyncError::KindChanged {
                id: entry.id.clone(),
                previous: entry.kind,
                next: next.kind(),
            })
        } else if next.explicit_id() != entry.declared.explicit_id() {
            Some(SyncError::IdChanged {
                kind: entry.kind,
                previous: entry.declared.explicit_id().map(str::to_string),
                next: next.explicit_id().map(str::to_string),
            })
        } else {
            None
        };
        if let Some(error) = violation {
            let diagnostic = Diagnostic::from_error(entry.kind, &entry.id, &error);
            self.sink.report(diagnostic);
            return Ok(ReconcileOutcome::Failed);
        }

        if let (Some(parent), Declaration::Layer(layer)) = (entry.parent, &mut next) {
            if let Some(parent) = self.entities.get(&parent) {
                layer.source = Some(parent.id.clone());
            }
        }

        let prev = entry.baseline().clone();
        Ok(self.reconcile_entity(handle, &prev, &next, Trigger::Update))
    }

    /// Removes an entity from the owning tree and tears it down.
    ///
    /// Removing a source first removes every live layer using it.
    ///
    /// # Errors
    ///
    /// [`SyncError::UnknownEntity`] if `handle` is not mounted.
    pub fn unmount(&mut self, handle: EntityHandle) -> SyncResult<ReconcileOutcome> {
        let entry = self
            .entities
            .remove(&handle)
            .ok_or(SyncError::UnknownEntity(handle.raw()))?;
        debug!(%handle, kind = %entry.kind, id = %entry.id, "unmounting entity");

        let ready = self.style_ready();
        let engine = &mut self.engine;
        let result = match entry.kind {
            EntityKind::Source => source::teardown(engine, ready, &entry.id),
            EntityKind::Layer => layer::teardown(engine, ready, &entry.id),
            EntityKind::Marker => marker::teardown(engine, &entry.id),
            EntityKind::Popup => popup::teardown(engine, &entry.id),
            EntityKind::Control => control::teardown(engine, &entry.id),
        };
        Ok(self.settle(entry.kind, &entry.id, result))
    }

    /// The engine started loading a style. Style calls are illegal until
    /// the next [`on_style_data`](Self::on_style_data) finds it loaded.
    pub fn on_style_loading(&mut self) {
        if self.gate.set_ready(false) {
            debug!("style loading, reconciliation paused");
        }
    }

    /// The engine reported a style-data event.
    ///
    /// Re-evaluates every source and layer from scratch when the style just
    /// became ready, and on every event while ready if
    /// [`MapSyncConfig::reconcile_on_every_style_event`] is set. Returns the
    /// outcome per entity visited.
    pub fn on_style_data(&mut self) -> Vec<(EntityHandle, ReconcileOutcome)> {
        let became_ready = self.gate.sync_with(&self.engine);
        if !self.gate.is_ready() {
            return Vec::new();
        }
        if became_ready {
            info!(generation = self.gate.generation(), "style ready, re-evaluating");
        } else if !self.config.reconcile_on_every_style_event {
            return Vec::new();
        }
        self.reconcile_kinds(&[EntityKind::Source, EntityKind::Layer])
    }

    /// Re-evaluates every mounted entity against its current declaration:
    /// sources, then layers, markers, popups and controls, each in mount
    /// order.
    pub fn reconcile_all(&mut self) -> Vec<(EntityHandle, ReconcileOutcome)> {
        self.reconcile_kinds(&EntityKind::ALL)
    }

    fn reconcile_kinds(&mut self, kinds: &[EntityKind]) -> Vec<(EntityHandle, ReconcileOutcome)> {
        let handles: Vec<EntityHandle> = kinds
            .iter()
            .flat_map(|kind| {
                self.entities
                    .iter()
                    .filter(move |(_, e)| e.kind == *kind)
                    .map(|(handle, _)| *handle)
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| {
                let entry = self.entities.get(&handle)?;
                let (prev, next) = (entry.baseline().clone(), entry.declared.clone());
                let outcome = self.reconcile_entity(handle, &prev, &next, Trigger::StyleEvent);
                Some((handle, outcome))
            })
            .collect()
    }

    fn style_ready(&self) -> bool {
        self.gate.is_ready() && self.engine.is_style_loaded()
    }

    /// Runs the synchronizer for one entity and records `next` unless the
    /// change broke identity. `next` counts as applied unless deferred.
    fn reconcile_entity(
        &mut self,
        handle: EntityHandle,
        prev: &Declaration,
        next: &Declaration,
        trigger: Trigger,
    ) -> ReconcileOutcome {
        let Some(entry) = self.entities.get(&handle) else {
            return ReconcileOutcome::Skipped;
        };
        let kind = entry.kind;
        let id = entry.id.clone();
        let ready = self.style_ready();
        let engine = &mut self.engine;

        let result = match (prev, next) {
            (Declaration::Source(prev), Declaration::Source(next)) => {
                source::reconcile(engine, ready, &id, prev, next)
            }
            (Declaration::Layer(prev), Declaration::Layer(next)) => {
                layer::reconcile(engine, ready, &id, prev, next)
            }
            (Declaration::Marker(_), Declaration::Marker(next)) => {
                marker::reconcile(engine, &id, next)
            }
            (Declaration::Popup(_), Declaration::Popup(next)) => match trigger {
                Trigger::Mount => popup::open(engine, &id, next),
                Trigger::Update | Trigger::StyleEvent => popup::reconcile(engine, &id, next),
            },
            (Declaration::Control(prev), Declaration::Control(next)) => match trigger {
                Trigger::Mount => control::add(engine, &id, next),
                Trigger::Update | Trigger::StyleEvent => {
                    control::reconcile(engine, &id, prev, next)
                }
            },
            (prev, next) => Err(SyncError::KindChanged {
                id: id.clone(),
                previous: prev.kind(),
                next: next.kind(),
            }),
        };

        let rejected = matches!(&result, Err(e) if e.is_invariant_violation());
        let outcome = self.settle(kind, &id, result);

        if let Some(entry) = self.entities.get_mut(&handle) {
            if !rejected {
                entry.declared = next.clone();
                if outcome != ReconcileOutcome::Deferred {
                    entry.applied = Some(next.clone());
                }
            }
            if kind == EntityKind::Layer {
                match outcome {
                    ReconcileOutcome::Deferred if ready && trigger == Trigger::StyleEvent => {
                        entry.deferred_passes += 1;
                        let limit = self.config.deferral_warning_passes;
                        if limit > 0 && entry.deferred_passes == limit {
                            let source = match &entry.declared {
                                Declaration::Layer(layer) => layer.source.clone(),
                                _ => None,
                            };
                            self.sink.report(Diagnostic::new(
                                DiagnosticKind::LongDeferral,
                                kind,
                                &id,
                                format!(
                                    "layer has waited {limit} passes for source {}",
                                    source.as_deref().unwrap_or("<none>")
                                ),
                            ));
                        }
                    }
                    ReconcileOutcome::Deferred => {}
                    _ => entry.deferred_passes = 0,
                }
            }
        }

        outcome
    }

    /// Turns a synchronizer result into an outcome, reporting errors.
    fn settle(
        &mut self,
        kind: EntityKind,
        id: &str,
        result: SyncResult<ReconcileOutcome>,
    ) -> ReconcileOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(error) => {
                self.sink.report(Diagnostic::from_error(kind, id, &error));
                ReconcileOutcome::Failed
            }
        }
    }
}

impl<E: MapEngine> fmt::Debug for MapSync<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSync")
            .field("gate", &self.gate)
            .field("ids", &self.ids)
            .field("config", &self.config)
            .field("entities", &self.entities.len())
            .finish()
    }
}
