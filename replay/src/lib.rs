//! Scenario replay for mapsync.
//!
//! A scenario is a JSON document listing declarations, style events and
//! simulated user interaction. Replaying it against [`MemoryEngine`] yields
//! the engine calls and diagnostics each step produced.

use mapsync_engine::{EngineCall, EngineError, MemoryEngine};
use mapsync_model::{Declaration, LayerProps};
use mapsync_sync::{
    CollectingSink, Diagnostic, EntityHandle, MapSync, MapSyncConfig, ReconcileOutcome, SyncError,
};
use mapsync_types::LngLat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("step {step}: no entity named {name}")]
    UnknownName { step: usize, name: String },

    #[error("step {step}: entity name {name} is already mounted")]
    DuplicateName { step: usize, name: String },

    #[error("step {step}: {source}")]
    Sync { step: usize, source: SyncError },

    #[error("step {step}: {source}")]
    Engine { step: usize, source: EngineError },
}

/// A scripted session.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: MapSyncConfig,
    /// Whether the engine starts with its style loaded.
    #[serde(default)]
    pub style_loaded: bool,
    pub steps: Vec<Step>,
}

/// One scripted event. Entities are referred to by scenario-local names.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Mount {
        name: String,
        declaration: Declaration,
    },
    MountChild {
        name: String,
        parent: String,
        layer: LayerProps,
    },
    Update {
        name: String,
        declaration: Declaration,
    },
    Unmount {
        name: String,
    },
    /// The engine finishes loading its style and signals style data.
    FinishStyleLoad,
    /// The engine starts reloading its style.
    BeginReload,
    /// The engine signals style data.
    StyleData,
    ReconcileAll,
    /// The user drags a marker.
    DragMarker { id: String, lng_lat: LngLat },
    /// The user closes a popup.
    ClosePopup { id: String },
}

impl Step {
    pub fn label(&self) -> String {
        match self {
            Step::Mount { name, .. } => format!("mount {name}"),
            Step::MountChild { name, parent, .. } => format!("mount {name} in {parent}"),
            Step::Update { name, .. } => format!("update {name}"),
            Step::Unmount { name } => format!("unmount {name}"),
            Step::FinishStyleLoad => "finish style load".to_string(),
            Step::BeginReload => "begin style reload".to_string(),
            Step::StyleData => "style data".to_string(),
            Step::ReconcileAll => "reconcile all".to_string(),
            Step::DragMarker { id, .. } => format!("drag marker {id}"),
            Step::ClosePopup { id } => format!("close popup {id}"),
        }
    }
}

/// Outcome of one entity within a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityOutcome {
    pub name: String,
    pub id: String,
    #[serde(flatten)]
    pub outcome: ReconcileOutcome,
}

/// What one step did.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub label: String,
    pub outcomes: Vec<EntityOutcome>,
    pub calls: Vec<EngineCall>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a full replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
}

impl Report {
    /// Every engine call, in order.
    pub fn calls(&self) -> impl Iterator<Item = &EngineCall> {
        self.steps.iter().flat_map(|s| s.calls.iter())
    }

    /// Every diagnostic, in order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.steps.iter().flat_map(|s| s.diagnostics.iter())
    }
}

/// Reads a scenario file.
pub fn load_scenario(path: &Path) -> ReplayResult<Scenario> {
    let text = std::fs::read_to_string(path)?;
    let scenario = serde_json::from_str(&text)?;
    debug!(path = %path.display(), "scenario loaded");
    Ok(scenario)
}

struct Replay {
    map: MapSync<MemoryEngine>,
    sink: CollectingSink,
    names: BTreeMap<String, EntityHandle>,
}

impl Replay {
    fn handle(&self, step: usize, name: &str) -> ReplayResult<EntityHandle> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ReplayError::UnknownName {
                step,
                name: name.to_string(),
            })
    }

    fn claim(&self, step: usize, name: &str) -> ReplayResult<()> {
        if self.names.contains_key(name) {
            return Err(ReplayError::DuplicateName {
                step,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn outcome(&self, name: &str, handle: EntityHandle, outcome: ReconcileOutcome) -> EntityOutcome {
        EntityOutcome {
            name: name.to_string(),
            id: self.map.entity_id(handle).unwrap_or_default().to_string(),
            outcome,
        }
    }

    fn name_of(&self, handle: EntityHandle) -> String {
        self.names
            .iter()
            .find(|(_, h)| **h == handle)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| handle.to_string())
    }

    fn pass(&self, outcomes: Vec<(EntityHandle, ReconcileOutcome)>) -> Vec<EntityOutcome> {
        outcomes
            .into_iter()
            .map(|(handle, outcome)| self.outcome(&self.name_of(handle), handle, outcome))
            .collect()
    }

    fn run_step(&mut self, index: usize, step: &Step) -> ReplayResult<Vec<EntityOutcome>> {
        let sync = |source| ReplayError::Sync { step: index, source };
        let engine = |source| ReplayError::Engine { step: index, source };

        let outcomes = match step {
            Step::Mount { name, declaration } => {
                self.claim(index, name)?;
                let (handle, outcome) = self.map.mount(declaration.clone());
                self.names.insert(name.clone(), handle);
                vec![self.outcome(name, handle, outcome)]
            }
            Step::MountChild {
                name,
                parent,
                layer,
            } => {
                self.claim(index, name)?;
                let parent = self.handle(index, parent)?;
                let (handle, outcome) = self.map.mount_child(parent, layer.clone()).map_err(sync)?;
                self.names.insert(name.clone(), handle);
                vec![self.outcome(name, handle, outcome)]
            }
            Step::Update { name, declaration } => {
                let handle = self.handle(index, name)?;
                let outcome = self.map.update(handle, declaration.clone()).map_err(sync)?;
                vec![self.outcome(name, handle, outcome)]
            }
            Step::Unmount { name } => {
                let handle = self.handle(index, name)?;
                let id = self.map.entity_id(handle).unwrap_or_default().to_string();
                let outcome = self.map.unmount(handle).map_err(sync)?;
                self.names.remove(name);
                vec![EntityOutcome {
                    name: name.clone(),
                    id,
                    outcome,
                }]
            }
            Step::FinishStyleLoad => {
                self.map.engine_mut().finish_style_load();
                let outcomes = self.map.on_style_data();
                self.pass(outcomes)
            }
            Step::BeginReload => {
                self.map.engine_mut().begin_style_reload();
                self.map.on_style_loading();
                Vec::new()
            }
            Step::StyleData => {
                let outcomes = self.map.on_style_data();
                self.pass(outcomes)
            }
            Step::ReconcileAll => {
                let outcomes = self.map.reconcile_all();
                self.pass(outcomes)
            }
            Step::DragMarker { id, lng_lat } => {
                self.map.engine_mut().drag_marker(id, *lng_lat).map_err(engine)?;
                Vec::new()
            }
            Step::ClosePopup { id } => {
                self.map.engine_mut().close_popup(id).map_err(engine)?;
                Vec::new()
            }
        };
        Ok(outcomes)
    }
}

/// Replays `scenario` against a fresh [`MemoryEngine`].
///
/// # Errors
///
/// Fails on steps naming unknown entities or reusing a mounted name, and
/// on simulated user actions targeting entities that are not live.
/// Reconciliation problems are not errors; they show up as diagnostics.
pub fn run_scenario(scenario: &Scenario) -> ReplayResult<Report> {
    let engine = if scenario.style_loaded {
        MemoryEngine::loaded()
    } else {
        MemoryEngine::new()
    };
    let sink = CollectingSink::new();
    let mut replay = Replay {
        map: MapSync::with_sink(engine, scenario.config.clone(), sink.clone()),
        sink,
        names: BTreeMap::new(),
    };

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let label = step.label();
        debug!(index, step = %label, "replaying step");
        let outcomes = replay.run_step(index, step)?;
        steps.push(StepReport {
            index,
            label,
            outcomes,
            calls: replay.map.engine_mut().take_calls(),
            diagnostics: replay.sink.take(),
        });
    }

    info!(steps = steps.len(), "scenario replayed");
    Ok(Report { steps })
}

/// Human-readable rendering of a report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let _ = writeln!(out, "[{}] {}", step.index, step.label);
        for outcome in &step.outcomes {
            let _ = writeln!(out, "    {} ({}): {}", outcome.name, outcome.id, outcome.outcome);
        }
        for call in &step.calls {
            let _ = writeln!(out, "    -> {}({})", call.method(), call.target());
        }
        for diagnostic in &step.diagnostics {
            let _ = writeln!(out, "    !! {diagnostic}");
        }
    }
    out
}
