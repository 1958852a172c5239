use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use beam::{
    BeamConfig, BeamEndpoint, ClientBeam, DeliveryFailed, ManualTickDriver, ObserverChannel,
    ObserverStatus, PositionProvider, Visibility, WorldId,
};
use codec::ProtocolVersion;
use glam::DVec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wire::Limits;

use crate::inspect::{format_inspect_pretty, inspect_packet, InspectReport};

/// A scripted run: one step per tick, applied before the tick runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: BeamConfig,
    pub start: BeamEndpoint,
    pub end: BeamEndpoint,
    pub steps: Vec<ScenarioStep>,
    /// Step at which `stop` is called instead of ticking.
    #[serde(default)]
    pub stop_at: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStep {
    pub position: DVec3,
    #[serde(default = "default_online")]
    pub online: bool,
    /// Defaults to the beam's world.
    #[serde(default)]
    pub world: Option<WorldId>,
    #[serde(default)]
    pub relocate_start: Option<BeamEndpoint>,
    #[serde(default)]
    pub relocate_end: Option<BeamEndpoint>,
}

const fn default_online() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub protocol: ProtocolVersion,
    pub squid_id: i32,
    pub guardian_id: i32,
    pub ticks: Vec<TickReport>,
    pub final_state: Visibility,
}

impl SimulationReport {
    /// Every packet sent during the run, in order.
    pub fn packets(&self) -> impl Iterator<Item = &InspectReport> {
        self.ticks.iter().flat_map(|tick| tick.packets.iter())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub state: Visibility,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packets: Vec<InspectReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

struct ObserverState {
    status: ObserverStatus,
    sent: Vec<Vec<u8>>,
}

#[derive(Clone)]
struct ScriptedObserver {
    state: Arc<Mutex<ObserverState>>,
}

impl ScriptedObserver {
    fn new(status: ObserverStatus) -> Self {
        Self {
            state: Arc::new(Mutex::new(ObserverState {
                status,
                sent: Vec::new(),
            })),
        }
    }

    fn apply(&self, status: ObserverStatus) {
        self.state.lock().status = status;
    }

    fn take_sent(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.state.lock().sent)
    }
}

impl ObserverChannel for ScriptedObserver {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed> {
        self.state.lock().sent.push(packet.to_vec());
        Ok(())
    }

    fn is_open(&self) -> bool {
        true
    }
}

impl PositionProvider for ScriptedObserver {
    fn status(&self) -> ObserverStatus {
        self.state.lock().status
    }
}

impl Scenario {
    fn status_at(&self, step: &ScenarioStep) -> ObserverStatus {
        ObserverStatus {
            online: step.online,
            world: step.world.unwrap_or(self.start.world),
            position: step.position,
        }
    }
}

/// Runs `scenario` on a manual tick driver and reports what was sent.
pub fn simulate(scenario: &Scenario) -> Result<SimulationReport> {
    let version = scenario.config.protocol;
    let initial = scenario.steps.first().map_or(
        ObserverStatus {
            online: true,
            world: scenario.start.world,
            position: scenario.start.position,
        },
        |step| scenario.status_at(step),
    );
    let observer = ScriptedObserver::new(initial);
    let mut beam = ClientBeam::new(
        observer.clone(),
        scenario.start,
        scenario.end,
        &scenario.config,
    )
    .context("build beam")?;
    let mut driver = ManualTickDriver::new();
    beam.start(&mut driver).context("start beam")?;

    let limits = Limits::default();
    let mut ticks = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let tick = driver.now();
        let mut errors = Vec::new();
        observer.apply(scenario.status_at(step));
        if let Some(endpoint) = step.relocate_start {
            if let Err(err) = beam.relocate_start(endpoint) {
                errors.push(format!("relocate start: {err}"));
            }
        }
        if let Some(endpoint) = step.relocate_end {
            if let Err(err) = beam.relocate_end(endpoint) {
                errors.push(format!("relocate end: {err}"));
            }
        }
        if scenario.stop_at == Some(index) {
            if let Err(err) = beam.stop(&mut driver) {
                errors.push(format!("stop: {err}"));
            }
        }
        driver.tick();

        let packets = observer
            .take_sent()
            .iter()
            .map(|bytes| inspect_packet(bytes, version, &limits))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("decode packets sent on tick {tick}"))?;
        let state = beam.state();
        debug!(tick, ?state, packets = packets.len(), "simulated tick");
        ticks.push(TickReport {
            tick,
            state,
            packets,
            errors,
        });
    }

    let report = SimulationReport {
        protocol: version,
        squid_id: beam.squid().id.raw(),
        guardian_id: beam.guardian().id.raw(),
        ticks,
        final_state: beam.state(),
    };
    info!(
        ticks = report.ticks.len(),
        packets = report.packets().count(),
        final_state = ?report.final_state,
        "simulation finished"
    );
    Ok(report)
}

pub fn format_simulation_pretty(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "protocol {} ({}) squid #{} guardian #{}",
        report.protocol,
        report.protocol.protocol_number(),
        report.squid_id,
        report.guardian_id
    );
    for tick in &report.ticks {
        let _ = writeln!(out, "tick {}: {:?}", tick.tick, tick.state);
        for packet in &tick.packets {
            let _ = writeln!(out, "  {}", format_inspect_pretty(packet));
        }
        for error in &tick.errors {
            let _ = writeln!(out, "  error: {error}");
        }
    }
    let _ = write!(out, "final: {:?}", report.final_state);
    out
}
