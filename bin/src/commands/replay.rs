use crate::trace::{self, TraceAction, TraceStep};
use anyhow::{Context, Result};
use autoscroll::{
    sim::{Region, Simulation},
    CursorShape, InputEvent, Point, Settings,
};
use std::{fmt, path::Path, time::Duration};
use tracing::{debug, info};

/// Extent of the simulated view on both axes.
pub const MAX_SCROLL: i32 = 1_000_000;

/// Observable state right after one trace step was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayLine {
    pub at: Duration,
    pub step: String,
    pub consumed: bool,
    pub offsets: Point,
    pub cursor: Option<CursorShape>,
    pub active: bool,
}

impl fmt::Display for ReplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cursor = match self.cursor {
            Some(cursor) => cursor.to_string(),
            None => "default".to_string(),
        };
        write!(
            f,
            "{:>6}ms  {:<28} {:<9} offset={:<14} cursor={cursor}{}",
            self.at.as_millis(),
            self.step,
            if self.consumed { "consumed" } else { "passed" },
            self.offsets.to_string(),
            if self.active { "" } else { " (idle)" },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub lines: Vec<ReplayLine>,
    pub final_offsets: Point,
    pub duration: Duration,
    pub ticks: u64,
}

pub fn run(trace_path: &Path, settings: Settings) -> Result<()> {
    let source = std::fs::read_to_string(trace_path)
        .with_context(|| format!("Failed to read trace file: {}", trace_path.display()))?;
    let steps = trace::parse(&source)
        .with_context(|| format!("Failed to parse trace file: {}", trace_path.display()))?;

    info!(
        trace = %trace_path.display(),
        steps = steps.len(),
        mode = %settings.scroll_mode,
        speed = %settings.speed,
        "Replaying trace"
    );

    let report = replay(&steps, settings);
    for line in &report.lines {
        println!("{line}");
    }
    println!(
        "final offset {} after {}ms ({} ticks)",
        report.final_offsets,
        report.duration.as_millis(),
        report.ticks
    );
    Ok(())
}

/// Drive `steps` through a fresh simulation, advancing time to each step before delivering it.
pub fn replay(steps: &[TraceStep], settings: Settings) -> ReplayReport {
    let mut sim = Simulation::new(settings, Region::default(), MAX_SCROLL);
    let mut lines = Vec::with_capacity(steps.len());

    for step in steps {
        sim.advance_to(step.at);
        let (label, consumed) = match &step.action {
            TraceAction::Input(event) => (describe(event), sim.dispatch(event)),
            TraceAction::Hide => ("hide".to_string(), sim.hide()),
            TraceAction::Blur => ("blur".to_string(), sim.blur()),
        };
        debug!(line = step.line, step = %label, consumed, "Replayed step");

        lines.push(ReplayLine {
            at: sim.now(),
            step: label,
            consumed,
            offsets: sim.offsets(),
            cursor: sim.cursor(),
            active: sim.is_active(),
        });
    }

    ReplayReport {
        lines,
        final_offsets: sim.offsets(),
        duration: sim.now(),
        ticks: sim.ticks(),
    }
}

fn describe(event: &InputEvent) -> String {
    use autoscroll::{InputEventKind, MouseEventKind};

    let mods = event.modifiers;
    match &event.kind {
        InputEventKind::Mouse(kind) => match kind {
            MouseEventKind::Press(button) => format!("press {mods}{button} {}", event.position),
            MouseEventKind::Release(button) => {
                format!("release {mods}{button} {}", event.position)
            },
            MouseEventKind::Click(button) => format!("click {mods}{button} {}", event.position),
            MouseEventKind::Move => format!("move {}", event.position),
            MouseEventKind::Drag => format!("drag {}", event.position),
        },
        InputEventKind::KeyDown(key) => format!("key {key}"),
        InputEventKind::KeyUp(key) => format!("key-up {key}"),
    }
}
