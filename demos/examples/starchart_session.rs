// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted starchart session against a background worker.
//!
//! This example shows how to combine:
//! - `starchart_location` for the cursor coordinator,
//! - `starchart_worker` for a game side answering queries on its own thread,
//! - `tracing-subscriber` for the coordinator's and worker's logs.
//!
//! Run:
//! - `cargo run -p starchart_demos --example starchart_session`
//! - `RUST_LOG=starchart_location=trace cargo run -p starchart_demos --example starchart_session`
//!   to watch every state transition.

use std::error::Error;
use std::time::Duration;

use starchart_location::{
    Configuration, Listener, Location, LocationEvent, LockFlags, ObjectItem, Playability, Position,
    Reference,
};
use starchart_worker::{ChartObject, ReplyPump, StaticChart, WorkerError, spawn};
use tracing_subscriber::EnvFilter;

fn chart() -> StaticChart {
    let home = Position::new(2000, 2000);
    [
        ChartObject::new(Reference::planet(14), home)
            .with_label("Orionis (14)")
            .with_playability(Playability::Playable)
            .with_marked(true),
        ChartObject::new(Reference::starbase(14), home).with_playability(Playability::Playable),
        ChartObject::new(Reference::ship(3), home)
            .with_label("Scout (3)")
            .with_playability(Playability::Playable),
        ChartObject::new(Reference::ship(41), home)
            .with_label("Freighter (41)")
            .with_marked(true)
            .with_color(4),
        ChartObject::new(Reference::ship(77), home).with_label("Unknown cruiser (77)"),
        ChartObject::new(Reference::planet(9), Position::new(2075, 1990)).with_label("Vega (9)"),
        ChartObject::new(Reference::planet(22), Position::new(1010, 1020))
            .with_label("Rim (22)")
            .with_marked(true),
        ChartObject::new(Reference::ion_storm(2), Position::new(2100, 2100)),
    ]
    .into_iter()
    .collect()
}

fn report<L: Listener>(loc: &mut Location<L>) {
    for event in loc.take_events() {
        match event {
            LocationEvent::PositionChanged(pos) => tracing::info!(%pos, "cursor moved"),
            LocationEvent::ObjectChanged(Some(reference)) => {
                tracing::info!(%reference, "focus");
            }
            LocationEvent::ObjectChanged(None) => tracing::info!("focus cleared"),
        }
    }
}

/// Applies replies until the coordinator is idle, then prints the list.
fn settle<L: Listener>(pump: &ReplyPump, loc: &mut Location<L>) -> Result<(), WorkerError> {
    report(loc);
    while !loc.state().is_idle() {
        if !pump.pump_timeout(loc, Duration::from_secs(1))? {
            tracing::warn!(state = loc.state().name(), "still waiting for the worker");
        }
        report(loc);
    }

    let current = loc.current_object_index();
    for (index, item) in loc.object_list().into_iter().flatten().enumerate() {
        match item {
            ObjectItem::Divider { label } => tracing::info!("  -- {label} --"),
            ObjectItem::Object(entry) => tracing::info!(
                "  {} {}{}",
                if Some(index) == current { '>' } else { ' ' },
                entry.label,
                if entry.marked { " *" } else { "" },
            ),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();

    let (listener, pump, handle) = spawn(chart())?;
    let config = Configuration::wrapped(Position::new(2000, 2000), Position::new(2000, 2000))?;
    let mut loc = Location::with_configuration(listener, config);

    tracing::info!("open the chart at home");
    loc.set_position(Position::new(2000, 2000));
    settle(&pump, &mut loc)?;

    tracing::info!("cycle to the next marked object");
    loc.cycle_focused_object(true, true);
    settle(&pump, &mut loc)?;

    tracing::info!("nudge east twice before the worker answers");
    loc.move_relative(40, 0);
    loc.move_relative(30, 0);
    settle(&pump, &mut loc)?;

    tracing::info!("lock onto the nearest planet");
    loc.lock_object(LockFlags::LEFT);
    settle(&pump, &mut loc)?;

    tracing::info!("jump to the rim, nudging while the jump is pending");
    if loc.start_jump() {
        loc.move_relative(-20, -20);
        // The jump target would normally come from a "next object" search.
        loc.set_position(Position::new(1030, 1040));
        loc.lock_object(LockFlags::LEFT | LockFlags::MARKED_ONLY);
    }
    settle(&pump, &mut loc)?;

    drop(loc);
    handle.join()?;
    Ok(())
}
