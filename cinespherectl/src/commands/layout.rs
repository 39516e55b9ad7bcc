use std::path::Path;

use cinesphere_core::layout::SphereLayoutEngine;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LayoutReport {
    count: usize,
    radius: f32,
    positions: Vec<[f32; 3]>,
}

pub fn run(config: Option<&Path>, count: usize, json: bool) -> anyhow::Result<()> {
    let load = super::load_config(config)?;
    let engine = SphereLayoutEngine::new(load.config.layout);

    let report = LayoutReport {
        count,
        radius: engine.radius_for(count),
        positions: engine.layout(count).iter().map(|p| p.to_array()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} posters on a sphere of radius {:.3}", report.count, report.radius);
    for (index, [x, y, z]) in report.positions.iter().enumerate() {
        println!("{index:>5}  {x:>9.3} {y:>9.3} {z:>9.3}");
    }
    Ok(())
}
