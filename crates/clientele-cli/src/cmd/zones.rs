//! `clientele zones` — the distinct zones present in the data.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use clientele_core::config::load_config;
use clientele_core::view::zones::zone_index;
use clientele_core::load_customers;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ZonesArgs {
    /// Path to the customer data file (overrides clientele.toml).
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ZoneCount {
    pub zone: String,
    pub customers: usize,
}

#[derive(Debug, Serialize)]
pub struct ZonesReport {
    pub zones: Vec<ZoneCount>,
    pub total_customers: usize,
}

pub fn run_zones(args: &ZonesArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let config = load_config(project_root)?;
    let data_path = super::resolve_data_path(args.data.as_deref(), &config, project_root);
    let customers = load_customers(&data_path)?;

    let zones = zone_index(&customers)
        .into_iter()
        .map(|zone| {
            let count = customers.iter().filter(|c| c.zone == zone).count();
            ZoneCount {
                zone,
                customers: count,
            }
        })
        .collect();

    let report = ZonesReport {
        zones,
        total_customers: customers.len(),
    };
    output::render_item(&report, output)
}

impl Renderable for ZonesReport {
    fn render_pretty(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "Zones ({} customers)", self.total_customers)?;
        output::pretty_rule(w)?;
        if self.zones.is_empty() {
            return writeln!(w, "No customers in the data set.");
        }
        for entry in &self.zones {
            let label = if entry.zone.is_empty() {
                "(unspecified)"
            } else {
                &entry.zone
            };
            writeln!(w, "{label:<20} {:>6}", entry.customers)?;
        }
        output::pretty_rule(w)?;
        output::pretty_kv(w, "Total", self.total_customers.to_string())
    }

    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for entry in &self.zones {
            writeln!(w, "{}\t{}", entry.zone, entry.customers)?;
        }
        Ok(())
    }
}
