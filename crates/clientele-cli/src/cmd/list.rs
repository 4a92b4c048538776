//! `clientele list` — one page of customers, filtered and sorted.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use clientele_core::config::load_config;
use clientele_core::{Customer, Roster, ViewStatus, ZoneFilter, load_customers};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by exact zone value ("" selects records with no zone).
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Case-insensitive search over name and email.
    #[arg(short, long)]
    pub search: Option<String>,

    /// 1-based page to display (out of range clamps).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Records per page (overrides clientele.toml).
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Path to the customer data file (overrides clientele.toml).
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Everything `list` reports for one derived view.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub status: &'static str,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub zones: Vec<String>,
    pub customers: Vec<Customer>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let config = load_config(project_root)?;
    let data_path = super::resolve_data_path(args.data.as_deref(), &config, project_root);
    let page_size = super::resolve_page_size(args.page_size, &config);

    let mut roster = Roster::new(page_size);
    let ticket = roster.begin_load();
    roster.finish_load(ticket, Ok(load_customers(&data_path)?));

    if let Some(zone) = &args.zone {
        roster.set_zone(ZoneFilter::Zone(zone.clone()));
    }
    if let Some(search) = &args.search {
        roster.set_search(search.clone());
    }
    roster.set_page(args.page);

    let view = roster.view();
    let report = ListReport {
        status: status_label(&view.status),
        page: view.page,
        total_pages: view.total_pages,
        page_size: page_size.get(),
        total_matches: view.matches.len(),
        zones: view.zones.clone(),
        customers: view.page_items.clone(),
    };
    output::render_item(&report, output)
}

fn status_label(status: &ViewStatus) -> &'static str {
    match status {
        ViewStatus::Loading => "loading",
        ViewStatus::Failed(_) => "failed",
        ViewStatus::NoMatches => "no_matches",
        ViewStatus::Ready => "ready",
    }
}

/// Truncate to `width` characters, ellipsis when cut.
fn column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        format!("{value:<width$}")
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{cut:<0$}…", width.saturating_sub(1))
    }
}

fn zone_label(zone: &str) -> &str {
    if zone.is_empty() { "(unspecified)" } else { zone }
}

impl Renderable for ListReport {
    fn render_pretty(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "Customers: page {}/{} ({} matching)",
            self.page, self.total_pages, self.total_matches
        )?;
        output::pretty_rule(w)?;
        if self.status == "no_matches" {
            return writeln!(w, "No customers match the current filters.");
        }
        writeln!(
            w,
            "{} {} {} {} {} {}",
            column("NAME", 22),
            column("EMAIL", 26),
            column("PHONE", 11),
            column("GROUP", 10),
            column("ZONE", 13),
            "SIGNUP"
        )?;
        for customer in &self.customers {
            writeln!(
                w,
                "{} {} {} {} {} {}",
                column(&customer.full_name, 22),
                column(&customer.email, 26),
                column(&customer.phone, 11),
                column(&customer.group, 10),
                column(zone_label(&customer.zone), 13),
                customer.signup
            )?;
        }
        Ok(())
    }

    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for customer in &self.customers {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}",
                customer.full_name,
                customer.email,
                customer.phone,
                customer.group,
                customer.zone,
                customer.signup
            )?;
        }
        Ok(())
    }
}
