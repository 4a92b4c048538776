//! `clientele browse` — launch the interactive roster browser.

use anyhow::Result;
use clap::Args;
use clientele_core::config::load_config;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Path to the customer data file (overrides clientele.toml).
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Records per page (overrides clientele.toml).
    #[arg(long)]
    pub page_size: Option<usize>,
}

pub fn run_browse(args: &BrowseArgs, project_root: &Path) -> Result<()> {
    let config = load_config(project_root)?;
    let data_path = super::resolve_data_path(args.data.as_deref(), &config, project_root);
    let page_size = super::resolve_page_size(args.page_size, &config);
    crate::tui::browse::run(data_path, page_size)
}
