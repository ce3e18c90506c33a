use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use rearrange_editor::{EditSession, Element};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SetNameArgs {
    /// Document to read the element from
    pub file: PathBuf,

    /// Byte offset inside the element
    #[arg(long)]
    pub at: usize,

    /// Attribute that holds the element's name
    #[arg(short, long)]
    pub attribute: String,
}

pub fn set_name(args: SetNameArgs, config_path: &Path) -> Result<()> {
    let mut config = Config::load(config_path)?;
    let mut session = EditSession::load(&args.file, config.name_properties.clone())?;

    let mut element_type = None;
    let mut chooser = |element: &Element| -> Option<String> {
        element_type = Some(element.name.clone());
        Some(args.attribute.clone())
    };
    if session.set_name_property(args.at, &mut chooser)?.is_none() {
        bail!("no attribute chosen");
    }

    let doc_type = session.document_type()?.unwrap_or_default();
    config.name_properties = session.names().clone();
    config.save(config_path)?;

    println!(
        "  {} <{}> elements in {} documents are named by '{}'",
        "✓".green(),
        element_type.unwrap_or_default(),
        doc_type.bright_white(),
        args.attribute
    );
    Ok(())
}
