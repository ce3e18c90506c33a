use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rearrange_editor::EditSession;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NamesArgs {
    /// Document to inspect
    pub file: PathBuf,

    /// Byte offset inside the parent element
    #[arg(long)]
    pub at: usize,
}

/// Names a cut at `at` would offer
pub fn candidate_names(args: &NamesArgs, config_path: &Path) -> Result<Vec<String>> {
    let config = Config::load(config_path)?;
    let mut session = EditSession::load(&args.file, config.name_properties)?;
    Ok(session.candidates_at_cursor(args.at)?)
}

pub fn names(args: NamesArgs, config_path: &Path) -> Result<()> {
    let names = candidate_names(&args, config_path)?;

    if names.is_empty() {
        println!(
            "{} No named elements at offset {}",
            "⚠️".yellow(),
            args.at
        );
        println!("Use set-name to choose the attribute that names them");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_lists_configured_names_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deck.sgml");
        std::fs::write(&file, "<deck><card id=\"q\"/><card/><card id=\"k\"/></deck>").unwrap();

        let config_path = dir.path().join("rearrange.config.json");
        let mut config = Config::default();
        config.name_properties.set_attribute("deck", "card", "id");
        config.save(&config_path).unwrap();

        let args = NamesArgs { file, at: 1 };
        assert_eq!(candidate_names(&args, &config_path).unwrap(), vec!["q", "k"]);
    }
}
