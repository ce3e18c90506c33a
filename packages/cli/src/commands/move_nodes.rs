use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rearrange_editor::{EditSession, KeepAll, KeepNames, PasteReport, Reverse};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Document to edit
    pub file: PathBuf,

    /// Byte offset inside the parent of the elements to move
    #[arg(long)]
    pub from: usize,

    /// Byte offset to paste at, in the document as it is before the move
    #[arg(long)]
    pub to: usize,

    /// Names to move, in paste order (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub keep: Vec<String>,

    /// Paste in reverse order
    #[arg(short, long)]
    pub reverse: bool,

    /// Print the result instead of writing the file
    #[arg(long)]
    pub stdout: bool,
}

/// Apply the move and return the session with its result
pub fn run_move(args: &MoveArgs, config_path: &Path) -> Result<(EditSession, Option<PasteReport>)> {
    let config = Config::load(config_path)?;
    let mut session = EditSession::load(&args.file, config.name_properties.clone())?
        .with_engine(config.engine());

    let mut keep = KeepNames(args.keep.clone());
    let report = match (args.keep.is_empty(), args.reverse) {
        (true, false) => session.move_at_cursor(args.from, args.to, &mut KeepAll)?,
        (true, true) => session.move_at_cursor(args.from, args.to, &mut Reverse(KeepAll))?,
        (false, false) => session.move_at_cursor(args.from, args.to, &mut keep)?,
        (false, true) => session.move_at_cursor(args.from, args.to, &mut Reverse(keep))?,
    };
    Ok((session, report))
}

pub fn move_nodes(args: MoveArgs, config_path: &Path) -> Result<()> {
    let (mut session, report) = run_move(&args, config_path)?;

    let Some(report) = report else {
        eprintln!("{} Nothing to move", "⚠️".yellow());
        return Ok(());
    };

    if args.stdout {
        print!("{}", session.text());
    } else {
        session.save()?;
        println!(
            "  {} Moved {} to offset {} in {}",
            "✓".green(),
            report.names.join(", ").bright_white(),
            report.offset,
            args.file.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "<deck>\n<card id=\"q\"/>\n<card id=\"k\"/>\n<card id=\"j\"/>\n</deck>\n";

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deck.sgml");
        std::fs::write(&file, DECK).unwrap();

        let config_path = dir.path().join("rearrange.config.json");
        let mut config = Config::default();
        config.name_properties.set_attribute("deck", "card", "id");
        config.save(&config_path).unwrap();

        (dir, file, config_path)
    }

    fn args(file: PathBuf, keep: &[&str], reverse: bool, stdout: bool) -> MoveArgs {
        MoveArgs {
            file,
            from: 1,
            to: DECK.find("</deck>").unwrap(),
            keep: keep.iter().map(|s| s.to_string()).collect(),
            reverse,
            stdout,
        }
    }

    #[test]
    fn test_move_selected_names_and_save() {
        let (_dir, file, config_path) = setup();

        move_nodes(args(file.clone(), &["j", "q"], false, false), &config_path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "<deck>\n\n<card id=\"k\"/>\n\n<card id=\"j\"/>\n<card id=\"q\"/>\n</deck>\n"
        );
    }

    #[test]
    fn test_reverse_all() {
        let (_dir, file, config_path) = setup();

        let (session, report) = run_move(&args(file, &[], true, true), &config_path).unwrap();

        assert_eq!(report.unwrap().names, vec!["j", "k", "q"]);
        assert_eq!(
            session.text(),
            "<deck>\n\n\n\n<card id=\"j\"/>\n<card id=\"k\"/>\n<card id=\"q\"/>\n</deck>\n"
        );
    }

    #[test]
    fn test_stdout_leaves_file_alone() {
        let (_dir, file, config_path) = setup();

        move_nodes(args(file.clone(), &["k"], false, true), &config_path).unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), DECK);
    }
}
