//! `svxdesk shortcut` - saved control codes

use crate::Context;
use crate::cli::ShortcutCommand;
use crate::config::AppConfig;
use crate::store::ShortcutStore;
use crate::ui;
use anyhow::{Context as _, Result, bail};
use colored::Colorize;

pub fn run(ctx: &Context, cmd: ShortcutCommand) -> Result<()> {
    let store = ShortcutStore::open()?;

    match cmd {
        ShortcutCommand::List => {
            let shortcuts = store.load();
            if shortcuts.is_empty() {
                ui::info("No shortcuts saved. Add one with: svxdesk shortcut add <NAME> <CODE>");
                return Ok(());
            }
            ui::header("Shortcuts");
            if ctx.verbose > 0 {
                ui::dim(&store.path().display().to_string());
            }
            for s in &shortcuts {
                println!(
                    "  {}  {:<20} {:<12} {}",
                    s.id.dimmed(),
                    s.name,
                    s.code.bold(),
                    s.created_at.dimmed()
                );
            }
        }
        ShortcutCommand::Add { name, code } => {
            let shortcut = store.add(&name, &code)?;
            ui::success(&format!("Saved {} as {}", shortcut.name, shortcut.id));
        }
        ShortcutCommand::Rm { id } => {
            if !store.remove(&id)? {
                bail!("No shortcut with id {id}");
            }
            ui::success(&format!("Removed {id}"));
        }
        ShortcutCommand::Run { id_or_name } => {
            let shortcut = store
                .find(&id_or_name)
                .with_context(|| format!("No shortcut named or with id {id_or_name}"))?;
            if !ctx.quiet {
                ui::info(&format!("Sending {} ({})", shortcut.name, shortcut.code));
            }
            let config = AppConfig::load()?;
            super::dtmf::send(ctx, &config, &shortcut.code)?;
        }
    }
    Ok(())
}
