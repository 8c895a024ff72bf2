//! `svxdesk conf` - read and patch the daemon configuration

use crate::Context;
use crate::cli::{ConfCommand, ConfSetArgs};
use crate::config::AppConfig;
use crate::daemon;
use crate::progress;
use crate::ui;
use anyhow::{Context as _, Result, bail};
use confpatch::{ConfigDocument, EditKind, GovernedKey, UpdateRequest};
use dialoguer::Confirm;

pub fn run(ctx: &Context, cmd: ConfCommand) -> Result<()> {
    let config = AppConfig::load()?;
    match cmd {
        ConfCommand::Get { key, section } => get(&config, &key, section.as_deref()),
        ConfCommand::Set(args) => set(ctx, &config, &args),
    }
}

fn get(config: &AppConfig, key: &str, section: Option<&str>) -> Result<()> {
    let path = config.daemon_config_path();
    let document = ConfigDocument::read(&path)
        .with_context(|| format!("Could not load daemon config {}", path.display()))?;

    let section = section.unwrap_or(&config.device_key.section);
    match confpatch::lookup(&document, section, key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("{key} is not set in [{section}]"),
    }
}

/// Build the patch request from command-line arguments.
fn build_request(args: &ConfSetArgs, governed: &GovernedKey) -> Result<UpdateRequest> {
    let mut request =
        UpdateRequest::parse_assignments(&args.assignments).context("Invalid assignment")?;

    if let Some(key) = args
        .enable
        .iter()
        .chain(&args.disable)
        .find(|key| !key.eq_ignore_ascii_case(&governed.key))
    {
        bail!(
            "{key} cannot be toggled; only {} in [{}] is governed",
            governed.key,
            governed.section
        );
    }

    // A repeated flag still yields a single toggle.
    let enabled = if !args.enable.is_empty() {
        Some(true)
    } else if !args.disable.is_empty() {
        Some(false)
    } else {
        None
    };
    if let Some(enabled) = enabled {
        let value = request.value_of(&governed.key).map(str::to_string);
        request = request.toggle(governed.clone(), enabled, value);
    }

    if request.is_empty() {
        bail!("Nothing to change. Pass KEY=VALUE assignments, --enable or --disable");
    }
    Ok(request)
}

fn set(ctx: &Context, config: &AppConfig, args: &ConfSetArgs) -> Result<()> {
    let request = build_request(args, &config.governed_key())?;

    let path = config.daemon_config_path();
    let document = ConfigDocument::read(&path)
        .with_context(|| format!("Could not load daemon config {}", path.display()))?;

    let outcome = confpatch::patch(&document, &request);

    for skipped in &outcome.skipped {
        ui::warn(&format!("{}: {skipped}", skipped.category().description()));
    }

    if !outcome.differs_from(&document) {
        ui::info("Configuration already up to date");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header(&format!("Changes to {}", path.display()));
        ui::diff(&document.to_content(), &outcome.to_content());
        println!();
    }

    if ctx.verbose > 0 {
        for edit in &outcome.edits {
            let verb = match edit.kind {
                EditKind::Replaced => "replace",
                EditKind::Enabled => "enable",
                EditKind::Disabled => "disable",
                EditKind::Inserted => "insert",
            };
            ui::dim(&format!("line {}: {verb} {}", edit.index + 1, edit.key));
        }
    }

    if args.dry_run {
        ui::info("Dry run: nothing written");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Write {}?", path.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            ui::info("Aborted");
            return Ok(());
        }
    }

    confpatch::write_atomic(&path, outcome.to_bytes())
        .with_context(|| format!("Could not save {}", path.display()))?;
    ui::success(&format!(
        "Updated {} ({} change(s))",
        path.display(),
        outcome.edits.len()
    ));

    if args.no_restart {
        ui::dim("Daemon not restarted (--no-restart)");
        return Ok(());
    }

    match progress::with_spinner(ctx.quiet, "Restarting daemon...", || daemon::restart(config)) {
        Ok(()) => ui::success("Daemon restarted"),
        Err(e) => ui::warn(&format!("Configuration saved but restart failed: {e:#}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(assignments: &[&str], enable: &[&str], disable: &[&str]) -> ConfSetArgs {
        let owned = |items: &[&str]| items.iter().map(ToString::to_string).collect();
        ConfSetArgs {
            assignments: owned(assignments),
            enable: owned(enable),
            disable: owned(disable),
            dry_run: true,
            yes: false,
            no_restart: true,
        }
    }

    fn governed() -> GovernedKey {
        AppConfig::default().governed_key()
    }

    #[test]
    fn test_build_request_plain_values() {
        let request = build_request(&args(&["CALLSIGN=CA2XYZ"], &[], &[]), &governed()).unwrap();
        assert_eq!(request.value_of("CALLSIGN"), Some("CA2XYZ"));
        assert!(request.toggles().is_empty());
    }

    #[test]
    fn test_build_request_enable_uses_assigned_value() {
        let request = build_request(
            &args(&["DTMF_CTRL_PTY=/tmp/ctrl"], &["dtmf_ctrl_pty"], &[]),
            &governed(),
        )
        .unwrap();

        let toggle = &request.toggles()[0];
        assert!(toggle.enabled);
        assert_eq!(toggle.effective_value(), "/tmp/ctrl");
    }

    #[test]
    fn test_build_request_disable() {
        let request = build_request(&args(&[], &[], &["DTMF_CTRL_PTY"]), &governed()).unwrap();
        let toggle = &request.toggles()[0];
        assert!(!toggle.enabled);
        assert_eq!(toggle.effective_value(), "/dev/shm/dtmf_ctrl");
    }

    #[test]
    fn test_build_request_rejects_ungoverned_toggle() {
        let err = build_request(&args(&[], &["CALLSIGN"], &[]), &governed()).unwrap_err();
        assert!(err.to_string().contains("cannot be toggled"));
    }

    #[test]
    fn test_build_request_repeated_enable_is_one_toggle() {
        let request = build_request(
            &args(&[], &["DTMF_CTRL_PTY", "DTMF_CTRL_PTY"], &[]),
            &governed(),
        )
        .unwrap();
        assert_eq!(request.toggles().len(), 1);
    }

    #[test]
    fn test_build_request_rejects_empty() {
        assert!(build_request(&args(&[], &[], &[]), &governed()).is_err());
    }

    #[test]
    fn test_build_request_rejects_bad_assignment() {
        assert!(build_request(&args(&["CALLSIGN"], &[], &[]), &governed()).is_err());
    }
}
