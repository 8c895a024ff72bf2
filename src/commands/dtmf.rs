//! `svxdesk dtmf` - control-code delivery

use crate::Context;
use crate::cli::{DtmfCommand, TemplateCommand};
use crate::config::AppConfig;
use crate::daemon;
use crate::progress;
use crate::runner;
use crate::store::SettingsStore;
use crate::ui;
use anyhow::{Result, bail};
use colored::Colorize;
use dtmf::{COMMON_CODES, ControlTarget, DeviceStatus, ExecutionResult, Pipeline, ShellExecutor};

pub fn run(ctx: &Context, cmd: DtmfCommand) -> Result<()> {
    let config = AppConfig::load()?;
    match cmd {
        DtmfCommand::Send { code } => send(ctx, &config, &code),
        DtmfCommand::Status => status(&config),
        DtmfCommand::Codes => {
            codes();
            Ok(())
        }
        DtmfCommand::Template(cmd) => template(&config, cmd),
    }
}

/// Deliver one control code with the current template and device path.
pub fn send(ctx: &Context, config: &AppConfig, code: &str) -> Result<()> {
    let device = daemon::device_path(config);
    let settings = SettingsStore::open()?.load(&device);

    let target = ControlTarget::new(settings.template(), &settings.pty_path);
    let pipeline = Pipeline::new(ShellExecutor::with_shell(config.shell.as_str()));

    let result = progress::with_spinner(ctx.quiet, "Sending control code...", || {
        pipeline.submit(code, &target)
    });
    report(ctx, code, &result)
}

fn report(ctx: &Context, code: &str, result: &ExecutionResult) -> Result<()> {
    if ctx.verbose > 0
        && let Some(command) = &result.command
    {
        ui::dim(&format!("$ {command}"));
    }

    if result.succeeded {
        if !ctx.quiet {
            ui::success(&result.message());
            if let Some(meaning) = dtmf::describe(code) {
                ui::kv("Code", &format!("{} ({meaning})", code.trim()));
            }
            if !result.output.is_empty() {
                ui::dim(&result.output);
            }
        }
        return Ok(());
    }

    ui::error(&result.message());
    if let Some(failure) = &result.failure {
        ui::dim(failure.category().advice());
    }
    match result.exit_status {
        Some(status) => bail!("Control code failed with exit status {status}"),
        None => bail!("Control code was not sent"),
    }
}

fn status(config: &AppConfig) -> Result<()> {
    let device = daemon::device_path(config);
    let store = SettingsStore::open()?;
    let settings = store.load(&device);
    let probe = DeviceStatus::probe(&device);

    ui::header("Control Device");
    ui::kv("Path", &probe.path.display().to_string());
    if let Some(target) = &probe.resolved {
        ui::kv("Resolves to", &target.display().to_string());
    }
    ui::kv("Exists", &ui::yes_no(probe.exists));
    ui::kv("Readable", &ui::yes_no(probe.readable));
    ui::kv("Writable", &ui::yes_no(probe.writable));
    ui::kv("Enabled", &ui::yes_no(probe.enabled));

    ui::header("Execution");
    ui::kv("Template", &settings.execution_command);
    ui::kv(
        "Shell",
        &format!("{} ({})", config.shell, ui::yes_no(runner::command_exists(&config.shell))),
    );
    ui::kv("Settings file", &store.path().display().to_string());
    ui::kv(
        "Daemon config",
        &config.daemon_config_path().display().to_string(),
    );

    if !probe.exists {
        println!();
        ui::warn("Control device missing; is the daemon running with DTMF control enabled?");
    }
    Ok(())
}

fn codes() {
    ui::header("Common Codes");
    for entry in COMMON_CODES {
        println!("  {:<12} {}", entry.code.bold(), entry.description);
    }
}

fn template(config: &AppConfig, cmd: TemplateCommand) -> Result<()> {
    let device = daemon::device_path(config);
    let store = SettingsStore::open()?;

    match cmd {
        TemplateCommand::Show => {
            println!("{}", store.load(&device).execution_command);
        }
        TemplateCommand::Set { template } => {
            let settings = store.save(&template, &device)?;
            let rendered = settings.template();
            if !rendered.uses_code() {
                ui::warn("Template has no {DTMF_CODE} placeholder; codes will be ignored");
            }
            if !rendered.uses_device() {
                ui::warn("Template has no {PTY_DEVICE} placeholder; the configured device is ignored");
            }
            ui::success("Execution template saved");
        }
        TemplateCommand::Reset => {
            store.reset(&device)?;
            ui::success("Execution template reset to default");
        }
    }
    Ok(())
}
