use std::ffi::OsString;

use agnt::{LaunchError, LauncherConfig};
use anyhow::{Context, Result};
use log::debug;

fn main() {
    // Quiet by default: stdout/stderr belong to the launched binary
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();

    let config = LauncherConfig::from_env();

    match real_main(&config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report(&config, &e);
            std::process::exit(1);
        }
    }
}

fn real_main(config: &LauncherConfig) -> Result<i32> {
    // Everything after argv[0] goes to the binary untouched
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    agnt::bootstrap(config, &args)
        .with_context(|| format!("{} v{} could not be started", config.binary_stem, config.version))
}

/// Print the failure and its remediation steps to stderr
fn report(config: &LauncherConfig, err: &anyhow::Error) {
    debug!("launcher failure: {err:?}");

    eprintln!("Error: {err:#}");
    if let Some(launch_err) = err.downcast_ref::<LaunchError>() {
        let steps = launch_err.remediation(config);
        if !steps.is_empty() {
            eprintln!();
            for line in steps {
                eprintln!("{line}");
            }
        }
    }
}
