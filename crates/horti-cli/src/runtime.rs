// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use horti_tui::CatalogRuntime;
use std::process::{Command, Stdio};
use tracing::debug;
use url::Url;

/// Opens links with the platform's default handler.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl CatalogRuntime for SystemOpener {
    fn open_url(&mut self, url: &Url) -> Result<()> {
        let mut command = opener_command(url.as_str());
        let program = command.get_program().to_string_lossy().into_owned();
        debug!(%program, %url, "launching opener");

        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("launch {program}; is a browser opener installed?"))?;
        if !status.success() {
            bail!("{program} exited with {status}");
        }
        Ok(())
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::opener_command;

    #[test]
    fn opener_command_passes_url_as_single_argument() {
        let url = "https://github.com/o/r/issues/new?title=A+b&body=%60%60%60";
        let command = opener_command(url);
        let args = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(args.last().map(String::as_str), Some(url));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn opener_command_uses_xdg_open_on_unix() {
        let command = opener_command("https://example.org");
        assert_eq!(command.get_program(), "xdg-open");
    }
}
