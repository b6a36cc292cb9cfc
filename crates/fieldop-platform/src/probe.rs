//! Platform probes backed by external commands.
//!
//! A probe either yields the command's output or nothing. Spawn failures,
//! non-zero exits, non-UTF-8 output and timeouts are logged and collapse to
//! `None`, which the resolver treats as "no match".

use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Runtime sources of platform detail.
pub trait PlatformProbe {
    /// The configured hardware SKU, e.g. `ACS-MSN2700`.
    fn hwsku(&self) -> Option<String>;

    /// Free-text listing of detected PCI devices.
    fn pci_devices(&self) -> Option<String>;
}

impl<T: PlatformProbe + ?Sized> PlatformProbe for &T {
    fn hwsku(&self) -> Option<String> {
        (**self).hwsku()
    }

    fn pci_devices(&self) -> Option<String> {
        (**self).pci_devices()
    }
}

/// Probe that runs platform commands directly (no shell).
#[derive(Debug, Clone)]
pub struct CommandProbe {
    hwsku_command: Vec<String>,
    pci_command: Vec<String>,
    timeout: Duration,
}

impl CommandProbe {
    /// Default per-command timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(hwsku_command: Vec<String>, pci_command: Vec<String>, timeout: Duration) -> Self {
        CommandProbe {
            hwsku_command,
            pci_command,
            timeout,
        }
    }

    /// `sonic-cfggen -d -v DEVICE_METADATA.localhost.hwsku`
    pub fn default_hwsku_command() -> Vec<String> {
        ["sonic-cfggen", "-d", "-v", "DEVICE_METADATA.localhost.hwsku"]
            .map(String::from)
            .to_vec()
    }

    /// `sudo lspci`
    pub fn default_pci_command() -> Vec<String> {
        ["sudo", "lspci"].map(String::from).to_vec()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        CommandProbe::new(
            Self::default_hwsku_command(),
            Self::default_pci_command(),
            Self::DEFAULT_TIMEOUT,
        )
    }
}

impl PlatformProbe for CommandProbe {
    fn hwsku(&self) -> Option<String> {
        run_command(&self.hwsku_command, self.timeout)
            .map(|output| output.trim_end_matches('\n').to_string())
    }

    fn pci_devices(&self) -> Option<String> {
        run_command(&self.pci_command, self.timeout)
    }
}

/// Run `argv` and capture its stdout, giving up after `timeout`.
///
/// The deadline applies to the command's own exit. Stdout goes to an unnamed
/// temporary file, so a chatty command cannot fill a pipe and a background
/// process still holding the descriptor cannot delay the result. On timeout
/// the child is killed.
pub fn run_command(argv: &[String], timeout: Duration) -> Option<String> {
    let Some((program, args)) = argv.split_first() else {
        warn!("empty probe command");
        return None;
    };

    let (mut capture, child_stdout) = match tempfile::tempfile().and_then(|file| {
        let dup = file.try_clone()?;
        Ok((file, dup))
    }) {
        Ok(pair) => pair,
        Err(err) => {
            warn!(command = %program, "failed to create probe output file: {err}");
            return None;
        }
    };

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(child_stdout))
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            warn!(command = %program, "failed to start probe command: {err}");
            return None;
        }
    };

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            warn!(command = %program, ?timeout, "probe command timed out");
            let _ = child.kill();
            let _ = child.wait();
            return None;
        }
        Err(err) => {
            warn!(command = %program, "failed to wait for probe command: {err}");
            let _ = child.kill();
            let _ = child.wait();
            return None;
        }
    };

    if !status.success() {
        warn!(command = %program, %status, "probe command failed");
        return None;
    }

    let mut output = Vec::new();
    if let Err(err) = capture
        .seek(SeekFrom::Start(0))
        .and_then(|_| capture.read_to_end(&mut output))
    {
        warn!(command = %program, "failed to read probe output: {err}");
        return None;
    }

    match String::from_utf8(output) {
        Ok(text) => {
            debug!(command = %program, bytes = text.len(), "probe command finished");
            Some(text)
        }
        Err(_) => {
            warn!(command = %program, "probe output is not UTF-8");
            None
        }
    }
}
