/// Native privilege and access checks.
///
/// Elevation is a Windows token query or a Unix effective-uid check.
/// Access probing only opens a directory for listing.
use super::{Access, AccessProbe, PrivilegeProbe};
use crate::Result;
use std::io::ErrorKind;
use std::path::Path;

#[cfg(windows)]
use windows::Win32::Foundation::{CloseHandle, HANDLE};
#[cfg(windows)]
use windows::Win32::Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
#[cfg(windows)]
use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

/// Privilege probe backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePrivilegeProbe;

impl PrivilegeProbe for NativePrivilegeProbe {
    fn is_elevated(&self) -> Result<bool> {
        is_elevated()
    }

    fn elevation_command(&self) -> String {
        let exe = std::env::current_exe()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "sweepwise".to_owned());
        elevation_command(&exe)
    }
}

/// Check whether the current process is running with elevated (admin) privileges.
#[cfg(windows)]
pub fn is_elevated() -> Result<bool> {
    unsafe {
        let mut token_handle = HANDLE::default();
        let process = GetCurrentProcess();

        OpenProcessToken(process, TOKEN_QUERY, &mut token_handle).map_err(|e| {
            crate::CoreError::PrivilegeCheckUnavailable(format!("OpenProcessToken: {e}"))
        })?;

        let mut elevation = TOKEN_ELEVATION::default();
        let mut return_length = 0u32;

        let result = GetTokenInformation(
            token_handle,
            TokenElevation,
            Some(&mut elevation as *mut _ as *mut _),
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut return_length,
        );

        let _ = CloseHandle(token_handle);

        result.map_err(|e| {
            crate::CoreError::PrivilegeCheckUnavailable(format!("GetTokenInformation: {e}"))
        })?;
        Ok(elevation.TokenIsElevated != 0)
    }
}

/// Check whether the current process is running as root.
#[cfg(unix)]
pub fn is_elevated() -> Result<bool> {
    // SAFETY: geteuid has no preconditions and cannot fail.
    Ok(unsafe { libc::geteuid() } == 0)
}

#[cfg(not(any(windows, unix)))]
pub fn is_elevated() -> Result<bool> {
    Err(crate::CoreError::PrivilegeCheckUnavailable(format!(
        "no privilege check for target OS {}",
        std::env::consts::OS
    )))
}

/// Platform instruction for relaunching `exe` with elevated privileges.
///
/// Empty on platforms with no known elevation mechanism.
pub fn elevation_command(exe: &str) -> String {
    match std::env::consts::OS {
        "windows" => format!("Start-Process \"{exe}\" -Verb RunAs"),
        "linux" => format!("pkexec {exe}"),
        "macos" => format!(
            "osascript -e 'do shell script \"{exe}\" with administrator privileges'"
        ),
        _ => String::new(),
    }
}

/// Access probe that opens the location for listing and discards the handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAccessProbe;

impl AccessProbe for NativeAccessProbe {
    fn probe(&self, path: &Path) -> Access {
        match std::fs::read_dir(path) {
            Ok(_) => Access::Granted,
            Err(e) if e.kind() == ErrorKind::NotFound => Access::Missing,
            Err(e) => {
                tracing::debug!("Access probe failed for {}: {e}", path.display());
                Access::Denied
            }
        }
    }
}
