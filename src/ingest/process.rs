//! Process liveness and termination helpers
//!
//! Thin wrappers over signal delivery. The completion watcher owns each
//! child and reaps it; these helpers cover the two places that only have
//! a pid to work with: the health sweep's liveness probe and shutdown's
//! best-effort kill.

/// Check whether a process with the given pid still exists
///
/// Signal 0 probes for existence without delivering anything. `EPERM`
/// means the process exists but belongs to someone else, which still
/// counts as alive.
#[cfg(unix)]
pub(crate) fn is_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    if pid == 0 {
        return false;
    }
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub(crate) fn is_alive(_pid: u32) -> bool {
    // No portable probe; the completion watcher detects the exit instead.
    true
}

/// Request immediate termination of a process
///
/// Best effort. Killing an already-exited process is not an error; any
/// failure is logged at debug level by the caller.
#[cfg(unix)]
pub(crate) fn terminate(pid: u32) -> std::io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGKILL)
        .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))
}

#[cfg(not(unix))]
pub(crate) fn terminate(_pid: u32) -> std::io::Result<()> {
    // The shutdown signal already reached the watcher, which kills the
    // child through its handle.
    Ok(())
}
