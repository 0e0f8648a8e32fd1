use std::io::{self, Write};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};

/// Switch `out` to the alternate screen with mouse capture.
pub fn enter<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
}

/// Put the terminal back the way it was.
///
/// Every step runs even when an earlier one fails; the first failure is
/// returned.
pub fn restore<W, F>(out: &mut W, disable_raw_mode: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show);
    raw.and(screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAVE_ALTERNATE_SCREEN: &str = "\x1b[?1049l";
    const SHOW_CURSOR: &str = "\x1b[?25h";

    #[test]
    fn restore_writes_every_sequence() {
        let mut out = Vec::new();
        restore(&mut out, || Ok(())).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(LEAVE_ALTERNATE_SCREEN));
        assert!(written.contains(SHOW_CURSOR));
    }

    #[test]
    fn raw_mode_failure_still_leaves_alternate_screen() {
        let mut out = Vec::new();
        let err = restore(&mut out, || Err(io::Error::new(io::ErrorKind::Other, "tty gone"))).unwrap_err();

        assert_eq!(err.to_string(), "tty gone");
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(LEAVE_ALTERNATE_SCREEN));
        assert!(written.contains(SHOW_CURSOR));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn write_failure_still_disables_raw_mode() {
        let mut raw_disabled = false;
        let err = restore(&mut BrokenPipe, || {
            raw_disabled = true;
            Ok(())
        })
        .unwrap_err();

        assert!(raw_disabled);
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn enter_failure_is_reported() {
        assert!(enter(&mut BrokenPipe).is_err());
    }
}
