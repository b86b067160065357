//! Paged output for long listings
//!
//! `log` and `global-log` can print the whole history. When stdout is a terminal their
//! output is collected into a `minus` pager, which the binary shows once the command
//! has finished writing.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// `io::Write` sink feeding a [`Pager`]
///
/// ```ignore
/// let pager = Pager::new();
/// let repository = Repository::new(&pwd, Box::new(PagerWriter::new(pager.clone())))?;
/// repository.log()?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    /// Paging is on when stdout is a terminal and `NO_PAGER` is unset
    pub fn should_page() -> bool {
        std::env::var_os("NO_PAGER").is_none() && io::stdout().is_terminal()
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // invalid UTF-8 is replaced rather than rejected
        self.pager
            .push_str(String::from_utf8_lossy(buf))
            .map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
