//! Rendering through the printer with failures captured as [`Code`].

use codemark_syntax::{Printer, RenderResult};

use super::Builder;
use crate::models::Code;

impl Builder {
    /// Print into the scratch buffer. A printer failure is returned as a
    /// `Code` whose text is the error message, for the caller to hand back
    /// in place of the rendering.
    pub(super) fn render(
        &mut self,
        what: &str,
        print: impl FnOnce(&Printer<'_>, &mut String) -> RenderResult,
    ) -> Result<(), Code> {
        let printer = Printer::new(self.options.printer).with_file_set(&self.fset);
        print(&printer, &mut self.buf).map_err(|err| {
            log::warn!("cannot render {what}: {err}");
            Code::from_error(&err)
        })
    }
}
