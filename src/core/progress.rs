//! Adapter bridging core progress reporting to the command layer.

use super::ProgressSink;
use crate::output::Output;

/// Forwards `ProgressSink` calls to an `Output` implementation.
///
/// ```ignore
/// let mut output = CliOutput::default_output();
/// let mut sink = OutputSink(&mut output);
/// let result = core::start::execute(&params, &config, &git, &mut prompter, &mut sink)?;
/// ```
pub struct OutputSink<'a>(pub &'a mut dyn Output);

impl ProgressSink for OutputSink<'_> {
    fn on_step(&mut self, msg: &str) {
        self.0.step(msg);
    }

    fn on_warning(&mut self, msg: &str) {
        self.0.warning(msg);
    }

    fn on_debug(&mut self, msg: &str) {
        self.0.debug(msg);
    }
}
