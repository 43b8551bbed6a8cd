use std::path::Path;

use crate::error::Result;

/// The slice of a browser page the application steps need. Elements are
/// addressed by their index in document order for the given kind.
pub trait FormPage {
    fn open(&mut self, url: &str) -> Result<()>;

    /// `name` attribute of every `<input>`, `None` where it is absent.
    fn input_names(&self) -> Result<Vec<Option<String>>>;

    fn type_into_input(&self, index: usize, text: &str) -> Result<()>;

    fn file_input_count(&self) -> Result<usize>;

    fn attach_file(&self, index: usize, path: &Path) -> Result<()>;

    /// Visible text of every `<button>`.
    fn button_labels(&self) -> Result<Vec<String>>;

    fn click_button(&self, index: usize) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

/// Starts a fresh browser session per job.
pub trait PageLauncher: Send {
    fn launch(&self) -> Result<Box<dyn FormPage>>;
}
