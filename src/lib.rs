//! Batch removal of owner-password protection from PDF files.
//!
//! A run walks an input tree, mirrors its directories under an output root,
//! tries an ordered list of candidate owner passwords against every `.pdf`
//! it finds and finally prunes output directories that stayed empty.

pub mod batch;
pub mod cleanup;
pub mod config;
pub mod console;
pub mod decrypt;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod paths;
pub mod walker;

pub use batch::{Batch, Outcome, Summary};
pub use config::{Cli, Settings};
pub use console::Console;
pub use decrypt::{DecryptError, Decryptor, LopdfDecryptor};
pub use error::{Error, Result};
pub use ledger::{ErrorLedger, Failure};

/// Runs a whole batch: resolve roots, walk, decrypt, then clean up.
pub fn run<D: Decryptor>(
    settings: &Settings,
    decryptor: D,
    console: &mut Console,
) -> Result<Summary> {
    let output_root = paths::resolve_output_root(&settings.output)?;
    let input_root = paths::resolve_input_root(&settings.input)?;

    let files = walker::walk(&input_root, &output_root)?;
    console.start(files.len() as u64);

    let summary = Batch::new(
        &input_root,
        &output_root,
        &settings.passwords,
        decryptor,
        console,
    )
    .run(&files)?;
    console.finish();

    if settings.cleanup {
        for dir in cleanup::remove_empty_dirs(&output_root)? {
            console.removed(&dir);
        }
    }

    Ok(summary)
}
