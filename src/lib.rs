//! The `Aggregate` type in the `aggregate` module is the kernel of the `dups`
//! program. The `args` module parses the command line, the `operands` module
//! hides the details of opening and decoding input files, and the `report`
//! module formats the result.
//!
//! The `lissajous` and `server` modules back the second binary, which draws
//! animated Lissajous figures as GIFs, either once or per HTTP request.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

use std::path::PathBuf;

pub mod aggregate;
pub mod args;
pub mod help;
pub mod lissajous;
pub mod logging;
pub mod operands;
pub mod report;
pub mod server;
pub mod styles;

use crate::aggregate::Aggregate;
use crate::operands::Sources;

/// Reads each file in `paths`, in order, into a fresh `Aggregate`.
///
/// A file that can't be opened contributes nothing: `on_open_error` is called
/// with the error (which names the file) and the run continues with the next
/// path.
#[must_use]
pub fn find_duplicates(
    paths: &[PathBuf],
    mut on_open_error: impl FnMut(&anyhow::Error),
) -> Aggregate {
    let mut aggregate = Aggregate::default();
    for source in Sources::from(paths.to_vec()) {
        match source {
            Ok(source) => {
                let id = aggregate.add_source(source.name());
                aggregate.process_source(id, source.into_reader());
            }
            Err(e) => on_open_error(&e),
        }
    }
    aggregate
}
