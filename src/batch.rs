//! Parallel generation of independent tones
//!
//! Every request writes its own file and shares no state with the others, so
//! the batch is split across the rayon thread pool one file per task.

use crate::{Result, ToneGenerator, ToneRequest};
use log::debug;
use rayon::prelude::*;

/// Generate every request in `requests`, in parallel
///
/// Output files are byte-identical to generating the requests one by one.
/// Requests should name distinct paths; two tasks writing the same file race.
///
/// # Errors
///
/// Returns the first error encountered. Files from requests that already
/// finished are left in place.
pub fn generate_batch(generator: &ToneGenerator, requests: &[ToneRequest]) -> Result<()> {
    debug!("Generating {} tones across the rayon pool", requests.len());
    requests
        .par_iter()
        .try_for_each(|request| generator.generate(request))
}
