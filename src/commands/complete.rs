use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::model::parse_name;
use crate::output::{self, Format};
use crate::store::Store;

/// Complete `name` and persist. A failed save is reported after the outcome
/// is printed; the completion itself is not undone.
pub fn run(root: &Path, name: String, format: Format) -> Result<()> {
    let name = parse_name(&name)?;
    let store = Store::open(root)?;
    let mut registry = store.load();
    let completion = registry.complete(&name)?;

    let saved = store.save(&registry);
    if let Err(e) = &saved {
        warn!(task = %name, error = %e, "completion not persisted");
    }

    output::print_completion(&completion, saved.is_ok(), format)?;
    saved
}
