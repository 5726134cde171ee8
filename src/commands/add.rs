use std::path::Path;

use crate::error::Result;
use crate::model::{parse_deadline, parse_name, parse_priority};
use crate::output::{self, Format};
use crate::store::Store;

/// Validate raw input, add the task and persist. Nothing is written unless
/// every check passes.
pub fn run(
    root: &Path,
    name: String,
    priority: String,
    depends_on: Vec<String>,
    deadline: Option<String>,
    format: Format,
) -> Result<()> {
    let name = parse_name(&name)?;
    let priority = parse_priority(&priority)?;
    let deadline = deadline.as_deref().map(parse_deadline).transpose()?;

    let store = Store::open(root)?;
    let mut registry = store.load();
    let added = registry.add(&name, priority, depends_on, deadline)?;
    store.save(&registry)?;

    output::print_added(&added, format)
}
