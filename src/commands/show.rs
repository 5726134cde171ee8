use std::path::Path;

use crate::error::{Result, TaskqError};
use crate::model::parse_name;
use crate::output::{self, Format};
use crate::store::Store;

pub fn run(root: &Path, name: String, format: Format) -> Result<()> {
    let name = parse_name(&name)?;
    let store = Store::open(root)?;
    let registry = store.load();
    let dependents = registry.dependents_of(&name);

    if let Some(task) = registry.get(&name) {
        let executability = registry.executability(&name)?;
        output::print_pending_status(task, &executability, &dependents, format)
    } else if registry.is_completed(&name) {
        output::print_completed_status(&name, &dependents, format)
    } else {
        Err(TaskqError::NotFound(name))
    }
}
