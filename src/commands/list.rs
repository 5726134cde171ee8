use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::Store;

pub fn run(root: &Path, unordered: bool, format: Format) -> Result<()> {
    let store = Store::open(root)?;
    let registry = store.load();
    let tasks: Vec<_> = registry.list_pending(!unordered).collect();
    output::print_tasks(&tasks, format)
}
