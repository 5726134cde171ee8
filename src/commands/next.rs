use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::Store;

pub fn run(root: &Path, format: Format) -> Result<()> {
    let store = Store::open(root)?;
    let registry = store.load();

    if let Some(task) = registry.next_executable() {
        output::print_task(task, format)?;
    } else if format == Format::Json {
        println!("null");
    } else {
        println!("No executable tasks");
    }
    Ok(())
}
