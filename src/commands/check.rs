use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::Store;

pub fn run(root: &Path, format: Format) -> Result<()> {
    let store = Store::open(root)?;
    let registry = store.load();
    output::print_evaluation(&registry.evaluate_all(), format)
}
