//! Keys command - list the assessment key registry

use crate::metrics::KeyRegistry;
use anyhow::Result;

pub fn run(registry: &KeyRegistry) -> Result<()> {
    print!("{}", render(registry));
    Ok(())
}

fn render(registry: &KeyRegistry) -> String {
    let width = registry.names().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for (key, points) in registry.iter() {
        out.push_str(&format!("{:<width$}  {}\n", key.as_str(), points, width = width));
    }
    out
}
