//! Behavior listing command

use super::project_registry;
use anyhow::Result;

pub fn run(project: &str) -> Result<()> {
    let registry = project_registry(project)?;

    for name in registry.qualified_names() {
        let Some(behavior) = registry.create(name) else {
            continue;
        };

        let duplicates = if behavior.duplicates_allowed() {
            ""
        } else {
            " (one per object)"
        };
        println!("{}{}", name, duplicates);

        for decl in behavior.fields() {
            let default = behavior
                .field(decl.name)
                .and_then(|value| value.to_literal().ok())
                .unwrap_or_default();
            println!(
                "  {}: {} = {}  {}",
                decl.name,
                decl.kind.type_name(),
                default,
                decl.description
            );
        }
    }

    Ok(())
}
