pub mod books;
pub mod climate;

use shelf_db::Database;
use shelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) -> anyhow::Result<()> {
    registry.register(books::create_module(db))?;
    registry.register(climate::create_module(db))?;
    Ok(())
}
