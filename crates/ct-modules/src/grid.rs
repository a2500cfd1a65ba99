//! Build a grid instance of turntables from a [`GridSpec`].

use ct_core::GridSpec;
use ct_sim::World;
use tracing::info;

use crate::{ModuleResult, TurnTable, TurnTableSpec};

/// Place one turntable per grid cell under the world origin, named
/// `t_<x>_<y>`, in column-major order.
pub fn build_grid(world: &mut World, grid: &GridSpec) -> ModuleResult<Vec<TurnTable>> {
    grid.validate()?;
    let spec = TurnTableSpec {
        width:          grid.module_width,
        belt_speed:     grid.belt_speed,
        rotation_speed: grid.rotation_speed,
    };
    let origin = world.origin();
    let mut modules = Vec::with_capacity(grid.module_count());
    for (x, y) in grid.cells() {
        modules.push(TurnTable::new(
            world,
            origin,
            GridSpec::cell_name(x, y),
            grid.cell_position(x, y),
            0.0,
            spec.clone(),
        )?);
    }
    info!(
        columns = grid.columns,
        rows = grid.rows,
        modules = modules.len(),
        nodes = world.tree.len(),
        "grid built"
    );
    Ok(modules)
}

/// Module called `name`, if any.
pub fn find_module<'a>(modules: &'a [TurnTable], name: &str) -> Option<&'a TurnTable> {
    modules.iter().find(|m| m.name == name)
}
