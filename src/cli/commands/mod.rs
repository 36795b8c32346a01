pub mod day;
pub mod settings;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [day::definitions(), settings::definitions(), system::definitions()];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
