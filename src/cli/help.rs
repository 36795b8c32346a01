use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let width = registry.names().map(str::len).max().unwrap_or(0);
    for entry in registry.list() {
        output::detail(format!("  {:<width$}  {}", entry.name, entry.description));
    }
    output::detail("");
    output::info("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::detail(format!("  {}", entry.description));
    output::detail(format!("  usage: {}", entry.usage));
}
