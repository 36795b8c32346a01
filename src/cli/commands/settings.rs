//! Commands that edit the persistent settings. Every change is written
//! straight back to disk.

use crate::cli::context::{parse_amount, parse_count, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::format::format_amount;
use crate::settings::{CostKind, PriceKind};

const COSTS_USAGE: &str = "usage: costs [labor|wood|misc-per-bag <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "price",
            "Set a distributor's unit price",
            "price <name> <value>",
            cmd_price,
        ),
        CommandEntry::new(
            "item-price",
            "Set or add a side item's unit price",
            "item-price <item> <value>",
            cmd_item_price,
        ),
        CommandEntry::new(
            "costs",
            "Show or set fixed daily costs",
            "costs [labor|wood|misc-per-bag <value>]",
            cmd_costs,
        ),
        CommandEntry::new(
            "units-per-bag",
            "Set how many units one flour bag yields",
            "units-per-bag <value>",
            cmd_units_per_bag,
        ),
        CommandEntry::new(
            "roster",
            "Replace the distributor roster",
            "roster <name, name, ...>",
            cmd_roster,
        ),
        CommandEntry::new(
            "settings",
            "Show the stored settings",
            "settings",
            cmd_settings,
        ),
    ]
}

fn cmd_price(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, value_raw) = match args {
        [name, value] => (name.trim(), *value),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: price <name> <value>".into(),
            ))
        }
    };
    let on_roster = context
        .store
        .config()
        .distributors
        .iter()
        .any(|existing| existing.as_str() == name);
    if !on_roster {
        return Err(CommandError::InvalidArguments(format!(
            "unknown distributor `{}`. Use `roster` to manage the list.",
            name
        )));
    }
    let value = parse_amount(value_raw, "value")?;
    context.store.set_price(PriceKind::Distributor, name, value)?;
    output::success(format!(
        "Price for `{}` set to {}.",
        name,
        format_amount(value)
    ));
    Ok(())
}

fn cmd_item_price(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (item, value_raw) = match args {
        [item, value] => (item.trim(), *value),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: item-price <item> <value>".into(),
            ))
        }
    };
    if item.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: item-price <item> <value>".into(),
        ));
    }
    let value = parse_amount(value_raw, "value")?;
    let added = !context.store.config().other_prices.contains_key(item);
    context.store.set_price(PriceKind::OtherItem, item, value)?;
    context.sync_day();
    if added {
        output::success(format!("Added item `{}` at {}.", item, format_amount(value)));
    } else {
        output::success(format!(
            "Price for `{}` set to {}.",
            item,
            format_amount(value)
        ));
    }
    Ok(())
}

fn cmd_costs(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        let costs = &context.store.config().costs;
        output::section("Fixed daily costs");
        output::detail(format!("  Labor:        {}", format_amount(costs.labor)));
        output::detail(format!("  Wood:         {}", format_amount(costs.wood)));
        output::detail(format!(
            "  Misc per bag: {}",
            format_amount(costs.misc_per_bag)
        ));
        return Ok(());
    }

    let (kind_raw, value_raw) = match args {
        [kind, value] => (*kind, *value),
        _ => return Err(CommandError::InvalidArguments(COSTS_USAGE.into())),
    };
    let kind = match kind_raw.to_lowercase().as_str() {
        "labor" => CostKind::Labor,
        "wood" => CostKind::Wood,
        "misc-per-bag" | "misc_per_bag" | "misc" => CostKind::MiscPerBag,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown cost `{}`. {}",
                other, COSTS_USAGE
            )))
        }
    };
    let value = parse_amount(value_raw, "value")?;
    context.store.set_cost(kind, value)?;
    output::success("Costs updated.");
    Ok(())
}

fn cmd_units_per_bag(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = match args {
        [value] => *value,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: units-per-bag <value>".into(),
            ))
        }
    };
    let value = parse_count(raw, "units-per-bag")?;
    if value == 0 {
        return Err(CommandError::InvalidArguments(
            "units-per-bag must be greater than 0".into(),
        ));
    }
    context.store.set_units_per_bag(value)?;
    output::success(format!("Units per bag set to {}.", value));
    Ok(())
}

fn cmd_roster(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let joined = args.join(" ");
    let names: Vec<&str> = joined
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Err(CommandError::InvalidArguments(
            "roster needs at least one name: roster <name, name, ...>".into(),
        ));
    }
    context.store.update_roster(names)?;
    context.sync_day();
    let roster = context.store.config().distributors.join(", ");
    output::success(format!("Roster updated: {}.", roster));
    Ok(())
}

fn cmd_settings(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = context.store.config();
    output::section("Settings");
    output::detail(format!("  Units per bag: {}", config.units_per_bag));
    output::detail(format!(
        "  Costs: labor {} | wood {} | misc per bag {}",
        format_amount(config.costs.labor),
        format_amount(config.costs.wood),
        format_amount(config.costs.misc_per_bag),
    ));
    output::detail(format!("  Distributors ({}):", config.distributors.len()));
    for name in &config.distributors {
        output::detail(format!(
            "    {} @ {}",
            name,
            format_amount(config.price_for(name))
        ));
    }
    output::detail(format!("  Side items ({}):", config.other_prices.len()));
    for (item, price) in &config.other_prices {
        output::detail(format!("    {} @ {}", item, format_amount(*price)));
    }
    output::detail(format!("  File: {}", context.store.path().display()));
    Ok(())
}
