//! Commands that record and show the current day.

use crate::cli::context::{parse_amount, parse_count, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::format::{format_amount, format_units};
use crate::report::{BalanceStatus, DailySummary, DistributorLine};

const DELIVER_USAGE: &str = "usage: deliver <name> <delivered> <returned> <paid>";
const SALE_USAGE: &str = "usage: sale <item> <quantity>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("summary", "Show the day sheet", "summary", cmd_summary),
        CommandEntry::new(
            "production",
            "Record flour bags baked today",
            "production [bags]",
            cmd_production,
        ),
        CommandEntry::new(
            "deliver",
            "Record a distributor's deliveries, returns, and payment",
            "deliver [name] [delivered] [returned] [paid]",
            cmd_deliver,
        ),
        CommandEntry::new(
            "sale",
            "Record side-item sales",
            "sale [item] [quantity]",
            cmd_sale,
        ),
        CommandEntry::new(
            "distributors",
            "List the roster with today's movement",
            "distributors",
            cmd_distributors,
        ),
    ]
}

fn status_label(status: BalanceStatus) -> &'static str {
    match status {
        BalanceStatus::Outstanding => "outstanding",
        BalanceStatus::Settled => "settled",
    }
}

fn print_distributor_line(line: &DistributorLine) {
    output::detail(format!(
        "  {} | delivered {} returned {} net {} @ {} | due {} paid {} balance {} ({})",
        line.name,
        line.delivered,
        line.returned,
        format_units(line.net),
        format_amount(line.unit_price),
        format_amount(line.total_due),
        format_amount(line.paid),
        format_amount(line.balance),
        status_label(line.status),
    ));
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = DailySummary::compute(context.store.config(), &context.day);

    output::section(format!("Day sheet {}", context.day.date));
    output::detail(format!("  Flour bags:          {}", context.day.flour_bags));
    output::detail(format!(
        "  Expected production: {}",
        format_units(summary.expected_production)
    ));
    output::detail(format!(
        "  Units sold:          {}",
        format_units(summary.units_sold)
    ));
    if summary.deficit > 0 {
        output::warning(format!(
            "Shortage of {} units (estimated loss {})",
            format_units(summary.deficit),
            format_amount(summary.loss_value)
        ));
    } else if summary.deficit < 0 {
        output::info(format!(
            "Sold {} units beyond expected production.",
            format_units(-summary.deficit)
        ));
    }

    output::section("Money");
    output::detail(format!(
        "  Revenue (distributors): {}",
        format_amount(summary.revenue_distributors)
    ));
    output::detail(format!(
        "  Revenue (other items):  {}",
        format_amount(summary.revenue_other)
    ));
    output::detail(format!(
        "  Total revenue:          {}",
        format_amount(summary.total_revenue)
    ));
    output::detail(format!(
        "  Total expenses:         {}",
        format_amount(summary.total_expenses)
    ));
    output::detail(format!(
        "  Net profit:             {}",
        format_amount(summary.net_profit)
    ));
    output::detail(format!(
        "  Cash collected:         {}",
        format_amount(summary.total_cash_collected)
    ));
    output::detail(format!(
        "  New debt today:         {}",
        format_amount(summary.new_debt_today)
    ));

    output::section("Distributors");
    for line in &summary.lines {
        print_distributor_line(line);
    }
    Ok(())
}

fn cmd_production(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let bags = match args.first() {
        Some(raw) => parse_count(raw, "bags")?,
        None if context.can_prompt() => {
            context.prompt_count("Flour bags baked today", context.day.flour_bags)?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: production <bags>".into(),
            ))
        }
    };
    context.day.record_production(bags);
    let summary = DailySummary::compute(context.store.config(), &context.day);
    output::success(format!(
        "Recorded {} flour bags. Expected production: {} units.",
        bags,
        format_units(summary.expected_production)
    ));
    Ok(())
}

fn cmd_deliver(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args.first() {
        Some(raw) => {
            let name = raw.trim();
            let on_roster = context
                .store
                .config()
                .distributors
                .iter()
                .any(|existing| existing.as_str() == name);
            if !on_roster {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown distributor `{}`. Use `distributors` to list the roster.",
                    name
                )));
            }
            name.to_string()
        }
        None if context.can_prompt() => match context.select_distributor("Distributor")? {
            Some(name) => name,
            None => return Ok(()),
        },
        None => return Err(CommandError::InvalidArguments(DELIVER_USAGE.into())),
    };

    let current = context.day.entry(&name).copied().unwrap_or_default();
    let (delivered, returned, paid) = match args.len() {
        0 | 1 if context.can_prompt() => {
            let delivered = context.prompt_count("Units delivered", current.delivered)?;
            let returned = context.prompt_count("Units returned", current.returned)?;
            let paid = context.prompt_amount("Amount paid", current.paid)?;
            (delivered, returned, paid)
        }
        4 => (
            parse_count(args[1], "delivered")?,
            parse_count(args[2], "returned")?,
            parse_amount(args[3], "paid")?,
        ),
        _ => return Err(CommandError::InvalidArguments(DELIVER_USAGE.into())),
    };

    context.day.record_distribution(&name, delivered, returned, paid);

    let summary = DailySummary::compute(context.store.config(), &context.day);
    let line = summary
        .lines
        .iter()
        .find(|line| line.name == name)
        .expect("distributor just recorded should have a line");
    output::success(format!(
        "{}: net {} units, due {}, paid {}, balance {} ({}).",
        line.name,
        format_units(line.net),
        format_amount(line.total_due),
        format_amount(line.paid),
        format_amount(line.balance),
        status_label(line.status),
    ));
    Ok(())
}

fn cmd_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let item = match args.first() {
        Some(raw) => {
            let item = raw.trim();
            if !context.store.config().other_prices.contains_key(item) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown item `{}`. Use `item-price <item> <value>` to add it first.",
                    item
                )));
            }
            item.to_string()
        }
        None if context.can_prompt() => match context.select_item("Side item")? {
            Some(item) => item,
            None => return Ok(()),
        },
        None => return Err(CommandError::InvalidArguments(SALE_USAGE.into())),
    };

    let quantity = match args.get(1) {
        Some(raw) => parse_count(raw, "quantity")?,
        None if context.can_prompt() => {
            context.prompt_count("Quantity sold", context.day.quantity(&item))?
        }
        None => return Err(CommandError::InvalidArguments(SALE_USAGE.into())),
    };

    context.day.record_other_sale(&item, quantity);
    let price = context
        .store
        .config()
        .other_prices
        .get(&item)
        .copied()
        .unwrap_or_default();
    output::success(format!(
        "Recorded {} x {} ({}).",
        quantity,
        item,
        format_amount(f64::from(quantity) * price)
    ));
    Ok(())
}

fn cmd_distributors(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = context.store.config();
    if config.distributors.is_empty() {
        output::warning("The roster is empty. Use `roster <name, name, ...>` to set it.");
        return Ok(());
    }

    output::section("Roster");
    for name in &config.distributors {
        let entry = context.day.entry(name).copied().unwrap_or_default();
        output::detail(format!(
            "  {} @ {} | delivered {} returned {} paid {}",
            name,
            format_amount(config.price_for(name)),
            entry.delivered,
            entry.returned,
            format_amount(entry.paid),
        ));
    }

    let stale: Vec<&str> = config
        .distributor_prices
        .keys()
        .filter(|name| !config.distributors.iter().any(|current| current == *name))
        .map(String::as_str)
        .collect();
    if !stale.is_empty() {
        output::info(format!(
            "Retained price entries for former distributors: {}",
            stale.join(", ")
        ));
    }
    Ok(())
}
