//! smartconvert - unit conversion and calculators on the command line
//!
//! Usage:
//!   smartconvert convert distance 5 --from km --to mi
//!   smartconvert query "100 km to mi"
//!   smartconvert molar-mass "CuSO4·5H2O"
//!   smartconvert loan 250000 6.5 30
//!   smartconvert --server               # JSON-RPC on stdin/stdout

mod rates;
mod server;

use std::io::IsTerminal;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use smartconvert_core::chem::{self, PhInput};
use smartconvert_core::electrical::{OhmsLaw, Quantity, Reading};
use smartconvert_core::finance::{self, Projection};
use smartconvert_core::{
    format_value, parse_query, Converter, Dimension, FileHistory, HistorySink, NoHistory, Output,
    Preferences, RateBook,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "smartconvert")]
#[command(about = "Unit conversion, chemistry, electrical and finance calculators", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Run as a JSON-RPC 2.0 server on stdin/stdout
    #[arg(long)]
    server: bool,

    /// Decimal places in results (2-8)
    #[arg(short, long, global = true)]
    precision: Option<u32>,

    /// Do not record conversions to history
    #[arg(long, global = true)]
    no_history: bool,

    /// Use built-in exchange rates instead of fetching
    #[arg(long, global = true)]
    offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value between two units of a dimension
    Convert {
        /// Dimension key, e.g. distance, fuel-economy, currency
        dimension: Dimension,
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Source unit (default: preferred or dimension default)
        #[arg(short, long)]
        from: Option<String>,
        /// Target unit
        #[arg(short, long)]
        to: Option<String>,
    },
    /// One-line conversion, e.g. "100 km to mi"
    Query {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Molar mass of a chemical formula
    MolarMass { formula: String },
    /// Solve pH, pOH, [H+] and [OH-] from one known value
    Ph {
        /// Known quantity: ph, poh, h, oh
        input: String,
        value: f64,
    },
    /// Solve Ohm's law for the missing quantity
    Ohm {
        /// Quantity to solve for: v, i or r
        #[arg(long)]
        solve: String,
        #[arg(long, allow_hyphen_values = true)]
        voltage: Option<f64>,
        #[arg(long, default_value = "V")]
        voltage_unit: String,
        #[arg(long, allow_hyphen_values = true)]
        current: Option<f64>,
        #[arg(long, default_value = "A")]
        current_unit: String,
        #[arg(long, allow_hyphen_values = true)]
        resistance: Option<f64>,
        #[arg(long, default_value = "Ohm")]
        resistance_unit: String,
        /// Unit for the result
        #[arg(long)]
        unit: Option<String>,
    },
    /// Loan payment and amortization
    Loan {
        principal: f64,
        /// Annual interest rate in percent
        rate: f64,
        years: u32,
        /// Print every month instead of a yearly summary
        #[arg(long)]
        schedule: bool,
    },
    /// Investment growth with monthly contributions
    Invest {
        initial: f64,
        monthly: f64,
        years: f64,
        /// Expected annual return in percent
        rate: f64,
    },
    /// Retirement savings projection
    Retire {
        current_age: u32,
        retirement_age: u32,
        savings: f64,
        monthly: f64,
        rate: f64,
    },
    /// Monthly saving needed to reach a goal
    Savings {
        target: f64,
        initial: f64,
        years: f64,
        rate: f64,
    },
    /// List dimensions, or the units of one dimension
    Units { dimension: Option<Dimension> },
    /// Quick examples of a dimension
    Examples { dimension: Dimension },
    /// Show or clear conversion history
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Show exchange rates against USD
    Rates {
        /// Fetch fresh rates, ignoring the cache
        #[arg(long)]
        refresh: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SMARTCONVERT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Flags every subcommand sees
#[derive(Debug, Clone, Copy)]
struct Opts {
    offline: bool,
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let opts = Opts {
        offline: args.offline,
        json: args.json,
    };

    let mut prefs = Preferences::default_path()
        .map(|path| Preferences::load(&path))
        .unwrap_or_default();
    if let Some(precision) = args.precision {
        prefs.set_precision(precision);
    }
    if args.no_history {
        prefs.save_history = false;
    }

    if args.server {
        let mut state = server::State::new(prefs, rates::load(opts.offline), opts.offline);
        return Ok(server::run_server(&mut state)?);
    }

    let Some(command) = args.command else {
        if std::io::stdin().is_terminal() {
            eprintln!("Usage: smartconvert <COMMAND>");
            eprintln!("       smartconvert --server");
            eprintln!("Run 'smartconvert --help' for the list of commands.");
            std::process::exit(1);
        }
        // Piped input: one query per line
        let rates = rates::load(opts.offline);
        for line in std::io::stdin().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                print_query(&line, &prefs, &rates);
            }
        }
        return Ok(());
    };

    run(command, &prefs, opts)
}

fn history_sink(prefs: &Preferences) -> Box<dyn HistorySink> {
    if !prefs.save_history {
        return Box::new(NoHistory);
    }
    match FileHistory::open_default() {
        Some(history) => Box::new(history),
        None => Box::new(NoHistory),
    }
}

/// Rates are only fetched for currency
fn rates_for(dimension: Dimension, offline: bool) -> RateBook {
    match dimension {
        Dimension::Currency => rates::load(offline),
        _ => RateBook::new(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_output(converter: &Converter<'_>) {
    match converter.output() {
        Output::Blank => {}
        output => println!(
            "{} {} = {} {}",
            converter.input().trim(),
            converter.from_unit(),
            output.text(),
            converter.to_unit()
        ),
    }
    if let Some(info) = converter.rate_info() {
        println!("{info}");
    }
    if let Some(hint) = converter.hint() {
        eprintln!("hint: {hint}");
    }
}

fn print_query(line: &str, prefs: &Preferences, rates: &RateBook) {
    let result = parse_query(line).and_then(|q| q.convert(rates).map(|c| (q, c)));
    match result {
        Ok((q, conversion)) => {
            let text = match conversion.as_f64() {
                Some(v) => format_value(v, prefs.precision()),
                None => conversion.sentinel().unwrap_or_default().to_string(),
            };
            println!("{line:<40} = {text} {}", q.to_unit);
        }
        Err(e) => println!("{line:<40} ! {e}"),
    }
}

fn run(command: Command, prefs: &Preferences, opts: Opts) -> Result<()> {
    match command {
        Command::Convert {
            dimension,
            value,
            from,
            to,
        } => {
            let rates = rates_for(dimension, opts.offline);
            let history = history_sink(prefs);
            let mut converter = Converter::new(dimension, prefs, &rates, history.as_ref());
            if let Some(from) = &from {
                converter.set_from_unit(from)?;
            }
            if let Some(to) = &to {
                converter.set_to_unit(to)?;
            }
            converter.set_input(value);
            converter.convert()?;
            if opts.json {
                print_json(converter.output())?;
            } else {
                print_output(&converter);
            }
        }
        Command::Query { text } => {
            let query = parse_query(&text.join(" "))?;
            let rates = rates_for(query.dimension, opts.offline);
            let history = history_sink(prefs);
            let mut converter = Converter::new(query.dimension, prefs, &rates, history.as_ref());
            converter.set_from_unit(query.from_unit)?;
            converter.set_to_unit(query.to_unit)?;
            converter.set_input(query.value.to_string());
            converter.convert()?;
            if opts.json {
                return print_json(&serde_json::json!({
                    "query": query,
                    "output": converter.output(),
                }));
            }
            print_output(&converter);
        }
        Command::MolarMass { formula } => {
            let mass = chem::molar_mass(&formula)?;
            if opts.json {
                return print_json(&mass);
            }
            for e in &mass.breakdown {
                println!(
                    "{:<3} {:>4} × {:>10} = {:>10.3}",
                    e.element, e.count, e.atomic_mass, e.mass
                );
            }
            println!("Molar mass of {formula}: {:.3} g/mol", mass.total);
        }
        Command::Ph { input, value } => {
            let kind =
                PhInput::parse(&input).ok_or_else(|| anyhow!("unknown pH input '{input}' (ph, poh, h, oh)"))?;
            let result = chem::ph::solve(kind, value)?;
            if opts.json {
                return print_json(&result);
            }
            println!("{result}");
            println!("Solution is {:?}", result.acidity());
            if result.clamped {
                eprintln!("note: pH was clamped to the 0-14 scale");
            }
        }
        Command::Ohm {
            solve,
            voltage,
            voltage_unit,
            current,
            current_unit,
            resistance,
            resistance_unit,
            unit,
        } => {
            let unknown = Quantity::parse(&solve).ok_or_else(|| anyhow!("unknown quantity '{solve}' (v, i, r)"))?;
            let law = OhmsLaw {
                unknown,
                voltage: voltage.map(|v| Reading::new(v, voltage_unit)),
                current: current.map(|v| Reading::new(v, current_unit)),
                resistance: resistance.map(|v| Reading::new(v, resistance_unit)),
                result_unit: unit,
            };
            let result = law.solve()?;
            if opts.json {
                return print_json(&result);
            }
            println!("{} = {result}", unknown.name());
            println!("power = {} W", format_value(result.power_watts, 6));
        }
        Command::Loan {
            principal,
            rate,
            years,
            schedule,
        } => {
            let loan = finance::amortize(principal, rate, years)?;
            if opts.json {
                return print_json(&loan);
            }
            println!("Monthly payment: {:.2}", loan.monthly_payment);
            println!("Total payment:   {:.2}", loan.total_payment);
            println!("Total interest:  {:.2}", loan.total_interest);
            println!();
            if schedule {
                println!("{:>5} {:>12} {:>12} {:>14}", "month", "interest", "principal", "balance");
                for p in &loan.schedule {
                    println!(
                        "{:>5} {:>12.2} {:>12.2} {:>14.2}",
                        p.month, p.interest, p.principal, p.remaining_balance
                    );
                }
            } else {
                println!("{:>4} {:>14} {:>16}", "year", "balance", "interest paid");
                for p in loan.schedule.iter().filter(|p| p.month % 12 == 0) {
                    println!(
                        "{:>4} {:>14.2} {:>16.2}",
                        p.year, p.remaining_balance, p.total_interest_paid
                    );
                }
            }
        }
        Command::Invest {
            initial,
            monthly,
            years,
            rate,
        } => {
            let projection = finance::project_growth(initial, monthly, years, rate)?;
            if opts.json {
                return print_json(&projection);
            }
            print_projection(&projection);
        }
        Command::Retire {
            current_age,
            retirement_age,
            savings,
            monthly,
            rate,
        } => {
            let projection =
                finance::project_retirement(current_age, retirement_age, savings, monthly, rate)?;
            if opts.json {
                return print_json(&projection);
            }
            println!("Savings at age {retirement_age}:");
            print_projection(&projection);
        }
        Command::Savings {
            target,
            initial,
            years,
            rate,
        } => {
            let plan = finance::plan_savings(target, initial, years, rate)?;
            if opts.json {
                return print_json(&plan);
            }
            println!("Monthly saving:  {:.2}", plan.monthly_saving);
            println!("Total saved:     {:.2}", plan.total_saved());
            println!("Interest earned: {:.2}", plan.interest_earned());
            println!();
            print_projection(&plan.projection);
        }
        Command::Units { dimension } => match dimension {
            Some(d) => {
                if opts.json {
                    return print_json(&d.units());
                }
                for unit in d.units() {
                    println!("{:<10} {unit}", unit.id);
                }
            }
            None => {
                for d in Dimension::all() {
                    println!("{:<14} {}", d.key(), d.name());
                }
            }
        },
        Command::Examples { dimension } => {
            if dimension.examples().is_empty() {
                println!("No quick examples for {dimension}");
            }
            for ex in dimension.examples() {
                println!("{:<16} {} {} to {}", ex.label, ex.value, ex.from_unit, ex.to_unit);
            }
        }
        Command::History { clear } => {
            let history = FileHistory::open_default().ok_or_else(|| anyhow!("no config directory"))?;
            if clear {
                history.clear();
                println!("History cleared");
                return Ok(());
            }
            let entries = history.entries();
            if opts.json {
                return print_json(&entries);
            }
            for e in entries {
                println!(
                    "{:<14} {} {} = {} {}",
                    e.dimension, e.from_value, e.from_unit, e.to_value, e.to_unit
                );
            }
        }
        Command::Rates { refresh } => {
            let book = if refresh && !opts.offline {
                rates::fetch()
            } else {
                rates::load(opts.offline)
            };
            let Some(table) = book.rates() else {
                bail!("exchange rates unavailable");
            };
            for unit in Dimension::Currency.units() {
                if let Some(rate) = table.get(unit.id) {
                    println!("{:<4} {rate:>12.4}", unit.id);
                }
            }
        }
    }
    Ok(())
}

fn print_projection(projection: &Projection) {
    println!("{:>4} {:>14} {:>14} {:>14}", "year", "value", "contributed", "gains");
    for p in &projection.points {
        println!(
            "{:>4} {:>14.2} {:>14.2} {:>14.2}",
            p.year, p.value, p.contributions, p.gains
        );
    }
    println!();
    println!("Final value:         {:.2}", projection.final_value);
    println!("Total contributions: {:.2}", projection.total_contributions);
    println!("Total gains:         {:.2}", projection.total_gains);
}
