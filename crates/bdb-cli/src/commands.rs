use std::sync::Arc;

use anyhow::Context;
use bdb_store::{Driver, Options, TracingLogger};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let driver = open(config)?;
    match cli.command {
        Command::Write(args) => cmd_write(&driver, args),
        Command::Read(args) => cmd_read(&driver, args),
        Command::ReadAll(args) => cmd_read_all(&driver, args),
        Command::Update(args) => cmd_update(&driver, args),
        Command::Delete(args) => cmd_delete(&driver, args),
        Command::Demo => cmd_demo(&driver),
    }
}

fn open(config: &CliConfig) -> anyhow::Result<Driver> {
    let logger = Arc::new(TracingLogger::new(config.log_level));
    Driver::new(&config.root, Some(Options::with_logger(logger)))
        .with_context(|| format!("opening database at {}", config.root.display()))
}

fn parse_object(json: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(json).context("payload is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "payload must be a JSON object");
    Ok(value)
}

fn cmd_write(driver: &Driver, args: WriteArgs) -> anyhow::Result<()> {
    let value = parse_object(&args.json)?;
    let id = driver.write(&args.collection, &value)?;
    println!("{} {}", "✓".green().bold(), id.to_string().cyan());
    Ok(())
}

fn cmd_read(driver: &Driver, args: ReadArgs) -> anyhow::Result<()> {
    let record: Value = driver.read(&args.collection, &args.id)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_read_all(driver: &Driver, args: ReadAllArgs) -> anyhow::Result<()> {
    let records = driver.read_all(&args.collection)?;
    for payload in &records {
        print!("{payload}");
    }
    eprintln!("{} record(s) in {}", records.len(), args.collection.bold());
    Ok(())
}

fn cmd_update(driver: &Driver, args: UpdateArgs) -> anyhow::Result<()> {
    let value = parse_object(&args.json)?;
    driver.update(&args.collection, &args.id, &value)?;
    println!("{} Updated {}", "✓".green().bold(), args.id.cyan());
    Ok(())
}

fn cmd_delete(driver: &Driver, args: DeleteArgs) -> anyhow::Result<()> {
    driver.delete(&args.collection, &args.resource)?;
    println!("{} Deleted {}", "✓".green().bold(), args.resource.cyan());
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

fn employee(name: &str, age: u32, company: &str, city: &str, state: &str, country: &str) -> Employee {
    Employee {
        name: name.into(),
        age,
        contact: "23344333".into(),
        company: company.into(),
        address: Address {
            city: city.into(),
            state: state.into(),
            country: country.into(),
            pincode: "410013".into(),
        },
    }
}

pub fn sample_employees() -> Vec<Employee> {
    vec![
        employee("John", 23, "Myrl Tech", "bangalore", "karnataka", "india"),
        employee("Paul", 25, "Google", "san francisco", "california", "USA"),
        employee("Robert", 27, "Microsoft", "bangalore", "karnataka", "india"),
        employee("Vince", 29, "Facebook", "bangalore", "karnataka", "india"),
        employee("Neo", 31, "Remote-Teams", "bangalore", "karnataka", "india"),
        employee("Albert", 32, "Dominate", "bangalore", "karnataka", "india"),
    ]
}

/// Seed, read, update and re-read. Returns the record before and after.
pub fn run_demo(driver: &Driver) -> anyhow::Result<(Employee, Employee)> {
    let mut ids = Vec::new();
    for e in sample_employees() {
        ids.push(driver.write("employees", &e)?);
    }
    let first = ids.first().context("no employees written")?;
    tracing::info!(count = ids.len(), "seeded employees");

    let before: Employee = driver.read("employees", first)?;

    // Only the pincode is non-blank, so nothing else changes.
    let mut patch = Employee::default();
    patch.address.pincode = "515671".into();
    driver.update("employees", first, &patch)?;

    let after: Employee = driver.read("employees", first)?;
    Ok((before, after))
}

fn cmd_demo(driver: &Driver) -> anyhow::Result<()> {
    let (before, after) = run_demo(driver)?;
    println!("{} Seeded employees in {}", "✓".green().bold(), driver.root().display());
    println!("{} {:?}", "Before update:".bold(), before);
    println!("{} {:?}", "After update: ".bold(), after);
    Ok(())
}
