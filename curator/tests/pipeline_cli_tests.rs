use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PRODUCTS: &str = "\
product_id,product_name,category,price
P1, lamp ,home,20
P2,desk,office,150
P2,desk copy,office,150
";

const ORDERS: &str = "\
order_id,customer_id,product_id,order_date,quantity,unit_price,total_amount,order_status
1,C1,P1,2024-01-03,-3,10,30,Pandng
2,C2,P2,2024-01-04,1,150,150,Shipped
2,C3,P1,2024-01-05,1,20,20,Shipped
3,,P999,not a date,2,5,10,Pending
4,C4,P1,2024-02-01,2,20,40,Pending
";

const CONFIG: &str = r#"
orders_path: data/orders.csv
products_path: data/products.csv
log_path: logs/pipeline.log
output_dir: output
orders_validation_rules:
  order_id: primary_key
  customer_id: not_null
  product_id: exists_in_products
  order_date: check_date_format
  quantity: positive
  unit_price: positive
  total_amount: multiple_of_quantity_unit_price
  order_status: [Pending, Shipped, Delivered]
products_validation_rules:
  product_id: primary_key
  price: positive
standardization:
  title_case: [product_name]
"#;

/// Throwaway project directory with inputs and a curator.yaml.
struct CuratorTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl CuratorTestEnv {
    fn new(config: &str) -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        fs::create_dir_all(root.join("data"))?;
        fs::write(root.join("data/products.csv"), PRODUCTS)?;
        fs::write(root.join("data/orders.csv"), ORDERS)?;
        fs::write(root.join("curator.yaml"), config)?;
        Ok(Self { _tmp: tmp, root })
    }

    fn curator(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("curator"));
        cmd.current_dir(&self.root);
        cmd.env_remove("CURATOR_OUTPUT_DIR");
        cmd.env_remove("CURATOR_LOG_PATH");
        cmd.env_remove("CURATOR_RUN_DATE");
        cmd
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn read(&self, rel: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path(rel))?)
    }
}

fn run(env: &CuratorTestEnv) -> assert_cmd::assert::Assert {
    env.curator()
        .args(["run", "--run-date", "2024-06-01"])
        .assert()
}

#[test]
fn test_run_writes_all_artifacts() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;

    run(&env)
        .success()
        .stdout(predicate::str::contains("Done in"));

    for rel in [
        "output/cleansed/clean_orders.csv",
        "output/cleansed/clean_products.csv",
        "output/curated/product_performance.csv",
        "output/errors/orders_errors.csv",
        "output/errors/products_errors.csv",
        "output/run_results.json",
        "logs/pipeline.log",
    ] {
        assert!(env.path(rel).is_file(), "missing {}", rel);
    }

    insta::assert_snapshot!(env.read("output/curated/product_performance.csv")?, @r"
    product_id,product_name,total_quantity,total_revenue,rank,total_orders,avg_order_quantity,first_order_date,last_order_date
    P2,Desk,1,150,1,1,1,04-01-2024,04-01-2024
    P1,Lamp,5,70,2,2,2.5,03-01-2024,01-02-2024
    ");
    Ok(())
}

#[test]
fn test_run_logs_every_violation() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;
    run(&env).success();

    let errors = env.read("output/errors/orders_errors.csv")?;
    assert!(errors.contains("1,quantity,positive,-3,3,"));
    assert!(errors.contains("1,order_status,enumerated_values,Pandng,Pending,"));
    assert!(errors.contains("2 (row 3),order_id,primary_key,2,,"));
    assert!(errors.contains("3,product_id,exists_in_products,P999,,"));
    assert!(errors.contains("3,order_date,check_date_format,not a date,01-06-2024,"));

    let products = env.read("output/errors/products_errors.csv")?;
    assert_eq!(products.lines().count(), 2);

    let summary: String = env.read("output/run_results.json")?;
    assert!(summary.contains("\"unmatched_orders\": 1"));
    assert!(summary.contains("\"run_date\": \"2024-06-01\""));

    let log = env.read("logs/pipeline.log")?;
    assert!(log.contains("Validation complete"));
    Ok(())
}

#[test]
fn test_unknown_rule_fails_without_outputs() -> Result<()> {
    let env = CuratorTestEnv::new(&CONFIG.replace("price: positive", "price: is_cheap"))?;

    env.curator()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rule"));

    assert!(!env.path("output").exists());
    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;
    fs::remove_file(env.path("data/orders.csv"))?;

    env.curator()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
    Ok(())
}

#[test]
fn test_check_prints_rule_plan() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;

    env.curator()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists_in_products"))
        .stdout(predicate::str::contains("Configuration is valid"));

    assert!(!env.path("output").exists());
    Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;
    fs::rename(env.path("curator.yaml"), env.path("pipeline.yaml"))?;

    env.curator().arg("check").assert().failure();
    env.curator()
        .args(["check", "--config", "pipeline.yaml"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_clean_removes_outputs() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;
    run(&env).success();
    assert!(env.path("output").exists());

    env.curator().arg("clean").assert().success();
    assert!(!env.path("output").exists());

    env.curator()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"));
    Ok(())
}

#[test]
fn test_inspect_shows_rows() -> Result<()> {
    let env = CuratorTestEnv::new(CONFIG)?;
    let file: &Path = &env.path("data/products.csv");

    env.curator()
        .args(["inspect", "--limit", "1", "--file"])
        .arg(file)
        .assert()
        .success()
        .stdout(predicate::str::contains("product_name"))
        .stdout(predicate::str::contains("2 more rows"));
    Ok(())
}
