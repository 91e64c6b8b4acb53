//! Continuous query demo
//!
//! Builds a down-sampling continuous query plus the retention policy it writes into.
//!
//! Run with: cargo run --example continuous_query

use influx_ql::{create_rp, Config, Function, QueryBuilder, RetentionPolicy};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    influx_ql::init_logging(&config.logging)?;

    let rp = RetentionPolicy::new("one_year", "mydb")
        .duration("52w")
        .shard_duration("1w");
    println!("{};", create_rp(&rp)?);

    let mut ql = QueryBuilder::new("mydb");
    ql.add_measurement("http")
        .set_into_database("mydb")
        .set_into_retention_policy("one_year")
        .set_into("http_count")
        .set_cq_name("http_count_cq")
        .set_cq_every("5m")
        .add_function(Function::call("count").arg("use"))
        .add_group("time(5m)");
    ql.set_start("-5m");

    tracing::info!("Continuous query ready");
    println!("{};", ql.to_cq()?);

    Ok(())
}
