//! # influx-ql
//!
//! Fluent builder for InfluxQL statements: SELECT, SELECT INTO, CREATE CONTINUOUS
//! QUERY, retention policy and administrative statements.
//!
//! ## Features
//!
//! - **Deterministic output**: conditions and groups are sorted before rendering
//! - **Quoting**: identifiers, keys, measurements and literals are quoted for you
//! - **Composable**: sub-queries and multi-statement chaining from one builder
//! - **No I/O**: the crate only produces strings
//!
//! ## Modules
//!
//! - [`ql`]: Statement builder, renderers and administrative helpers
//! - [`config`]: Builder defaults and logging settings from TOML/env
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use influx_ql::{Function, Order, QueryBuilder};
//!
//! fn main() -> Result<(), influx_ql::QlError> {
//!     let mut ql = QueryBuilder::new("mydb");
//!     ql.set_measurement("http")
//!         .set_retention_policy("two-weeks")
//!         .add_fields(["status", "spdy", "fetch time"])
//!         .condition(("code", 400))
//!         .set_start("2016-01-01")
//!         .set_end("-3h")
//!         .set_order(Order::Desc)
//!         .set_limit(10);
//!
//!     let statement = ql.to_select()?;
//!     assert_eq!(
//!         statement,
//!         "select \"fetch time\",\"spdy\",\"status\" from \"mydb\".\"two-weeks\".\"http\" \
//!          where \"code\" = 400 and time <= now() - 3h and time >= '2016-01-01' \
//!          order by time desc limit 10"
//!     );
//!
//!     let mut cq = QueryBuilder::new("mydb");
//!     cq.add_measurement("http")
//!         .set_into("http-count")
//!         .set_cq_name("http-count-cq")
//!         .set_cq_every("5m")
//!         .add_function(Function::call("count").arg("use"))
//!         .add_group("time(5m)");
//!     println!("{}", cq.to_cq()?);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod ql;

// Re-export top-level types for convenience
pub use ql::{
    convert, create_database, create_database_if_not_exists, create_rp, drop_database, drop_rp,
    show_databases, show_field_keys, show_measurements, show_retention_policies, show_series,
    show_tag_keys, update_rp, Condition, Field, Function, Operand, Order, QlError, QlResult,
    QueryBuilder, Relation, RetentionPolicy, Value,
};

pub use config::{generate_default_config, Config, ConfigError, DefaultsConfig, LoggingConfig};

pub use logging::init_logging;
