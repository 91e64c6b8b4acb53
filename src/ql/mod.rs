//! InfluxQL Statement Builder
//!
//! Assembles InfluxQL text from builder state:
//!
//! - **Builder**: measurements, fields, functions, conditions, groups and options
//! - **Render**: SELECT and CREATE CONTINUOUS QUERY statements
//! - **Admin**: database, retention policy and `show` statements
//! - **Quote**: identifier, key and literal quoting rules
//!
//! # Statement Shape
//!
//! ```text
//! select <functions>,<fields> [into <target>] from <source>
//! [where <conditions> and <time bounds>]
//! [group by <dimensions> [fill(<value>)]]
//! [order by time asc|desc] [limit n] [slimit n] [offset n] [soffset n] [tz('<zone>')]
//! ```
//!
//! # Examples
//!
//! ## Select
//!
//! ```rust
//! use influx_ql::{Function, QueryBuilder};
//!
//! let mut ql = QueryBuilder::new("mydb");
//! ql.set_measurement("http")
//!     .add_function(Function::call("count").arg("code"))
//!     .add_groups(["time(6h)", "spdy", "method"]);
//! ql.set_start("2016-04-01");
//!
//! assert_eq!(
//!     ql.to_select().unwrap(),
//!     "select count(\"code\") from \"mydb\"..\"http\" where time >= '2016-04-01' \
//!      group by \"method\",\"spdy\",time(6h)"
//! );
//! ```
//!
//! ## Sub-query
//!
//! ```rust
//! use influx_ql::{Function, QueryBuilder};
//!
//! let mut ql = QueryBuilder::new("mydb");
//! ql.set_measurement("http").add_function(Function::call("max").arg("use"));
//! ql.sub_query().unwrap();
//! ql.add_function(Function::call("sum").arg("max"));
//!
//! assert_eq!(
//!     ql.to_select().unwrap(),
//!     "select sum(\"max\") from (select max(\"use\") from \"mydb\"..\"http\")"
//! );
//! ```

mod admin;
mod builder;
mod condition;
mod error;
mod quote;
mod render;
mod select;
mod value;

pub use admin::{
    create_database, create_database_if_not_exists, create_rp, drop_database, drop_rp,
    show_databases, show_field_keys, show_measurements, show_retention_policies, show_series,
    show_tag_keys, update_rp, RetentionPolicy,
};
pub use builder::QueryBuilder;
pub use condition::Condition;
pub use error::{QlError, QlResult};
pub use quote::convert;
pub use select::{Field, Function};
pub use value::{Operand, Order, Relation, Value};
