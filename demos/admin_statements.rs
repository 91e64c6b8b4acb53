//! Administrative statements demo
//!
//! Run with: cargo run --example admin_statements

use influx_ql::{
    create_database, create_database_if_not_exists, drop_database, show_databases,
    show_field_keys, show_measurements, show_retention_policies, show_series, show_tag_keys,
};

fn main() {
    let statements = [
        create_database("mydb"),
        create_database_if_not_exists("my db"),
        drop_database("mydb"),
        show_databases(),
        show_retention_policies("mydb"),
        show_measurements(),
        show_tag_keys(None),
        show_tag_keys(Some("http")),
        show_field_keys(Some("http")),
        show_series(Some("http")),
    ];

    for statement in statements {
        println!("{}", statement);
    }
}
