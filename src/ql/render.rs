//! Statement rendering
//!
//! Clause order for SELECT:
//!
//! ```text
//! [<multi>;]select <fields> [into <target>] from <source>
//! [where <fragments>] [group by <dimensions> [fill(<v>)]]
//! [order by time <dir>] [limit n] [slimit n] [offset n] [soffset n] [tz('<tz>')]
//! ```
//!
//! WHERE fragments and GROUP BY dimensions are sorted, so the same set of calls
//! renders the same text no matter the order they were made in.

use super::builder::QueryBuilder;
use super::error::{QlError, QlResult};
use super::quote::{
    convert, double_quote, quote_group, quote_measurement, single_quote, time_condition,
};

impl QueryBuilder {
    /// Render the SELECT statement
    ///
    /// Fails with [`QlError::MissingField`] when there is neither a sub-query,
    /// a measurement nor a database to select from.
    pub fn to_select(&self) -> QlResult<String> {
        let statement = self.render_statement()?;
        let statement = match &self.multi {
            Some(multi) => format!("{};{}", multi, statement),
            None => statement,
        };

        tracing::debug!(statement = %statement, "Rendered select");
        Ok(statement)
    }

    /// The current SELECT alone, without statements chained before it
    pub(super) fn render_statement(&self) -> QlResult<String> {
        let mut parts = vec!["select".to_string(), self.render_fields()];

        if let Some(into) = self.render_into() {
            parts.push(into);
        }

        parts.push(self.render_from()?);

        if let Some(clause) = self.render_where() {
            parts.push(clause);
        }

        if let Some(clause) = self.render_group_by() {
            parts.push(clause);
        }

        if let Some(order) = self.order {
            parts.push(format!("order by time {}", order));
        }

        for (keyword, n) in [
            ("limit", self.limit),
            ("slimit", self.slimit),
            ("offset", self.offset),
            ("soffset", self.soffset),
        ] {
            if n > 0 {
                parts.push(format!("{} {}", keyword, n));
            }
        }

        if let Some(tz) = &self.tz {
            parts.push(format!("tz({})", single_quote(tz)));
        }

        Ok(parts.join(" "))
    }

    /// Render the CREATE CONTINUOUS QUERY statement wrapping [`QueryBuilder::to_select`]
    pub fn to_cq(&self) -> QlResult<String> {
        let name = self.cq_name.as_deref().ok_or(QlError::MissingField("cq_name"))?;
        let database = self.database.as_deref().ok_or(QlError::MissingField("database"))?;

        let mut parts = vec![format!(
            "create continuous query {} on {}",
            convert(name),
            double_quote(database)
        )];

        if self.cq_every.is_some() || self.cq_for.is_some() {
            parts.push("resample".to_string());
            if let Some(every) = &self.cq_every {
                parts.push(format!("every {}", every));
            }
            if let Some(range) = &self.cq_for {
                parts.push(format!("for {}", range));
            }
        }

        parts.push(format!("begin {} end", self.to_select()?));

        let statement = parts.join(" ");
        tracing::debug!(statement = %statement, "Rendered continuous query");
        Ok(statement)
    }

    /// Functions in insertion order, then fields sorted; `*` when both are empty
    fn render_fields(&self) -> String {
        let mut fields: Vec<String> = self.fields.iter().flat_map(|f| f.render()).collect();
        fields.sort();

        let items: Vec<&str> = self
            .functions
            .iter()
            .chain(fields.iter())
            .map(String::as_str)
            .collect();

        if items.is_empty() {
            "*".to_string()
        } else {
            items.join(",")
        }
    }

    fn render_into(&self) -> Option<String> {
        let into = self.into.as_deref()?;
        let mut target = Vec::with_capacity(3);

        if let Some(db) = &self.into_database {
            target.push(double_quote(db));
            target.push(
                self.into_retention_policy
                    .as_deref()
                    .map(double_quote)
                    .unwrap_or_default(),
            );
        }
        target.push(quote_measurement(into));

        Some(format!("into {}", target.join(".")))
    }

    fn render_from(&self) -> QlResult<String> {
        if let Some(sub_query) = &self.sub_query {
            return Ok(format!("from ({})", sub_query));
        }

        let scope = self.database.as_deref().map(|db| {
            let rp = self
                .retention_policy
                .as_deref()
                .map(double_quote)
                .unwrap_or_default();
            (double_quote(db), rp)
        });

        let sources: Vec<String> = if !self.measurements.is_empty() {
            self.measurements
                .iter()
                .map(|m| match &scope {
                    Some((db, rp)) => format!("{}.{}.{}", db, rp, quote_measurement(m)),
                    None => quote_measurement(m),
                })
                .collect()
        } else {
            match scope {
                Some((db, rp)) if rp.is_empty() => vec![db],
                Some((db, rp)) => vec![format!("{}.{}", db, rp)],
                None => return Err(QlError::MissingField("measurement")),
            }
        };

        Ok(format!("from {}", sources.join(",")))
    }

    fn render_where(&self) -> Option<String> {
        let mut fragments = self.conditions.clone();
        if let Some(start) = &self.start {
            fragments.push(time_condition(start, ">="));
        }
        if let Some(end) = &self.end {
            fragments.push(time_condition(end, "<="));
        }

        if fragments.is_empty() {
            return None;
        }

        fragments.sort();
        let join = format!(" {} ", self.relation);
        Some(format!("where {}", fragments.join(&join)))
    }

    fn render_group_by(&self) -> Option<String> {
        if self.groups.is_empty() {
            return None;
        }

        let mut groups: Vec<&str> = self.groups.iter().map(String::as_str).collect();
        groups.sort_unstable();
        let dimensions: Vec<String> = groups.into_iter().map(quote_group).collect();

        let mut clause = format!("group by {}", dimensions.join(","));
        if let Some(fill) = &self.fill {
            clause.push_str(&format!(" fill({})", fill));
        }
        Some(clause)
    }
}

#[cfg(test)]
mod tests {
    use crate::ql::{Condition, Field, Function, Order, QlError, QueryBuilder, Relation};

    fn http() -> QueryBuilder {
        let mut ql = QueryBuilder::new("mydb");
        ql.set_measurement("http");
        ql
    }

    fn http_no_db() -> QueryBuilder {
        let mut ql = QueryBuilder::default();
        ql.set_measurement("http");
        ql
    }

    #[test]
    fn test_basic_query() {
        let mut ql = http();
        ql.set_retention_policy("default")
            .add_fields(["status", "spdy", "fetch time"])
            .add_group("spdy")
            .set_start("2018-01-27T05:38:56.145Z")
            .set_end("-3h")
            .set_limit(10)
            .set_slimit(5)
            .set_order(Order::Desc)
            .set_offset(10)
            .set_soffset(5)
            .condition(("code", 400))
            .condition("\"use\" <= 30")
            .set_fill(0);

        assert_eq!(
            ql.to_select().unwrap(),
            "select \"fetch time\",\"spdy\",\"status\" from \"mydb\".\"default\".\"http\" \
             where \"code\" = 400 and \"use\" <= 30 and time <= now() - 3h \
             and time >= '2018-01-27T05:38:56.145Z' group by \"spdy\" fill(0) \
             order by time desc limit 10 slimit 5 offset 10 soffset 5"
        );
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut ql = http();
        ql.add_field("use").condition(("code", 500)).set_start("-1h");
        assert_eq!(ql.to_select().unwrap(), ql.to_select().unwrap());
    }

    #[test]
    fn test_select_all() {
        assert_eq!(http_no_db().to_select().unwrap(), "select * from \"http\"");
        assert_eq!(http().to_select().unwrap(), "select * from \"mydb\"..\"http\"");
    }

    #[test]
    fn test_fields() {
        let mut ql = http_no_db();
        ql.add_field("status");
        assert_eq!(ql.to_select().unwrap(), "select \"status\" from \"http\"");

        ql.remove_field("status");
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\"");

        ql.add_field("ajax status");
        assert_eq!(ql.to_select().unwrap(), "select \"ajax status\" from \"http\"");

        ql.empty_fields().add_field("\"use\" + 2");
        assert_eq!(ql.to_select().unwrap(), "select \"use\" + 2 from \"http\"");
    }

    #[test]
    fn test_field_alias() {
        let mut ql = http();
        ql.add_field(("fetch time", "ft"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select \"fetch time\" as \"ft\" from \"mydb\"..\"http\""
        );

        ql.remove_field("fetch time");
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"..\"http\"");
    }

    #[test]
    fn test_functions_then_fields() {
        let mut ql = http();
        ql.add_function(Function::raw("bottom(\"use\",3)").alias("bot3Use"))
            .add_field("spdy");
        assert_eq!(
            ql.to_select().unwrap(),
            "select bottom(\"use\",3) as \"bot3Use\",\"spdy\" from \"mydb\"..\"http\""
        );

        let mut ql = http_no_db();
        ql.add_function(Function::call("mean").arg("use"))
            .add_function(Function::call("count").arg("use"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\"),count(\"use\") from \"http\""
        );

        ql.remove_function(Function::call("count").arg("use"));
        assert_eq!(ql.to_select().unwrap(), "select mean(\"use\") from \"http\"");

        ql.empty_functions();
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\"");
    }

    #[test]
    fn test_function_params() {
        let mut ql = http();
        ql.add_function(Function::call("bottom").arg("use").arg(3));
        assert_eq!(
            ql.to_select().unwrap(),
            "select bottom(\"use\",3) from \"mydb\"..\"http\""
        );

        let mut ql = http();
        ql.add_function(Function::from_args(&["count", "use"]).alias("countUse"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select count(\"use\") as \"countUse\" from \"mydb\"..\"http\""
        );
    }

    #[test]
    fn test_where_shapes() {
        let mut ql = http();
        ql.where_(("spdy", "1"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where \"spdy\" = '1'"
        );

        let mut ql = http();
        ql.where_(("spdy", vec!["1", "2"]));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where (\"spdy\" = '1' or \"spdy\" = '2')"
        );

        let mut ql = http();
        ql.where_(Condition::all([("spdy", "/1|2/")]))
            .where_(Condition::all([("method", "/GET/")]));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where \"method\" = /GET/ and \"spdy\" = /1|2/"
        );

        let mut ql = http();
        ql.where_(("path", "/"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where \"path\" = '/'"
        );
    }

    #[test]
    fn test_condition_order_is_canonical() {
        let mut a = http();
        a.condition(("b", 1)).condition(("a", 2));
        let mut b = http();
        b.condition(("a", 2)).condition(("b", 1));
        assert_eq!(a.to_select().unwrap(), b.to_select().unwrap());
    }

    #[test]
    fn test_relation_between_conditions() {
        let mut ql = http();
        ql.where_(("spdy", "1")).where_(("method", "GET"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where \"method\" = 'GET' and \"spdy\" = '1'"
        );

        ql.set_relation(Relation::Or);
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\"..\"http\" where \"method\" = 'GET' or \"spdy\" = '1'"
        );
    }

    #[test]
    fn test_add_conditions() {
        let mut ql = http_no_db();
        ql.condition(Condition::new("code", 500).pair("spdy", "1"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where (\"code\" = 500 and \"spdy\" = '1')"
        );

        ql.condition(("code", 404)).set_relation(Relation::Or);
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where \"code\" = 404 or (\"code\" = 500 and \"spdy\" = '1')"
        );

        ql.empty_conditions().condition(("http spdy", "slow"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where \"http spdy\" = 'slow'"
        );
    }

    #[test]
    fn test_measurements() {
        let mut ql = QueryBuilder::new("mydb");
        ql.set_retention_policy("test")
            .add_measurement("http")
            .add_measurements(["https", "httpd"]);
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"mydb\".\"test\".\"http\",\"mydb\".\"test\".\"https\",\"mydb\".\"test\".\"httpd\""
        );

        let mut ql = QueryBuilder::default();
        ql.add_measurements(["http", "https"]);
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\",\"https\"");

        let mut ql = QueryBuilder::new("mydb");
        ql.add_measurements(["http", "https"]).remove_measurement("http");
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"..\"https\"");

        ql.empty_measurements();
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"");

        ql.set_slimit(3);
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\" slimit 3");
    }

    #[test]
    fn test_meta_measurement() {
        let mut ql = QueryBuilder::new("mydb");
        ql.add_measurement("/^http/");
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"../^http/");
    }

    #[test]
    fn test_missing_source() {
        let ql = QueryBuilder::default();
        assert_eq!(ql.to_select(), Err(QlError::MissingField("measurement")));
    }

    #[test]
    fn test_time_bounds() {
        let mut ql = http_no_db();
        ql.set_start("2016-03-01 23:32:01.232").set_end("2016-03-02");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where time <= '2016-03-02' and time >= '2016-03-01 23:32:01.232'"
        );

        ql.set_end("-3h");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where time <= now() - 3h and time >= '2016-03-01 23:32:01.232'"
        );

        ql.set_end("1388534400s");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" where time <= 1388534400s and time >= '2016-03-01 23:32:01.232'"
        );

        let mut ql = http();
        ql.set_start("-3h");
        assert!(ql.to_select().unwrap().ends_with("where time >= now() - 3h"));
        ql.set_start("2016-01-01");
        assert!(ql.to_select().unwrap().ends_with("where time >= '2016-01-01'"));
    }

    #[test]
    fn test_groups_and_fill() {
        let mut ql = http_no_db();
        ql.add_group("spdy").add_function(Function::call("mean").arg("use"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\") from \"http\" group by \"spdy\""
        );

        ql.add_groups(["status", "time(6h)"]);
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\") from \"http\" group by \"spdy\",\"status\",time(6h)"
        );

        ql.remove_groups(["status", "time(6h)", "spdy"])
            .add_group("ajax status")
            .add_groups(["time(6h, 10m)", "spdy"]);
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\") from \"http\" group by \"ajax status\",\"spdy\",time(6h, 10m)"
        );

        ql.empty_groups().add_group("spdy").set_fill(100);
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\") from \"http\" group by \"spdy\" fill(100)"
        );

        ql.set_fill("none");
        assert!(ql.to_select().unwrap().ends_with("group by \"spdy\" fill(none)"));
    }

    #[test]
    fn test_fill_needs_groups() {
        let mut ql = http();
        ql.set_fill(0);
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"..\"http\"");
    }

    #[test]
    fn test_group_all_with_limits() {
        let mut ql = http_no_db();
        ql.add_group("*").set_slimit(10);
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\" group by * slimit 10");

        ql.set_limit(5);
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" group by * limit 5 slimit 10"
        );
    }

    #[test]
    fn test_order_offset_tz() {
        let mut ql = http_no_db();
        ql.set_order(Order::Desc);
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\" order by time desc");

        let mut ql = http_no_db();
        ql.set_offset(10);
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\" offset 10");

        let mut ql = http_no_db();
        ql.set_tz("America/Chicago");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * from \"http\" tz('America/Chicago')"
        );
    }

    #[test]
    fn test_into() {
        let mut ql = http_no_db();
        ql.set_into("http copy");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * into \"http copy\" from \"http\""
        );

        ql.add_function(Function::call("mean").arg("use"))
            .where_(("spdy", "slow"))
            .set_start("2015-08-18T00:00:00Z")
            .set_end("2015-08-18T00:30:00Z")
            .add_group("time(10m)");
        assert_eq!(
            ql.to_select().unwrap(),
            "select mean(\"use\") into \"http copy\" from \"http\" where \"spdy\" = 'slow' \
             and time <= '2015-08-18T00:30:00Z' and time >= '2015-08-18T00:00:00Z' group by time(10m)"
        );
    }

    #[test]
    fn test_into_database() {
        let mut ql = http_no_db();
        ql.set_database("mydb").set_into("http copy");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * into \"http copy\" from \"mydb\"..\"http\""
        );

        ql.set_into_database("mydb").set_into_retention_policy("my-rp");
        assert_eq!(
            ql.to_select().unwrap(),
            "select * into \"mydb\".\"my-rp\".\"http copy\" from \"mydb\"..\"http\""
        );

        ql.set_into(":MEASUREMENT");
        assert!(ql
            .to_select()
            .unwrap()
            .starts_with("select * into \"mydb\".\"my-rp\".:MEASUREMENT from"));
    }

    #[test]
    fn test_clean() {
        let mut ql = http();
        ql.add_field("fetch time").add_group("spdy");
        assert_eq!(
            ql.to_select().unwrap(),
            "select \"fetch time\" from \"mydb\"..\"http\" group by \"spdy\""
        );
        ql.clean();
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"..\"http\"");
    }

    #[test]
    fn test_sub_query() {
        let mut ql = http();
        ql.add_function(Function::call("max").arg("fetch time")).add_group("spdy");
        ql.sub_query().unwrap();
        ql.add_function(Function::call("sum").arg("max"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select sum(\"max\") from (select max(\"fetch time\") from \"mydb\"..\"http\" group by \"spdy\")"
        );

        let mut ql = http();
        ql.add_function(Function::call("max").arg("use"))
            .sub_query()
            .unwrap()
            .add_function(Function::call("sum").arg("max"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select sum(\"max\") from (select max(\"use\") from \"mydb\"..\"http\")"
        );
    }

    #[test]
    fn test_nested_sub_query() {
        let mut ql = http();
        ql.add_function(Function::call("max").arg("use"));
        ql.sub_query().unwrap();
        ql.add_function(Function::call("sum").arg("max"));
        ql.sub_query().unwrap();
        ql.add_field(Field::from("sum"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select \"sum\" from (select sum(\"max\") from (select max(\"use\") from \"mydb\"..\"http\"))"
        );
    }

    #[test]
    fn test_multi_query() {
        let mut ql = http();
        ql.add_function(Function::call("max").arg("fetch time")).add_group("spdy");
        ql.multi_query().unwrap();
        ql.add_function(Function::call("sum").arg("max"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select max(\"fetch time\") from \"mydb\"..\"http\" group by \"spdy\";select sum(\"max\") from \"mydb\"..\"http\""
        );
    }

    #[test]
    fn test_sub_query_after_multi_query() {
        let mut ql = http();
        ql.add_function(Function::call("count").arg("use"));
        ql.multi_query().unwrap();
        ql.add_function(Function::call("max").arg("use"));
        ql.sub_query().unwrap();
        ql.add_function(Function::call("sum").arg("max"));
        assert_eq!(
            ql.to_select().unwrap(),
            "select count(\"use\") from \"mydb\"..\"http\";\
             select sum(\"max\") from (select max(\"use\") from \"mydb\"..\"http\")"
        );
    }

    #[test]
    fn test_empty_list_condition() {
        let mut ql = http();
        ql.where_(("spdy", Vec::<&str>::new()));
        assert_eq!(ql.to_select().unwrap(), "select * from \"mydb\"..\"http\"");
        assert!(ql.conditions().is_empty());
    }

    #[test]
    fn test_tz_is_escaped() {
        let mut ql = http_no_db();
        ql.set_tz("it's");
        assert_eq!(ql.to_select().unwrap(), "select * from \"http\" tz('it\\'s')");
    }

    #[test]
    fn test_continuous_query() {
        let mut ql = QueryBuilder::default();
        ql.set_measurement("http")
            .set_database("mydb")
            .set_into_database("mydb")
            .set_into("http copy")
            .set_cq_name("combine-http")
            .set_cq_every("2m")
            .set_cq_for("1m")
            .add_function(Function::call("count").arg("use"))
            .add_group("time(5m)");

        assert_eq!(
            ql.to_cq().unwrap(),
            "create continuous query \"combine-http\" on \"mydb\" resample every 2m for 1m \
             begin select count(\"use\") into \"mydb\"..\"http copy\" from \"mydb\"..\"http\" \
             group by time(5m) end"
        );
    }

    #[test]
    fn test_continuous_query_without_resample() {
        let mut ql = QueryBuilder::new("mydb");
        ql.add_measurement("http")
            .set_into("http_count")
            .set_cq_name("http_count_cq")
            .add_function(Function::call("count").arg("use"))
            .add_group("time(5m)");

        assert_eq!(
            ql.to_cq().unwrap(),
            "create continuous query http_count_cq on \"mydb\" begin select count(\"use\") \
             into \"http_count\" from \"mydb\"..\"http\" group by time(5m) end"
        );

        ql.set_cq_every("5m");
        assert!(ql.to_cq().unwrap().contains("on \"mydb\" resample every 5m begin"));
    }

    #[test]
    fn test_continuous_query_requires_name_and_database() {
        let mut ql = http_no_db();
        assert_eq!(ql.to_cq(), Err(QlError::MissingField("cq_name")));
        ql.set_cq_name("cq");
        assert_eq!(ql.to_cq(), Err(QlError::MissingField("database")));
    }
}
