//! Statement builder state
//!
//! [`QueryBuilder`] holds everything a SELECT or CONTINUOUS QUERY statement needs.
//! Mutators take `&mut self` and return `&mut Self`, so calls chain and the builder
//! can be rendered any number of times in between. Rendering lives in `render.rs`.

use chrono::{DateTime, SecondsFormat, Utc};

use super::condition::Condition;
use super::error::QlResult;
use super::select::{Field, Function};
use super::value::{Order, Relation, Value};

/// Fluent builder for InfluxQL statements
///
/// ```rust
/// use influx_ql::{Condition, Function, QueryBuilder};
///
/// let mut ql = QueryBuilder::new("mydb");
/// ql.set_measurement("http")
///     .add_function(Function::call("count").arg("use"))
///     .condition(("spdy", "1"))
///     .condition(Condition::new("use", 30).operator("<="))
///     .add_group("time(5m)");
/// ql.set_start("-3h");
///
/// assert_eq!(
///     ql.to_select().unwrap(),
///     "select count(\"use\") from \"mydb\"..\"http\" where \"spdy\" = '1' and \"use\" <= 30 \
///      and time >= now() - 3h group by time(5m)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(super) database: Option<String>,
    pub(super) retention_policy: Option<String>,
    pub(super) measurements: Vec<String>,
    pub(super) sub_query: Option<String>,
    pub(super) fields: Vec<Field>,
    pub(super) functions: Vec<String>,
    pub(super) conditions: Vec<String>,
    pub(super) relation: Relation,
    pub(super) groups: Vec<String>,
    pub(super) fill: Option<Value>,
    pub(super) start: Option<String>,
    pub(super) end: Option<String>,
    pub(super) order: Option<Order>,
    pub(super) limit: u64,
    pub(super) slimit: u64,
    pub(super) offset: u64,
    pub(super) soffset: u64,
    pub(super) tz: Option<String>,
    pub(super) into: Option<String>,
    pub(super) into_database: Option<String>,
    pub(super) into_retention_policy: Option<String>,
    pub(super) multi: Option<String>,
    pub(super) cq_name: Option<String>,
    pub(super) cq_every: Option<String>,
    pub(super) cq_for: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

impl QueryBuilder {
    /// Create a builder scoped to a database
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: non_empty(database),
            ..Self::default()
        }
    }

    // ---- measurements ----

    /// Add a source measurement
    pub fn add_measurement(&mut self, name: impl Into<String>) -> &mut Self {
        self.measurements.push(name.into());
        self
    }

    /// Add several source measurements
    pub fn add_measurements<S, I>(&mut self, names: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.measurements.extend(names.into_iter().map(Into::into));
        self
    }

    /// Remove a source measurement
    pub fn remove_measurement(&mut self, name: &str) -> &mut Self {
        self.measurements.retain(|m| m != name);
        self
    }

    /// Remove several source measurements
    pub fn remove_measurements<'a, I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.remove_measurement(name);
        }
        self
    }

    /// Remove every source measurement
    pub fn empty_measurements(&mut self) -> &mut Self {
        self.measurements.clear();
        self
    }

    /// Replace all measurements with a single one
    pub fn set_measurement(&mut self, name: impl Into<String>) -> &mut Self {
        self.measurements = vec![name.into()];
        self
    }

    /// The first measurement, if any
    pub fn measurement(&self) -> Option<&str> {
        self.measurements.first().map(String::as_str)
    }

    /// All source measurements in insertion order
    pub fn measurements(&self) -> &[String] {
        &self.measurements
    }

    // ---- fields ----

    /// Add a field, or an aliased field from a `(name, alias)` pair
    pub fn add_field(&mut self, field: impl Into<Field>) -> &mut Self {
        self.fields.push(field.into());
        self
    }

    /// Add several fields
    pub fn add_fields<F, I>(&mut self, fields: I) -> &mut Self
    where
        F: Into<Field>,
        I: IntoIterator<Item = F>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Remove a field by its original name, including from alias mappings
    pub fn remove_field(&mut self, name: &str) -> &mut Self {
        self.fields.retain_mut(|field| field.remove(name));
        self
    }

    /// Remove several fields
    pub fn remove_fields<'a, I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.remove_field(name);
        }
        self
    }

    /// Remove every field
    pub fn empty_fields(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    /// Fields in insertion order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    // ---- functions ----

    /// Add a function call or a pre-rendered function expression
    pub fn add_function(&mut self, function: impl Into<Function>) -> &mut Self {
        let function = function.into();
        if !function.is_empty() {
            self.functions.push(function.render());
        }
        self
    }

    /// Remove a function, whether or not it was added with an alias
    pub fn remove_function(&mut self, function: impl Into<Function>) -> &mut Self {
        let expression = function.into().expression();
        let aliased = format!("{} as ", expression);
        self.functions
            .retain(|f| f != &expression && !f.starts_with(&aliased));
        self
    }

    /// Remove every function
    pub fn empty_functions(&mut self) -> &mut Self {
        self.functions.clear();
        self
    }

    /// Rendered function expressions in insertion order
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    // ---- conditions ----

    /// Add a WHERE condition
    ///
    /// Accepts a raw `&str`, a `(key, value)` tuple, or a [`Condition`].
    pub fn condition(&mut self, condition: impl Into<Condition>) -> &mut Self {
        if let Some(rendered) = condition.into().render() {
            self.conditions.push(rendered);
        }
        self
    }

    /// Alias for [`QueryBuilder::condition`]
    pub fn where_(&mut self, condition: impl Into<Condition>) -> &mut Self {
        self.condition(condition)
    }

    /// Remove every condition
    pub fn empty_conditions(&mut self) -> &mut Self {
        self.conditions.clear();
        self
    }

    /// Rendered conditions in insertion order
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Relation joining the WHERE fragments
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Set the relation joining the WHERE fragments
    pub fn set_relation(&mut self, relation: Relation) -> &mut Self {
        self.relation = relation;
        self
    }

    // ---- groups ----

    /// Add a GROUP BY dimension: a tag, `*`, or `time(...)`
    pub fn add_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.groups.push(group.into());
        self
    }

    /// Add several GROUP BY dimensions
    pub fn add_groups<S, I>(&mut self, groups: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Remove a GROUP BY dimension
    pub fn remove_group(&mut self, group: &str) -> &mut Self {
        self.groups.retain(|g| g != group);
        self
    }

    /// Remove several GROUP BY dimensions
    pub fn remove_groups<'a, I>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for group in groups {
            self.remove_group(group);
        }
        self
    }

    /// Remove every GROUP BY dimension
    pub fn empty_groups(&mut self) -> &mut Self {
        self.groups.clear();
        self
    }

    /// GROUP BY dimensions in insertion order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    // ---- scope ----

    /// Database the statement selects from
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Set the source database; an empty name clears it
    pub fn set_database(&mut self, database: impl Into<String>) -> &mut Self {
        self.database = non_empty(database);
        self
    }

    /// Remove the source database
    pub fn clear_database(&mut self) -> &mut Self {
        self.database = None;
        self
    }

    /// Retention policy the statement selects from
    pub fn retention_policy(&self) -> Option<&str> {
        self.retention_policy.as_deref()
    }

    /// Set the source retention policy
    pub fn set_retention_policy(&mut self, rp: impl Into<String>) -> &mut Self {
        self.retention_policy = non_empty(rp);
        self
    }

    /// Remove the source retention policy
    pub fn clear_retention_policy(&mut self) -> &mut Self {
        self.retention_policy = None;
        self
    }

    // ---- select into ----

    /// Destination measurement for `select ... into`
    pub fn into_measurement(&self) -> Option<&str> {
        self.into.as_deref()
    }

    /// Set the `select ... into` destination measurement
    pub fn set_into(&mut self, measurement: impl Into<String>) -> &mut Self {
        self.into = non_empty(measurement);
        self
    }

    /// Stop writing results into a measurement
    pub fn clear_into(&mut self) -> &mut Self {
        self.into = None;
        self
    }

    /// Destination database for `select ... into`
    pub fn into_database(&self) -> Option<&str> {
        self.into_database.as_deref()
    }

    /// Set the destination database for `select ... into`
    pub fn set_into_database(&mut self, database: impl Into<String>) -> &mut Self {
        self.into_database = non_empty(database);
        self
    }

    /// Destination retention policy for `select ... into`
    pub fn into_retention_policy(&self) -> Option<&str> {
        self.into_retention_policy.as_deref()
    }

    /// Set the destination retention policy for `select ... into`
    pub fn set_into_retention_policy(&mut self, rp: impl Into<String>) -> &mut Self {
        self.into_retention_policy = non_empty(rp);
        self
    }

    // ---- time bounds ----

    /// Lower time bound as given
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Lower time bound: `-3h`, `2016-01-01`, `1388534400s`, ...
    pub fn set_start(&mut self, start: impl Into<String>) -> &mut Self {
        self.start = non_empty(start);
        self
    }

    /// Lower time bound from a timestamp
    pub fn set_start_at(&mut self, start: DateTime<Utc>) -> &mut Self {
        self.set_start(start.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Remove the lower time bound
    pub fn clear_start(&mut self) -> &mut Self {
        self.start = None;
        self
    }

    /// Upper time bound as given
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// Upper time bound, same formats as [`QueryBuilder::set_start`]
    pub fn set_end(&mut self, end: impl Into<String>) -> &mut Self {
        self.end = non_empty(end);
        self
    }

    /// Upper time bound from a timestamp
    pub fn set_end_at(&mut self, end: DateTime<Utc>) -> &mut Self {
        self.set_end(end.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Remove the upper time bound
    pub fn clear_end(&mut self) -> &mut Self {
        self.end = None;
        self
    }

    // ---- result shaping ----

    /// Fill value for GROUP BY intervals
    pub fn fill(&self) -> Option<&Value> {
        self.fill.as_ref()
    }

    /// Fill value for empty intervals: a number, or `none`/`null`/`previous`/`linear`
    pub fn set_fill(&mut self, fill: impl Into<Value>) -> &mut Self {
        self.fill = Some(fill.into());
        self
    }

    /// Remove the fill value
    pub fn clear_fill(&mut self) -> &mut Self {
        self.fill = None;
        self
    }

    /// Sort direction of `order by time`
    pub fn order(&self) -> Option<Order> {
        self.order
    }

    /// Set the sort direction of `order by time`
    pub fn set_order(&mut self, order: Order) -> &mut Self {
        self.order = Some(order);
        self
    }

    /// Drop the `order by time` clause
    pub fn clear_order(&mut self) -> &mut Self {
        self.order = None;
        self
    }

    /// Maximum points per series; 0 when unset
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Maximum points per series; 0 disables
    pub fn set_limit(&mut self, limit: u64) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Maximum series; 0 when unset
    pub fn slimit(&self) -> u64 {
        self.slimit
    }

    /// Maximum series; 0 disables
    pub fn set_slimit(&mut self, slimit: u64) -> &mut Self {
        self.slimit = slimit;
        self
    }

    /// Points skipped per series; 0 when unset
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Skip points per series; 0 disables
    pub fn set_offset(&mut self, offset: u64) -> &mut Self {
        self.offset = offset;
        self
    }

    /// Series skipped; 0 when unset
    pub fn soffset(&self) -> u64 {
        self.soffset
    }

    /// Skip series; 0 disables
    pub fn set_soffset(&mut self, soffset: u64) -> &mut Self {
        self.soffset = soffset;
        self
    }

    /// Time zone appended as `tz(...)`
    pub fn tz(&self) -> Option<&str> {
        self.tz.as_deref()
    }

    /// IANA time zone, e.g. `America/Chicago`
    pub fn set_tz(&mut self, tz: impl Into<String>) -> &mut Self {
        self.tz = non_empty(tz);
        self
    }

    /// Drop the `tz(...)` clause
    pub fn clear_tz(&mut self) -> &mut Self {
        self.tz = None;
        self
    }

    // ---- continuous query ----

    /// Continuous query name
    pub fn cq_name(&self) -> Option<&str> {
        self.cq_name.as_deref()
    }

    /// Set the continuous query name
    pub fn set_cq_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.cq_name = non_empty(name);
        self
    }

    /// Continuous query run interval
    pub fn cq_every(&self) -> Option<&str> {
        self.cq_every.as_deref()
    }

    /// How often the continuous query runs (`resample every`)
    pub fn set_cq_every(&mut self, every: impl Into<String>) -> &mut Self {
        self.cq_every = non_empty(every);
        self
    }

    /// Continuous query time range
    pub fn cq_for(&self) -> Option<&str> {
        self.cq_for.as_deref()
    }

    /// Time range covered by each run (`resample for`)
    pub fn set_cq_for(&mut self, range: impl Into<String>) -> &mut Self {
        self.cq_for = non_empty(range);
        self
    }

    // ---- snapshots ----

    /// Stored sub-query, if [`QueryBuilder::sub_query`] was called
    pub fn stored_sub_query(&self) -> Option<&str> {
        self.sub_query.as_deref()
    }

    /// Statements chained before this one by [`QueryBuilder::multi_query`]
    pub fn stored_multi(&self) -> Option<&str> {
        self.multi.as_deref()
    }

    /// Reset the per-statement state
    ///
    /// Measurements, database, relation, the into target, chained statements and
    /// continuous query parameters are kept.
    pub fn clean(&mut self) -> &mut Self {
        self.fields.clear();
        self.conditions.clear();
        self.functions.clear();
        self.groups.clear();
        self.retention_policy = None;
        self.into_retention_policy = None;
        self.sub_query = None;
        self.start = None;
        self.end = None;
        self.limit = 0;
        self.slimit = 0;
        self.offset = 0;
        self.soffset = 0;
        self.tz = None;
        self.order = None;
        self.fill = None;
        self
    }

    /// Turn the current statement into a sub-query of the next one
    ///
    /// Renders the current SELECT, cleans the builder and selects from the rendering.
    /// Statements chained by [`QueryBuilder::multi_query`] stay in front and are not
    /// nested. On error the builder is left untouched.
    pub fn sub_query(&mut self) -> QlResult<&mut Self> {
        let query = self.render_statement()?;
        tracing::debug!(sub_query = %query, "Wrapping statement as sub-query");
        self.clean();
        self.sub_query = Some(query);
        Ok(self)
    }

    /// Finish the current statement and start another after a `;`
    ///
    /// On error the builder is left untouched.
    pub fn multi_query(&mut self) -> QlResult<&mut Self> {
        let query = self.to_select()?;
        tracing::debug!(statement = %query, "Chaining statement");
        self.clean();
        self.multi = Some(query);
        Ok(self)
    }
}
