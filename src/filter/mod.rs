mod adhoc;
mod coerce;

pub use adhoc::{
    AdhocColumn, AdhocFilter, BinaryFilterClause, Clause, QueryFormColumn, simple_filter_to_adhoc,
};
pub use coerce::{coerce_to_string, to_json_literal};
