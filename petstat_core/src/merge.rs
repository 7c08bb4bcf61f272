//! Field-level merge of fresh extractions into a persisted record set.
//!
//! Only `s0` and `sg` are tracked. A persisted record may carry any number of
//! other fields (notes, tags, hand-entered values); those are never touched.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::record::{RecordSet, StatKind};

/// Merge `new` into a copy of `base`.
///
/// Names already present as JSON objects get their `s0`/`sg` replaced. Any other
/// name from `new` is inserted wholesale, replacing a non-object value if one
/// was there. Names only in `base` are carried over unchanged.
pub fn merge_into(base: &Map<String, Value>, new: &RecordSet) -> Result<Map<String, Value>> {
    let mut out = base.clone();

    for (name, record) in new.iter() {
        match out.get_mut(name) {
            Some(Value::Object(existing)) => {
                debug!("Updating stats of existing record {name}");
                for kind in [StatKind::Initial, StatKind::Growth] {
                    existing.insert(
                        kind.json_key().to_string(),
                        serde_json::to_value(record.get(kind))?,
                    );
                }
            }
            _ => {
                debug!("Adding new record {name}");
                out.insert(name.to_string(), serde_json::to_value(record)?);
            }
        }
    }

    Ok(out)
}
