//! `getQuerySchema` — spec.md §4.2.
//!
//! A pure recursive dispatch over `QueryRep`, mirroring the shape of
//! `ff-analysis`'s `RelOp::schema()` accessor (`ir/relop.rs`) but computing
//! the schema rather than reading it off an already-typed node, since here
//! the IR carries no schema of its own until this function runs.

use std::collections::HashMap;

use relq_core::{ColumnMetadata, QrError, QrResult, Schema, TableInfoMap};
use relq_ir::{AggSpec, ColumnExtendExp, ColumnRemap, JoinType, QueryRep};
use relq_types::{ColumnKind, ColumnType, Dialect};

/// Compute the output schema of `query` against `table_map` under `dialect`.
pub fn get_query_schema(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    query: &QueryRep,
) -> QrResult<Schema> {
    match query {
        QueryRep::Table { table_name } => table_map
            .get(table_name)
            .map(|info| info.schema.clone())
            .ok_or_else(|| QrError::UnknownTable {
                name: table_name.clone(),
            }),

        QueryRep::Project { cols, from } => {
            let in_schema = get_query_schema(dialect, table_map, from)?;
            in_schema.restrict(cols, "project")
        }

        QueryRep::Filter { from, .. } => get_query_schema(dialect, table_map, from),

        QueryRep::Sort { from, .. } => get_query_schema(dialect, table_map, from),

        QueryRep::Concat { from, target } => {
            let from_schema = get_query_schema(dialect, table_map, from)?;
            let target_schema = get_query_schema(dialect, table_map, target)?;
            if !schemas_agree(&from_schema, &target_schema) {
                return Err(QrError::SchemaMismatch {
                    reason: "concat operands must share identical columns and types".to_string(),
                });
            }
            Ok(from_schema)
        }

        QueryRep::GroupBy { cols, aggs, from } => {
            let in_schema = get_query_schema(dialect, table_map, from)?;
            let mut entries = Vec::with_capacity(cols.len() + aggs.len());
            for id in cols {
                let meta = in_schema.metadata(id).ok_or_else(|| QrError::UnknownColumn {
                    name: id.clone(),
                    context: "groupBy".to_string(),
                })?;
                entries.push((id.clone(), meta.clone()));
            }
            for agg in aggs {
                let name = agg.column_name();
                let meta = in_schema.metadata(name).ok_or_else(|| QrError::UnknownColumn {
                    name: name.to_string(),
                    context: "groupBy".to_string(),
                })?;
                entries.push((name.to_string(), meta.clone()));
            }
            Schema::new(entries)
        }

        QueryRep::MapColumns { cmap, from } => {
            let in_schema = get_query_schema(dialect, table_map, from)?;
            remap_schema(&in_schema, |_idx, id| cmap.get(id).cloned())
        }

        QueryRep::MapColumnsByIndex { cmap, from } => {
            let in_schema = get_query_schema(dialect, table_map, from)?;
            remap_schema(&in_schema, |idx, _id| cmap.get(&idx).cloned())
        }

        QueryRep::Extend {
            col_id,
            col_exp,
            opts,
            from,
        } => {
            let in_schema = get_query_schema(dialect, table_map, from)?;
            let column_type = get_or_infer_column_type(dialect, &in_schema, col_exp, opts)?;
            let display_name = opts.display_name.clone().unwrap_or_else(|| col_id.clone());
            in_schema.extend(col_id.clone(), ColumnMetadata::new(column_type, display_name))
        }

        QueryRep::Join {
            lhs,
            rhs,
            on,
            join_type,
        } => {
            if *join_type != JoinType::LeftOuter {
                return Err(QrError::UnsupportedJoin {
                    join_type: join_type.to_string(),
                });
            }
            let lhs_schema = get_query_schema(dialect, table_map, lhs)?;
            let rhs_schema = get_query_schema(dialect, table_map, rhs)?;
            let on_cols = on.as_vec();

            let mut entries: Vec<(String, ColumnMetadata)> = lhs_schema
                .iter()
                .map(|(id, meta)| (id.to_string(), meta.clone()))
                .collect();
            for (id, meta) in rhs_schema.iter() {
                let already_on_lhs = on_cols.iter().any(|c| c == id) || lhs_schema.contains(id);
                if !already_on_lhs {
                    entries.push((id.to_string(), meta.clone()));
                }
            }
            Schema::new(entries)
        }
    }
}

fn schemas_agree(a: &Schema, b: &Schema) -> bool {
    if a.columns() != b.columns() {
        return false;
    }
    a.columns().iter().all(|id| a.metadata(id) == b.metadata(id))
}

/// Shared `mapColumns`/`mapColumnsByIndex` logic, parameterized only by the
/// key selector — the "map-columns unification" design note in spec.md §9.
fn remap_schema(
    in_schema: &Schema,
    lookup: impl Fn(usize, &str) -> Option<ColumnRemap>,
) -> QrResult<Schema> {
    let mut entries = Vec::with_capacity(in_schema.len());
    for (idx, (id, meta)) in in_schema.iter().enumerate() {
        match lookup(idx, id) {
            Some(remap) => {
                let new_id = remap.id.clone().unwrap_or_else(|| id.to_string());
                let mut new_meta = meta.clone();
                if let Some(display_name) = remap.display_name {
                    new_meta.display_name = display_name;
                }
                for (key, value) in remap.extra {
                    new_meta.extra.insert(key, value);
                }
                entries.push((new_id, new_meta));
            }
            None => entries.push((id.to_string(), meta.clone())),
        }
    }
    Schema::new(entries)
}

/// `getOrInferColumnType` — spec.md §4.2.
pub fn get_or_infer_column_type(
    dialect: &dyn Dialect,
    in_schema: &Schema,
    col_exp: &ColumnExtendExp,
    opts: &relq_ir::ExtendOpts,
) -> QrResult<ColumnType> {
    if let Some(explicit) = &opts.column_type {
        return Ok(explicit.clone());
    }
    infer_column_type(dialect, in_schema, col_exp)
}

fn infer_column_type(
    dialect: &dyn Dialect,
    in_schema: &Schema,
    col_exp: &ColumnExtendExp,
) -> QrResult<ColumnType> {
    match col_exp {
        ColumnExtendExp::ColRef { name } => in_schema
            .metadata(name)
            .map(|meta| meta.column_type.clone())
            .ok_or_else(|| QrError::UnknownColumn {
                name: name.clone(),
                context: "extend".to_string(),
            }),
        ColumnExtendExp::AsString { .. } => {
            Ok(dialect.core_column_types().for_kind(&ColumnKind::String))
        }
        ColumnExtendExp::ConstVal { value } => {
            use relq_core::Scalar;
            let kind = match value {
                Scalar::Int(_) => ColumnKind::Integer,
                Scalar::Float(_) => ColumnKind::Real,
                Scalar::Str(_) => ColumnKind::String,
                Scalar::Bool(_) => ColumnKind::Boolean,
                Scalar::Null | Scalar::Date(_) | Scalar::Timestamp(_) => {
                    return Err(QrError::TypeInferenceFailed {
                        expr: format!("{:?}", value),
                    })
                }
            };
            Ok(dialect.core_column_types().for_kind(&kind))
        }
    }
}
