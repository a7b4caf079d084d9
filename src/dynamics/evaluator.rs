//! Dynamic segment evaluation
//!
//! Resolves a dynamic segment's dependencies against the model and invokes
//! the registered function. Evaluation is single-level: a dependency that is
//! itself dynamic contributes its stored literal content, not its evaluated
//! value. Evaluation never mutates the document or the model.

use thiserror::Error;

use super::registry::{DynamicFnError, FunctionRegistry};
use crate::models::{SegmentModel, TextSegment};

/// Why a dynamic segment could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown dependency segment: {0:?}")]
    MissingDependency(String),
    #[error("dynamic function not registered: {0:?}")]
    FunctionNotRegistered(String),
    #[error("dynamic function {function:?} failed: {source}")]
    FunctionFailed {
        function: String,
        #[source]
        source: DynamicFnError,
    },
}

/// Evaluate one segment against a model and registry
///
/// Non-dynamic segments pass through unchanged. Dependencies are resolved
/// by explicit id, in declared order, before the function is looked up, so
/// a missing dependency is reported even when the function is unknown too.
pub fn evaluate(
    segment: &TextSegment,
    model: &SegmentModel,
    registry: &FunctionRegistry,
) -> Result<String, EvalError> {
    let dynamic = match &segment.metadata.dynamic {
        Some(dynamic) => dynamic,
        None => return Ok(segment.content.clone()),
    };

    let mut args: Vec<&str> = Vec::with_capacity(dynamic.deps.len());
    for dep in &dynamic.deps {
        let dep_segment = model
            .segment_by_id(dep)
            .ok_or_else(|| EvalError::MissingDependency(dep.clone()))?;
        args.push(dep_segment.content.as_str());
    }

    let function = registry
        .get(&dynamic.function)
        .ok_or_else(|| EvalError::FunctionNotRegistered(dynamic.function.clone()))?;

    function(&args).map_err(|source| EvalError::FunctionFailed {
        function: dynamic.function.clone(),
        source,
    })
}
