use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::SequenceError;
use crate::models::{validate_scope, CodeScope, Counter, GeneratedCode, DEFAULT_CODE_WIDTH};
use crate::services::counter::CounterStore;

/// `<prefix>-<value zero-padded to width>`. Values wider than `width` are
/// printed in full so codes stay unique past the padding.
pub fn format_code(prefix: &str, value: u64, width: usize) -> String {
    format!("{}-{:0width$}", prefix, value, width = width)
}

/// Issues human-readable entity codes. A code is generated once, at entity
/// creation, and a counter failure aborts that creation.
pub struct CodeGenerator {
    store: Arc<dyn CounterStore>,
    width: usize,
}

impl CodeGenerator {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            store,
            width: DEFAULT_CODE_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub async fn next_value(&self, scope: &str) -> Result<u64, SequenceError> {
        validate_scope(scope)?;
        self.store.next_value(scope).await
    }

    pub async fn next_code(&self, scope: CodeScope) -> Result<GeneratedCode, SequenceError> {
        let value = self.next_value(scope.as_str()).await.map_err(|e| {
            error!("Could not generate {} code: {}", scope, e);
            e
        })?;

        let code = format_code(scope.prefix(), value, self.width);
        debug!("Generated code {} for scope {}", code, scope);

        Ok(GeneratedCode { scope, value, code })
    }

    pub async fn current(&self, scope: CodeScope) -> Result<Counter, SequenceError> {
        let seq = self.store.current_value(scope.as_str()).await?;
        Ok(Counter {
            scope: scope.to_string(),
            seq,
        })
    }

    pub async fn reset(&self, scope: CodeScope) -> Result<Counter, SequenceError> {
        self.store.reset(scope.as_str()).await?;
        info!("Administrative reset of counter scope {}", scope);
        Ok(Counter {
            scope: scope.to_string(),
            seq: 0,
        })
    }
}
