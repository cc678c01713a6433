//! Fake provider and sink ports

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use codegraph_rewrite::features::declaration_scan::scan;
use codegraph_rewrite::features::persistence::{DocumentSink, SinkError};
use codegraph_rewrite::features::semantic::{
    JavaProvider, LoadedDocument, NameBinding, ProjectContext, ProviderError, SemanticModel,
    SemanticProvider, TypeSymbol,
};
use codegraph_rewrite::features::syntax::{LanguageId, NodeId, SyntaxNode};

/// Model that answers from a fixed table first, then from the wrapped model
pub struct OverridingModel {
    pub inner: Arc<dyn SemanticModel>,
    pub overrides: HashMap<NodeId, TypeSymbol>,
}

impl SemanticModel for OverridingModel {
    fn type_of(&self, slot: NodeId) -> Option<TypeSymbol> {
        self.overrides
            .get(&slot)
            .cloned()
            .or_else(|| self.inner.type_of(slot))
    }

    fn bind_type_name(&self, simple_name: &str, at: NodeId) -> NameBinding {
        self.inner.bind_type_name(simple_name, at)
    }
}

/// Java provider whose n-th implicit declaration (0-based) gets a fixed symbol
pub struct TamperingProvider {
    inner: JavaProvider,
    index: usize,
    symbol: TypeSymbol,
}

impl TamperingProvider {
    pub fn new(index: usize, symbol: TypeSymbol) -> Self {
        Self {
            inner: JavaProvider::new(),
            index,
            symbol,
        }
    }

    /// Symbol whose spelling does not parse as a type
    pub fn unparseable_at(index: usize) -> Self {
        Self::new(index, TypeSymbol::concrete("java.util.Map<<int", "Map<<int"))
    }
}

#[async_trait]
impl SemanticProvider for TamperingProvider {
    fn language(&self) -> LanguageId {
        LanguageId::Java
    }

    async fn load_compilation_unit(
        &self,
        path: &Path,
        context: &ProjectContext,
    ) -> Result<LoadedDocument, ProviderError> {
        let document = self.inner.load_compilation_unit(path, context).await?;
        let mut overrides = HashMap::new();
        if let Some(site) = scan(&document.unit).nth(self.index) {
            overrides.insert(site.slot_id(), self.symbol.clone());
        }
        Ok(LoadedDocument {
            unit: document.unit,
            model: Arc::new(OverridingModel {
                inner: document.model,
                overrides,
            }),
        })
    }
}

/// Java provider whose tree lists every top-level declaration twice
///
/// Both copies share node ids, so every slot is reported twice.
#[derive(Default)]
pub struct DuplicatingProvider {
    inner: JavaProvider,
}

#[async_trait]
impl SemanticProvider for DuplicatingProvider {
    fn language(&self) -> LanguageId {
        LanguageId::Java
    }

    async fn load_compilation_unit(
        &self,
        path: &Path,
        context: &ProjectContext,
    ) -> Result<LoadedDocument, ProviderError> {
        let document = self.inner.load_compilation_unit(path, context).await?;
        let root = document.unit.root();
        let mut children = root.children.clone();
        children.extend(root.children.iter().filter(|c| c.as_node().is_some()).cloned());
        let forged = SyntaxNode::clone(root).with_children(children);
        let watermark = document.unit.id_allocator().watermark();
        Ok(LoadedDocument {
            unit: document.unit.with_root(Arc::new(forged), watermark),
            model: document.model,
        })
    }
}

/// Provider whose backend is down
pub struct UnavailableProvider;

#[async_trait]
impl SemanticProvider for UnavailableProvider {
    fn language(&self) -> LanguageId {
        LanguageId::Java
    }

    async fn load_compilation_unit(
        &self,
        _path: &Path,
        _context: &ProjectContext,
    ) -> Result<LoadedDocument, ProviderError> {
        Err(ProviderError::Language("workspace service unavailable".to_string()))
    }
}

/// Sink that keeps every write in memory
#[derive(Default)]
pub struct MemorySink {
    pub writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MemorySink {
    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().expect("sink lock").clone()
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn write_document(&self, path: &Path, text: &str) -> Result<(), SinkError> {
        self.writes
            .lock()
            .expect("sink lock")
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}

/// Sink that refuses every write
pub struct RejectingSink;

#[async_trait]
impl DocumentSink for RejectingSink {
    async fn write_document(&self, path: &Path, _text: &str) -> Result<(), SinkError> {
        Err(SinkError::Rejected {
            path: path.to_path_buf(),
            reason: "document is read-only".to_string(),
        })
    }
}
