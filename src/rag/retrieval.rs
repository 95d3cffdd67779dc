use crate::db::KnowledgeBase;
use crate::rag::embeddings::Embedder;
use crate::types::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Separator placed between chunk texts in the assembled context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// What retrieval hands to the generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedContext {
    /// Retrieved chunk texts, nearest first, joined by a blank line.
    pub context: String,
    /// Distinct source filenames of the retrieved chunks, first occurrence order.
    pub sources: Vec<String>,
}

/// Embeds a query and fetches its nearest chunks.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    knowledge_base: Arc<KnowledgeBase>,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, knowledge_base: Arc<KnowledgeBase>, top_k: usize) -> Self {
        Self {
            embedder,
            knowledge_base,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub async fn retrieve(&self, query: &str) -> Result<RetrievedContext> {
        let vector = self.embedder.embed_one(query).await?;
        let hits = self.knowledge_base.search(&vector, self.top_k).await?;

        tracing::debug!(
            hits = hits.len(),
            nearest = ?hits.first().map(|h| h.distance),
            "Retrieved context"
        );

        let context = hits
            .iter()
            .map(|h| h.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        let sources = dedup_sources(hits.iter().map(|h| h.chunk.source.as_str()));

        Ok(RetrievedContext { context, sources })
    }
}

/// Stable de-duplication: keeps the first occurrence of each source.
pub fn dedup_sources<'a, I>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentChunk;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Embeds text as `[len, 0]`, so distance tracks length difference.
    struct LengthEmbedder;

    #[async_trait]
    impl Embedder for LengthEmbedder {
        fn dimensions(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "length"
        }

        async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| vec![t.chars().count() as f32, 0.0])
                .collect())
        }
    }

    fn chunk(source: &str, text: &str) -> DocumentChunk {
        DocumentChunk {
            id: format!("{}_0", source),
            text: text.to_string(),
            source: source.to_string(),
            document_hash: String::new(),
        }
    }

    #[test]
    fn test_dedup_sources_keeps_first_occurrence() {
        assert_eq!(
            dedup_sources(["a.pdf", "b.pdf", "a.pdf"]),
            vec!["a.pdf".to_string(), "b.pdf".to_string()]
        );
        assert!(dedup_sources(Vec::<&str>::new()).is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_from_empty_knowledge_base() {
        let dir = TempDir::new().unwrap();
        let kb = Arc::new(KnowledgeBase::open(dir.path().join("kb.json"), 2).await.unwrap());
        let retriever = Retriever::new(Arc::new(LengthEmbedder), kb, 3);

        let ctx = retriever.retrieve("anything").await.unwrap();
        assert_eq!(ctx, RetrievedContext::default());
    }

    #[tokio::test]
    async fn test_retrieve_orders_by_distance_and_joins() {
        let dir = TempDir::new().unwrap();
        let kb = Arc::new(KnowledgeBase::open(dir.path().join("kb.json"), 2).await.unwrap());

        let chunks = vec![
            chunk("a.pdf", "x"),
            chunk("b.pdf", "xxxxx"),
            chunk("a.pdf", "xxxx"),
            chunk("c.pdf", "xxxxxxxxxxxxxxxx"),
        ];
        let vectors = LengthEmbedder
            .embed(chunks.iter().map(|c| c.text.clone()).collect())
            .await
            .unwrap();
        kb.append(chunks, vectors).await.unwrap();

        let retriever = Retriever::new(Arc::new(LengthEmbedder), kb, 3);
        let ctx = retriever.retrieve("qqqq").await.unwrap();

        assert_eq!(ctx.context, "xxxx\n\nxxxxx\n\nx");
        assert_eq!(ctx.sources, vec!["a.pdf", "b.pdf"]);
    }
}
