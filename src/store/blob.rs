// src/store/blob.rs

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

/// Diretório de blobs JSON: um arquivo por coleção, valor = array
/// serializado de registros. Leitura e escrita sempre do arquivo inteiro,
/// last write wins. Não há proteção contra um segundo processo escrevendo
/// no mesmo diretório.
#[derive(Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Lê o blob de uma coleção. Arquivo ausente é normal (primeiro boot);
    /// qualquer outro erro de leitura é logado e tratado como ausente.
    pub async fn read(&self, key: &str) -> Option<String> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Falha ao ler o blob '{}': {}", key, e);
                None
            }
        }
    }

    /// Sobrescreve o blob inteiro. Sem ack e sem retry: falha de escrita é
    /// apenas logada, o estado em memória segue valendo.
    pub async fn write(&self, key: &str, payload: &str) {
        if let Err(e) = tokio::fs::write(self.path_for(key), payload).await {
            tracing::error!("Falha ao persistir o blob '{}': {}", key, e);
        }
    }
}

/// Coleção em memória espelhada num blob JSON.
///
/// Todo ponto de mutação segue o mesmo protocolo: monta a lista nova
/// completa e chama `replace_all`, que troca a memória e persiste.
/// Escritor único dentro do processo; o último replace vence.
pub struct JsonCollection<T> {
    key: &'static str,
    blob: BlobStore,
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            blob: self.blob.clone(),
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Abre a coleção: lê o blob, cai para o seed se o arquivo não existe
    /// ou não parseia, e passa cada registro pela normalização.
    pub async fn open(
        blob: BlobStore,
        key: &'static str,
        seed: fn() -> Vec<T>,
        normalize: fn(&mut T),
    ) -> Self {
        let mut items = match blob.read(key).await {
            Some(raw) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        "Blob '{}' malformado ({}), recarregando o seed.",
                        key,
                        e
                    );
                    seed()
                }
            },
            None => seed(),
        };

        for item in &mut items {
            normalize(item);
        }

        let collection = Self {
            key,
            blob,
            items: Arc::new(RwLock::new(items)),
        };
        // Garante que o blob reflita o estado carregado (seed incluso).
        collection.persist().await;
        collection
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    /// Troca a lista inteira e persiste. A persistência não tem ack:
    /// se a escrita falhar fica só o log.
    pub async fn replace_all(&self, items: Vec<T>) {
        {
            let mut guard = self.items.write().await;
            *guard = items;
        }
        self.persist().await;
    }

    async fn persist(&self) {
        let payload = {
            let guard = self.items.read().await;
            match serde_json::to_string(&*guard) {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!("Falha ao serializar a coleção '{}': {}", self.key, e);
                    return;
                }
            }
        };
        self.blob.write(self.key, &payload).await;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        #[serde(default)]
        note: String,
    }

    fn seed() -> Vec<Row> {
        vec![Row {
            id: 1,
            note: "seed".into(),
        }]
    }

    fn no_normalize(_: &mut Row) {}

    /// Diretório descartável por teste, sem depender de crates extras.
    pub(crate) fn temp_store() -> BlobStore {
        let dir = std::env::temp_dir().join(format!("spazio-test-{}", uuid::Uuid::new_v4()));
        BlobStore::open(dir).expect("diretório temporário")
    }

    #[tokio::test]
    async fn replace_all_then_reopen_round_trips() {
        let blob = temp_store();
        let col = JsonCollection::open(blob.clone(), "rows", seed, no_normalize).await;

        let rows = vec![
            Row { id: 7, note: "a".into() },
            Row { id: 8, note: "b".into() },
        ];
        col.replace_all(rows.clone()).await;

        // Simula um reload do processo: reabre a partir do mesmo blob.
        let reopened = JsonCollection::open(blob, "rows", seed, no_normalize).await;
        assert_eq!(reopened.snapshot().await, rows);
    }

    #[tokio::test]
    async fn missing_blob_loads_seed() {
        let col = JsonCollection::open(temp_store(), "rows", seed, no_normalize).await;
        assert_eq!(col.snapshot().await, seed());
    }

    #[tokio::test]
    async fn malformed_blob_falls_back_to_seed() {
        let blob = temp_store();
        blob.write("rows", "{not json").await;

        let col = JsonCollection::open(blob, "rows", seed, no_normalize).await;
        assert_eq!(col.snapshot().await, seed());
    }

    #[tokio::test]
    async fn records_missing_fields_get_defaults() {
        let blob = temp_store();
        blob.write("rows", r#"[{"id": 42}]"#).await;

        let col = JsonCollection::open(blob, "rows", seed, no_normalize).await;
        let rows = col.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 42);
        assert_eq!(rows[0].note, "");
    }
}
