//! Collection lifecycle: create-if-missing, drop, list.
//!
//! # Responsibility
//! - Materialize requested collections by writing a seed document.
//! - Drop and enumerate collections of the target database.
//!
//! # Invariants
//! - A collection counts as existing only once it holds a document, so
//!   creation always writes `{name: <seed_name>}` instead of issuing a bare
//!   create command.
//! - Creation stops at the first failure; collections created earlier in the
//!   same call are kept.

use super::error::{RepoError, RepoResult};
use super::repository::{require_collection_name, require_name, Repository};
use log::{error, info};
use mongodb::bson::{doc, Document};

impl Repository {
    /// Ensures every name in `names` exists as a collection.
    ///
    /// `None` and an empty slice are distinct errors.
    pub fn ensure_collections(&self, names: Option<&[&str]>) -> RepoResult<()> {
        let database = self.database()?;
        let names = names.ok_or(RepoError::NilCollectionList)?;
        if names.is_empty() {
            return Err(RepoError::EmptyCollectionList);
        }
        for name in names {
            require_collection_name(name)?;
        }

        let conn = self.connection();
        let mut existing = conn.call("list_collection_names", async {
            database.list_collection_names().await
        })?;

        let seed = seed_document(&self.options().seed_name);
        for name in names {
            if existing.iter().any(|present| present == name) {
                continue;
            }

            let collection = database.collection::<Document>(name);
            if let Err(err) = conn.call("create_collection", async {
                collection.insert_one(&seed).await
            }) {
                error!(
                    "event=collection_create module=repo status=error database={} collection={name}",
                    self.database_name()
                );
                return Err(err.into());
            }

            info!(
                "event=collection_create module=repo status=ok database={} collection={name}",
                self.database_name()
            );
            existing.push((*name).to_string());
        }

        Ok(())
    }

    /// Drops `name`; a missing collection is not an error.
    pub fn drop_collection(&self, name: &str) -> RepoResult<()> {
        require_name(name)?;
        let collection = self.raw_collection(name)?;

        info!(
            "event=collection_drop module=repo status=start database={} collection={name}",
            self.database_name()
        );
        self.connection()
            .call("drop_collection", async { collection.drop().await })?;
        info!(
            "event=collection_drop module=repo status=ok database={} collection={name}",
            self.database_name()
        );

        Ok(())
    }

    /// Lists collection names in store order.
    pub fn list_collection_names(&self) -> RepoResult<Vec<String>> {
        let database = self.database()?;
        let names = self.connection().call("list_collection_names", async {
            database.list_collection_names().await
        })?;
        Ok(names)
    }
}

fn seed_document(seed_name: &str) -> Document {
    doc! { "name": seed_name }
}
