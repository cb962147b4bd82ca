//! User document CRUD and cross-collection move.
//!
//! # Responsibility
//! - Validate inputs, then issue exactly the driver calls each use-case needs.
//! - Translate empty results into `DocumentExists`/`NoMatch`/`NotFound`.
//!
//! # Invariants
//! - Duplicate suppression on create matches the full (name, age, email)
//!   triple; read/update/delete/move key on `name` only.
//! - Update is a `$set` of the three fields, never an upsert.
//! - Delete reports a zero count instead of an error when nothing matched.
//! - Move is read, insert, delete with an independent budget per phase and
//!   no compensation. A failed delete after a successful insert leaves the
//!   record in both collections.

use super::error::{RepoError, RepoResult};
use super::repository::{require_collection_name, require_name, Repository};
use crate::model::user::{DocumentId, UserDocument};
use log::{info, warn};
use mongodb::bson::{doc, Document};

impl Repository {
    /// Inserts `doc` unless an identical (name, age, email) record exists.
    pub fn create_user_document(
        &self,
        collection: &str,
        doc: &UserDocument,
    ) -> RepoResult<DocumentId> {
        require_collection_name(collection)?;
        let users = self.users(collection)?;
        doc.validate_for_write()?;

        let conn = self.connection();
        let duplicate = conn.call("find_one", async {
            users.find_one(exact_match_filter(doc)).await
        })?;
        if duplicate.is_some() {
            return Err(RepoError::DocumentExists {
                collection: collection.to_string(),
                name: doc.name.clone(),
            });
        }

        let inserted = conn.call("insert_one", async { users.insert_one(doc).await })?;
        info!(
            "event=user_create module=repo status=ok collection={collection} name={}",
            doc.name
        );
        Ok(inserted.inserted_id)
    }

    /// Overwrites name/age/email of the first document named `name`.
    pub fn update_user_document_by_name(
        &self,
        collection: &str,
        name: &str,
        doc: &UserDocument,
    ) -> RepoResult<()> {
        require_collection_name(collection)?;
        require_name(name)?;
        let users = self.users(collection)?;
        doc.validate_for_write()?;

        let result = self.connection().call("update_one", async {
            users
                .update_one(name_filter(name), set_fields_update(doc))
                .await
        })?;
        if result.matched_count == 0 {
            return Err(RepoError::NoMatch {
                collection: collection.to_string(),
                name: name.to_string(),
            });
        }

        info!("event=user_update module=repo status=ok collection={collection} name={name}");
        Ok(())
    }

    pub fn get_user_document_by_name(
        &self,
        collection: &str,
        name: &str,
    ) -> RepoResult<UserDocument> {
        require_collection_name(collection)?;
        require_name(name)?;
        let users = self.users(collection)?;

        let found = self.connection().call("find_one", async {
            users.find_one(name_filter(name)).await
        })?;
        found.ok_or_else(|| RepoError::NotFound {
            collection: collection.to_string(),
            name: name.to_string(),
        })
    }

    /// Deletes at most one document named `name` and returns the count.
    pub fn delete_user_document_by_name(&self, collection: &str, name: &str) -> RepoResult<u64> {
        require_collection_name(collection)?;
        require_name(name)?;
        let users = self.users(collection)?;

        let result = self.connection().call("delete_one", async {
            users.delete_one(name_filter(name)).await
        })?;

        info!(
            "event=user_delete module=repo status=ok collection={collection} name={name} deleted={}",
            result.deleted_count
        );
        Ok(result.deleted_count)
    }

    /// Moves the record named `doc.name` from `source` to `destination`.
    ///
    /// Only `doc.name` is used; the stored record is copied as-is, including
    /// its `_id`.
    pub fn move_user_document(
        &self,
        source: &str,
        destination: &str,
        doc: &UserDocument,
    ) -> RepoResult<()> {
        require_collection_name(source)?;
        require_collection_name(destination)?;
        require_name(&doc.name)?;
        let from = self.raw_collection(source)?;
        let to = self.raw_collection(destination)?;
        let conn = self.connection();

        let record = conn
            .call("find_one", async {
                from.find_one(name_filter(&doc.name)).await
            })?
            .ok_or_else(|| RepoError::NotFound {
                collection: source.to_string(),
                name: doc.name.clone(),
            })?;

        conn.call("insert_one", async { to.insert_one(&record).await })?;

        if let Err(err) = conn.call("delete_one", async {
            from.delete_one(name_filter(&doc.name)).await
        }) {
            warn!(
                "event=user_move module=repo status=error phase=delete source={source} destination={destination} name={} outcome=duplicated",
                doc.name
            );
            return Err(err.into());
        }

        info!(
            "event=user_move module=repo status=ok source={source} destination={destination} name={}",
            doc.name
        );
        Ok(())
    }
}

fn name_filter(name: &str) -> Document {
    doc! { "name": name }
}

fn exact_match_filter(user: &UserDocument) -> Document {
    doc! {
        "name": user.name.as_str(),
        "age": user.age,
        "email": user.email.as_str(),
    }
}

fn set_fields_update(user: &UserDocument) -> Document {
    doc! {
        "$set": {
            "name": user.name.as_str(),
            "age": user.age,
            "email": user.email.as_str(),
        }
    }
}
