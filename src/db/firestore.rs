// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Authorization records (the `admin` and `open` role sets)
//! - Aircraft (fleet registry)
//! - Employees
//! - Flight logs
//! - Fuel logs (append-only ledger)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Aircraft, AuthorizationRecord, Employee, FlightLog, FuelTransaction, Role};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Authorization Set Operations ────────────────────────────

    fn role_collection(role: Role) -> &'static str {
        match role {
            Role::Admin => collections::ADMIN,
            Role::Open => collections::OPEN,
        }
    }

    /// Fetch the authorization record for a uid from one role set.
    pub async fn get_authorization(
        &self,
        role: Role,
        uid: &str,
    ) -> Result<Option<AuthorizationRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(Self::role_collection(role))
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::AuthLookup(e.to_string()))
    }

    /// Membership check against one role set.
    pub async fn is_role_member(&self, role: Role, uid: &str) -> Result<bool, AppError> {
        Ok(self.get_authorization(role, uid).await?.is_some())
    }

    /// List all authorization records in one role set.
    pub async fn list_authorizations(
        &self,
        role: Role,
    ) -> Result<Vec<AuthorizationRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(Self::role_collection(role))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Assign a role to a user.
    ///
    /// Writes the record into the target set and removes any record for the
    /// same uid from the other set. The two sets are meant to be disjoint;
    /// deleting the opposite membership here keeps them that way even though
    /// the resolver would tolerate (admin-wins) a double membership.
    pub async fn set_user_role(
        &self,
        record: &AuthorizationRecord,
        role: Role,
    ) -> Result<(), AppError> {
        let other = match role {
            Role::Admin => Role::Open,
            Role::Open => Role::Admin,
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(Self::role_collection(role))
            .document_id(&record.uid)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.get_client()?
            .fluent()
            .delete()
            .from(Self::role_collection(other))
            .document_id(&record.uid)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(uid = %record.uid, role = ?role, "Role assigned");
        Ok(())
    }

    /// Remove a user from both role sets.
    pub async fn delete_user_roles(&self, uid: &str) -> Result<(), AppError> {
        for collection in [collections::ADMIN, collections::OPEN] {
            self.get_client()?
                .fluent()
                .delete()
                .from(collection)
                .document_id(uid)
                .execute()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        tracing::info!(uid, "User removed from role sets");
        Ok(())
    }

    // ─── Aircraft Operations ─────────────────────────────────────

    /// Get an aircraft by registration.
    pub async fn get_aircraft(&self, registration: &str) -> Result<Option<Aircraft>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::AIRCRAFT)
            .obj()
            .one(registration)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the fleet.
    pub async fn list_aircraft(&self) -> Result<Vec<Aircraft>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::AIRCRAFT)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an aircraft.
    pub async fn upsert_aircraft(&self, aircraft: &Aircraft) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::AIRCRAFT)
            .document_id(&aircraft.registration)
            .object(aircraft)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an aircraft.
    pub async fn delete_aircraft(&self, registration: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::AIRCRAFT)
            .document_id(registration)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Employee Operations ─────────────────────────────────────

    /// Get an employee by ID.
    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EMPLOYEES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all employees.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EMPLOYEES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an employee.
    pub async fn upsert_employee(&self, employee: &Employee) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::EMPLOYEES)
            .document_id(&employee.id)
            .object(employee)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an employee.
    pub async fn delete_employee(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EMPLOYEES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Flight Log Operations ───────────────────────────────────

    /// Get flight logs, newest first, optionally filtered by aircraft.
    pub async fn list_flight_logs(
        &self,
        aircraft_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FlightLog>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::FLIGHT_LOGS);

        let query = if let Some(registration) = aircraft_id {
            let registration = registration.to_string();
            query.filter(move |q| q.for_all([q.field("aircraft_id").eq(registration.clone())]))
        } else {
            query
        };

        query
            .order_by([(
                "flight_date",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .offset(offset)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a flight log.
    pub async fn upsert_flight_log(&self, log: &FlightLog) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FLIGHT_LOGS)
            .document_id(&log.id)
            .object(log)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a flight log.
    pub async fn delete_flight_log(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FLIGHT_LOGS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Fuel Ledger Operations ──────────────────────────────────

    /// Get fuel transactions, newest first.
    pub async fn list_fuel_logs(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FuelTransaction>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FUEL_LOGS)
            .order_by([(
                "transaction_date",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .offset(offset)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append a fuel transaction to the ledger.
    ///
    /// Uses insert (not upsert) so an existing document is never overwritten;
    /// the ledger is append-only.
    pub async fn add_fuel_log(&self, transaction: &FuelTransaction) -> Result<(), AppError> {
        let _: FuelTransaction = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::FUEL_LOGS)
            .document_id(&transaction.id)
            .object(transaction)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
