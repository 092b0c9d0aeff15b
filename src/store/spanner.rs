use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::all_keys;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;
use uuid::Uuid;

use super::CustomerStore;
use crate::config::SpannerConfig;
use crate::models::{Customer, Gender};

const TABLE: &str = "customers";

const COLUMNS: [&str; 7] = ["id", "name", "email", "phone", "address", "gender", "updated_at"];

const CREATE_TABLE_DDL: &str = r#"
CREATE TABLE customers (
    id STRING(36) NOT NULL,
    name STRING(50) NOT NULL,
    email STRING(MAX) NOT NULL,
    phone STRING(10) NOT NULL,
    address STRING(MAX) NOT NULL,
    gender STRING(6) NOT NULL,
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#;

/// Customer store backed by Cloud Spanner
///
/// Cheap to clone; all clones share one session pool.
#[derive(Clone)]
pub struct SpannerCustomerStore {
    inner: Arc<Client>,
}

impl SpannerCustomerStore {
    /// Connect to the configured database.
    ///
    /// The gcloud-spanner library picks up `SPANNER_EMULATOR_HOST` on its
    /// own. Before connecting, the instance, database and `customers` table
    /// are created if they don't exist yet.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }
}

#[async_trait]
impl CustomerStore for SpannerCustomerStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let mut statement = Statement::new(
            "SELECT id, name, email, phone, address, gender FROM customers WHERE id = @id"
        );
        statement.add_param("id", &id.to_string());

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query customer from Spanner")?;

        match result_set.next().await? {
            Some(row) => {
                tracing::debug!("Read customer with id: {}", id);
                Ok(Some(customer_from_row(&row)?))
            }
            None => {
                tracing::debug!("Customer not found with id: {}", id);
                Ok(None)
            }
        }
    }

    async fn save(&self, customer: &Customer) -> Result<()> {
        let id = customer.id.to_string();
        let gender = customer.gender.as_str().to_string();

        let mutation = insert_or_update(
            TABLE,
            &COLUMNS,
            &[
                &id,
                &customer.name,
                &customer.email,
                &customer.phone,
                &customer.address,
                &gender,
                &CommitTimestamp::new(),
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to save customer to Spanner")?;

        tracing::debug!("Saved customer with id: {}", customer.id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner
            .apply(vec![delete(TABLE, all_keys())])
            .await
            .context("Failed to delete customers from Spanner")?;

        tracing::debug!("Deleted all customers");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

fn customer_from_row(row: &Row) -> Result<Customer> {
    let id: String = row.column_by_name("id")?;
    let gender: String = row.column_by_name("gender")?;

    Ok(Customer {
        id: Uuid::parse_str(&id).context("Stored customer id is not a UUID")?,
        name: row.column_by_name("name")?,
        email: row.column_by_name("email")?,
        phone: row.column_by_name("phone")?,
        address: row.column_by_name("address")?,
        gender: gender
            .parse::<Gender>()
            .map_err(|_| anyhow::anyhow!("Stored gender '{}' is not recognised", gender))?,
    })
}

/// Create the Spanner instance, database and table when missing.
///
/// Lets a fresh emulator come up with zero manual setup.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

fn has_customers_table(statements: &[String]) -> bool {
    statements.iter().any(|stmt| {
        stmt.contains("CREATE TABLE customers") || stmt.contains("CREATE TABLE `customers`")
    })
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    if has_customers_table(&ddl_response.into_inner().statements) {
        tracing::info!("Table '{}' already exists", TABLE);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", TABLE);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![CREATE_TABLE_DDL.trim().to_string()],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", TABLE);
    Ok(())
}
