//! SeaORM repository implementations

use crate::contract::{
    App, AppDataRecord, AppExecution, AppPatch, NewApp, NewOrder, NewProduct, NewUser, Order,
    OrderDetails, Product, User,
};
use crate::domain::repository::{CatalogRepository, CommerceRepository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use std::sync::Arc;

use super::entity::{app_data, app_execution, order, product, prompt_app, user};
use super::mapper;

// ===== Catalog Repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn insert_app(&self, app: &NewApp, now: DateTime<Utc>) -> Result<()> {
        prompt_app::Entity::insert(mapper::new_app_active(app, now))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn find_app(&self, id: &str) -> Result<Option<App>> {
        let result = prompt_app::Entity::find_by_id(id).one(&*self.db).await?;

        result.map(App::try_from).transpose()
    }

    async fn list_apps_by_owner(&self, owner_id: &str) -> Result<Vec<App>> {
        let results = prompt_app::Entity::find()
            .filter(prompt_app::Column::CreatedBy.eq(owner_id))
            .order_by_desc(prompt_app::Column::CreatedAt)
            .order_by_desc(prompt_app::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(App::try_from).collect()
    }

    async fn update_app(
        &self,
        id: &str,
        patch: &AppPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<App>> {
        let Some(existing) = prompt_app::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: prompt_app::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(prompt) = &patch.prompt {
            active.prompt = Set(prompt.clone());
        }
        if let Some(is_published) = patch.is_published {
            active.is_published = Set(is_published);
        }
        if let Some(config) = &patch.config {
            active.config = Set(Some(config.to_string()));
        }
        active.updated_at = Set(now);

        let updated = active.update(&*self.db).await?;
        App::try_from(updated).map(Some)
    }

    async fn delete_app_cascade(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await?;

        app_execution::Entity::delete_many()
            .filter(app_execution::Column::AppId.eq(id))
            .exec(&txn)
            .await?;
        app_data::Entity::delete_many()
            .filter(app_data::Column::AppId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = prompt_app::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(deleted.rows_affected > 0)
    }

    async fn insert_data(&self, record: &AppDataRecord) -> Result<()> {
        let active: app_data::ActiveModel = record.into();
        app_data::Entity::insert(active).exec(&*self.db).await?;
        Ok(())
    }

    async fn list_data(
        &self,
        app_id: &str,
        data_type: Option<&str>,
    ) -> Result<Vec<AppDataRecord>> {
        let mut query = app_data::Entity::find().filter(app_data::Column::AppId.eq(app_id));

        if let Some(data_type) = data_type {
            query = query.filter(app_data::Column::DataType.eq(data_type));
        }

        let results = query
            .order_by_desc(app_data::Column::CreatedAt)
            .order_by_desc(app_data::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_execution(&self, execution: &AppExecution) -> Result<()> {
        let active: app_execution::ActiveModel = execution.into();
        app_execution::Entity::insert(active).exec(&*self.db).await?;
        Ok(())
    }

    async fn list_executions(&self, app_id: &str, limit: u64) -> Result<Vec<AppExecution>> {
        let results = app_execution::Entity::find()
            .filter(app_execution::Column::AppId.eq(app_id))
            .order_by_desc(app_execution::Column::CreatedAt)
            .order_by_desc(app_execution::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await?;

        results.into_iter().map(AppExecution::try_from).collect()
    }
}

// ===== Commerce Repository =====

pub struct SeaOrmCommerceRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCommerceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommerceRepository for SeaOrmCommerceRepository {
    async fn insert_user(&self, new_user: &NewUser, now: DateTime<Utc>) -> Result<User> {
        let inserted = mapper::new_user_active(&new_user.name, &new_user.email, now)
            .insert(&*self.db)
            .await?;

        Ok(inserted.into())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        let result = user::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let results = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_product(&self, new_product: &NewProduct, now: DateTime<Utc>) -> Result<Product> {
        let inserted = mapper::new_product_active(
            &new_product.name,
            new_product.description.as_deref(),
            new_product.price,
            new_product.stock,
            now,
        )
        .insert(&*self.db)
        .await?;

        inserted.try_into()
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>> {
        let result = product::Entity::find_by_id(id).one(&*self.db).await?;

        result.map(Product::try_from).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let results = product::Entity::find()
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Product::try_from).collect()
    }

    async fn place_order(
        &self,
        new_order: &NewOrder,
        total_price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Order> {
        let txn = self.db.begin().await?;

        let stocked = product::Entity::find_by_id(new_order.product_id)
            .one(&txn)
            .await?
            .with_context(|| format!("product {} vanished", new_order.product_id))?;
        let remaining = stocked.stock - new_order.quantity;
        let mut stocked: product::ActiveModel = stocked.into();
        stocked.stock = Set(remaining);
        stocked.update(&txn).await?;

        let inserted = order::ActiveModel {
            id: NotSet,
            user_id: Set(new_order.user_id),
            product_id: Set(new_order.product_id),
            quantity: Set(new_order.quantity),
            total_price: Set(total_price.normalize().to_string()),
            status: Set(new_order
                .status
                .clone()
                .unwrap_or_else(|| Order::DEFAULT_STATUS.to_string())),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        inserted.try_into()
    }

    async fn list_order_details(&self, user_id: Option<i32>) -> Result<Vec<OrderDetails>> {
        let mut query = order::Entity::find()
            .select_only()
            .columns([
                order::Column::Id,
                order::Column::UserId,
                order::Column::ProductId,
                order::Column::Quantity,
                order::Column::TotalPrice,
                order::Column::Status,
                order::Column::CreatedAt,
            ])
            .column_as(user::Column::Name, "user_name")
            .column_as(product::Column::Name, "product_name")
            .column_as(product::Column::Price, "product_price")
            .join(JoinType::InnerJoin, order::Relation::User.def())
            .join(JoinType::InnerJoin, order::Relation::Product.def());

        if let Some(user_id) = user_id {
            query = query.filter(order::Column::UserId.eq(user_id));
        }

        let rows = query
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .into_model::<order::DetailsRow>()
            .all(&*self.db)
            .await?;

        rows.into_iter().map(OrderDetails::try_from).collect()
    }
}
