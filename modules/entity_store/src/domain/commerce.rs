//! Commerce business rules: users, products and stock-checked orders

use super::clock::MonotonicClock;
use super::operation::Outcome;
use super::repository::CommerceRepository;
use super::storage_failure;
use crate::contract::{NewOrder, NewProduct, NewUser, Product, StoreError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Commerce operations for one partition
pub struct CommerceStore {
    repo: Arc<dyn CommerceRepository>,
    clock: Arc<MonotonicClock>,
}

impl CommerceStore {
    pub fn new(repo: Arc<dyn CommerceRepository>, clock: Arc<MonotonicClock>) -> Self {
        Self { repo, clock }
    }

    // ===== Users =====

    pub async fn create_user(&self, user: NewUser) -> Result<Outcome, StoreError> {
        if user.name.trim().is_empty() {
            return Err(StoreError::invalid("name must not be empty"));
        }
        if !user.email.contains('@') {
            return Err(StoreError::invalid(format!(
                "email '{}' is not a valid address",
                user.email
            )));
        }

        let existing = self
            .repo
            .find_user_by_email(&user.email)
            .await
            .map_err(storage_failure("find user by email"))?;
        if existing.is_some() {
            return Err(StoreError::conflict(format!(
                "email '{}' is already registered",
                user.email
            )));
        }

        self.repo
            .insert_user(&user, self.clock.now())
            .await
            .map(Outcome::User)
            .map_err(storage_failure("insert user"))
    }

    pub async fn get_user(&self, id: i32) -> Result<Outcome, StoreError> {
        self.repo
            .find_user(id)
            .await
            .map_err(storage_failure("find user"))?
            .map(Outcome::User)
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    pub async fn list_users(&self) -> Result<Outcome, StoreError> {
        self.repo
            .list_users()
            .await
            .map(Outcome::Users)
            .map_err(storage_failure("list users"))
    }

    // ===== Products =====

    pub async fn create_product(&self, product: NewProduct) -> Result<Outcome, StoreError> {
        if product.name.trim().is_empty() {
            return Err(StoreError::invalid("name must not be empty"));
        }
        if product.price < Decimal::ZERO {
            return Err(StoreError::invalid("price must not be negative"));
        }
        if product.stock < 0 {
            return Err(StoreError::invalid("stock must not be negative"));
        }

        self.repo
            .insert_product(&product, self.clock.now())
            .await
            .map(Outcome::Product)
            .map_err(storage_failure("insert product"))
    }

    pub async fn get_product(&self, id: i32) -> Result<Outcome, StoreError> {
        self.find_product(id).await.map(Outcome::Product)
    }

    pub async fn list_products(&self) -> Result<Outcome, StoreError> {
        self.repo
            .list_products()
            .await
            .map(Outcome::Products)
            .map_err(storage_failure("list products"))
    }

    // ===== Orders =====

    /// Place an order, taking `quantity` off the product's stock.
    ///
    /// Checks run in order: quantity, user, product, stock. Nothing is
    /// written unless all of them pass.
    pub async fn create_order(&self, order: NewOrder) -> Result<Outcome, StoreError> {
        if order.quantity <= 0 {
            return Err(StoreError::invalid("quantity must be a positive integer"));
        }

        let user = self
            .repo
            .find_user(order.user_id)
            .await
            .map_err(storage_failure("find user"))?;
        if user.is_none() {
            return Err(StoreError::not_found("user", order.user_id));
        }

        let product = self.find_product(order.product_id).await?;
        if order.quantity > product.stock {
            tracing::warn!(
                product_id = product.id,
                requested = order.quantity,
                stock = product.stock,
                "Order rejected: insufficient stock"
            );
            return Err(StoreError::precondition(format!(
                "insufficient stock for product {}: requested {}, available {}",
                product.id, order.quantity, product.stock
            )));
        }

        let total_price = product
            .price
            .checked_mul(Decimal::from(order.quantity))
            .ok_or_else(|| {
                StoreError::invalid(format!(
                    "order total overflows for product {} at quantity {}",
                    product.id, order.quantity
                ))
            })?;

        let placed = self
            .repo
            .place_order(&order, total_price, self.clock.now())
            .await
            .map_err(storage_failure("place order"))?;

        tracing::debug!(
            order_id = placed.id,
            product_id = placed.product_id,
            quantity = placed.quantity,
            "Order placed"
        );
        Ok(Outcome::Order(placed))
    }

    /// Orders enriched with user and product names, newest first
    pub async fn list_orders(&self, user_id: Option<i32>) -> Result<Outcome, StoreError> {
        self.repo
            .list_order_details(user_id)
            .await
            .map(Outcome::Orders)
            .map_err(storage_failure("list orders"))
    }

    async fn find_product(&self, id: i32) -> Result<Product, StoreError> {
        self.repo
            .find_product(id)
            .await
            .map_err(storage_failure("find product"))?
            .ok_or_else(|| StoreError::not_found("product", id))
    }
}
