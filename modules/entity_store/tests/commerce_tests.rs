//! Commerce family: users, products and stock-checked orders

mod common;

use common::{memory_client, sample_product, sample_user, SHOP};
use entity_store::{NewOrder, StoreError};
use rust_decimal::Decimal;

fn order(user_id: i32, product_id: i32, quantity: i32) -> NewOrder {
    NewOrder {
        user_id,
        product_id,
        quantity,
        status: None,
    }
}

#[tokio::test]
async fn order_decrements_stock_and_snapshots_total() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let product = client
        .create_product(SHOP, sample_product("Widget", 1999, 10))
        .await
        .unwrap();

    let placed = client
        .create_order(SHOP, order(user.id, product.id, 3))
        .await
        .unwrap();
    assert_eq!(placed.total_price, Decimal::new(5997, 2));
    assert_eq!(placed.status, "pending");
    assert_eq!(placed.quantity, 3);

    let product = client.get_product(SHOP, product.id).await.unwrap();
    assert_eq!(product.stock, 7);
    assert_eq!(product.price, Decimal::new(1999, 2));
}

#[tokio::test]
async fn exhausted_stock_fails_without_side_effects() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let product = client
        .create_product(SHOP, sample_product("Widget", 500, 4))
        .await
        .unwrap();

    for _ in 0..2 {
        client
            .create_order(SHOP, order(user.id, product.id, 2))
            .await
            .unwrap();
    }
    assert_eq!(client.get_product(SHOP, product.id).await.unwrap().stock, 0);

    let err = client
        .create_order(SHOP, order(user.id, product.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::FailedPrecondition { .. }));
    assert!(err.to_string().contains("insufficient stock"));

    assert_eq!(client.get_product(SHOP, product.id).await.unwrap().stock, 0);
    assert_eq!(client.list_orders(SHOP, None).await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_never_oversell() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let product = client
        .create_product(SHOP, sample_product("Limited", 100, 7))
        .await
        .unwrap();

    let (user_id, product_id) = (user.id, product.id);
    let attempts: Vec<_> = (0..20)
        .map(|i| {
            let client = client.clone();
            let quantity = 1 + (i % 2);
            tokio::spawn(async move {
                client
                    .create_order(SHOP, order(user_id, product_id, quantity))
                    .await
            })
        })
        .collect();

    let mut sold = 0;
    for attempt in futures::future::join_all(attempts).await {
        match attempt.unwrap() {
            Ok(placed) => sold += placed.quantity,
            Err(e) => assert!(matches!(e, StoreError::FailedPrecondition { .. })),
        }
    }

    let remaining = client.get_product(SHOP, product.id).await.unwrap().stock;
    assert!(sold <= 7);
    assert_eq!(sold + remaining, 7);
    assert!(remaining >= 0);
}

#[tokio::test]
async fn order_validation_order() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let product = client
        .create_product(SHOP, sample_product("Widget", 100, 1))
        .await
        .unwrap();

    assert!(matches!(
        client.create_order(SHOP, order(user.id, product.id, 0)).await,
        Err(StoreError::InvalidArgument { .. })
    ));
    assert_eq!(
        client
            .create_order(SHOP, order(999, product.id, 1))
            .await
            .unwrap_err(),
        StoreError::not_found("user", 999)
    );
    assert_eq!(
        client
            .create_order(SHOP, order(user.id, 999, 1))
            .await
            .unwrap_err(),
        StoreError::not_found("product", 999)
    );
    assert!(client.list_orders(SHOP, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn orders_are_joined_with_user_and_product() {
    let client = memory_client();
    let ada = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let bob = client.create_user(SHOP, sample_user("Bob")).await.unwrap();
    let widget = client
        .create_product(SHOP, sample_product("Widget", 250, 10))
        .await
        .unwrap();
    let gadget = client
        .create_product(SHOP, sample_product("Gadget", 1000, 10))
        .await
        .unwrap();

    client
        .create_order(SHOP, order(ada.id, widget.id, 2))
        .await
        .unwrap();
    client
        .create_order(SHOP, order(bob.id, gadget.id, 1))
        .await
        .unwrap();
    let mut shipped = order(ada.id, gadget.id, 3);
    shipped.status = Some("shipped".to_string());
    client.create_order(SHOP, shipped).await.unwrap();

    let all = client.list_orders(SHOP, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].order.status, "shipped");
    assert_eq!(all[0].user_name, "Ada");
    assert_eq!(all[0].product_name, "Gadget");
    assert_eq!(all[0].product_price, Decimal::new(1000, 2));
    assert_eq!(all[0].order.total_price, Decimal::new(3000, 2));

    let bobs = client.list_orders(SHOP, Some(bob.id)).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].user_name, "Bob");
    assert_eq!(bobs[0].order.product_id, gadget.id);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let client = memory_client();
    client.create_user(SHOP, sample_user("Ada")).await.unwrap();

    let err = client
        .create_user(SHOP, sample_user("Ada"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[tokio::test]
async fn product_validation() {
    let client = memory_client();

    let negative_price = sample_product("Refund", -100, 1);
    assert!(matches!(
        client.create_product(SHOP, negative_price).await,
        Err(StoreError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client
            .create_product(SHOP, sample_product("Oversold", 100, -1))
            .await,
        Err(StoreError::InvalidArgument { .. })
    ));

    let free = client
        .create_product(SHOP, sample_product("Sample", 0, 0))
        .await
        .unwrap();
    assert_eq!(free.price, Decimal::ZERO);
}

#[tokio::test]
async fn catalog_operations_do_not_exist_on_commerce_partitions() {
    let client = memory_client();

    let err = client.get_app(SHOP, "a1").await.unwrap_err();
    assert!(matches!(err, StoreError::RouteNotFound { .. }));

    let err = client
        .create_user("global", sample_user("Ada"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RouteNotFound { .. }));
}

#[tokio::test]
async fn users_and_products_list_newest_first() {
    let client = memory_client();
    let ada = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let bob = client.create_user(SHOP, sample_user("Bob")).await.unwrap();
    client
        .create_product(SHOP, sample_product("Widget", 100, 1))
        .await
        .unwrap();
    client
        .create_product(SHOP, sample_product("Gadget", 250, 2))
        .await
        .unwrap();

    let users = client.list_users(SHOP).await.unwrap();
    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, [bob.id, ada.id]);
    assert_eq!(client.get_user(SHOP, ada.id).await.unwrap().name, "Ada");

    let products = client.list_products(SHOP).await.unwrap();
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Gadget", "Widget"]);

    let missing = client.get_user(SHOP, 999).await.unwrap_err();
    assert!(matches!(missing, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn overflowing_total_is_rejected_and_partition_keeps_serving() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let mut pricey = sample_product("Crown", 0, 10);
    pricey.price = Decimal::MAX;
    let product = client.create_product(SHOP, pricey).await.unwrap();

    let err = client
        .create_order(SHOP, order(user.id, product.id, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument { .. }), "{err:?}");

    // Nothing was written and the partition still answers
    assert_eq!(client.get_product(SHOP, product.id).await.unwrap().stock, 10);
    assert!(client.list_orders(SHOP, None).await.unwrap().is_empty());
    assert_eq!(client.list_users(SHOP).await.unwrap().len(), 1);

    let single = client
        .create_order(SHOP, order(user.id, product.id, 1))
        .await
        .unwrap();
    assert_eq!(single.total_price, Decimal::MAX);
}

#[tokio::test]
async fn extreme_quantities_stay_in_range() {
    let client = memory_client();
    let user = client.create_user(SHOP, sample_user("Ada")).await.unwrap();
    let scarce = client
        .create_product(SHOP, sample_product("Scarce", 100, 3))
        .await
        .unwrap();
    let bulk = client
        .create_product(SHOP, sample_product("Bulk", 1, i32::MAX))
        .await
        .unwrap();

    let err = client
        .create_order(SHOP, order(user.id, scarce.id, i32::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::FailedPrecondition { .. }), "{err:?}");

    let placed = client
        .create_order(SHOP, order(user.id, bulk.id, i32::MAX))
        .await
        .unwrap();
    assert_eq!(placed.total_price, Decimal::new(i32::MAX as i64, 2));
    assert_eq!(client.get_product(SHOP, bulk.id).await.unwrap().stock, 0);

    let err = client
        .create_order(SHOP, order(user.id, bulk.id, i32::MIN))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument { .. }), "{err:?}");
}
